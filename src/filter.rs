//! Composable eligibility predicates over definition records.

use crate::model::DefinitionRecord;

/// A pure predicate over a candidate definition.
pub trait Filter {
    fn matches(&self, record: &DefinitionRecord) -> bool;
}

/// The concrete filters. Each tests one property; `exclude` inverts the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionFilter {
    CategoryTag { tag: String, exclude: bool },
    IsPlayer { exclude: bool },
    IsHidden { exclude: bool },
    IsPermanentEnemy { exclude: bool },
    IsNaturalEnemy { exclude: bool },
}

impl DefinitionFilter {
    pub fn category_tag(tag: impl Into<String>, exclude: bool) -> Self {
        Self::CategoryTag {
            tag: tag.into(),
            exclude,
        }
    }
}

impl Filter for DefinitionFilter {
    fn matches(&self, record: &DefinitionRecord) -> bool {
        let (hit, exclude) = match self {
            Self::CategoryTag { tag, exclude } => {
                (tag.eq_ignore_ascii_case(&record.category_tag), *exclude)
            }
            Self::IsPlayer { exclude } => (record.is_player, *exclude),
            Self::IsHidden { exclude } => (record.hidden, *exclude),
            Self::IsPermanentEnemy { exclude } => (record.permanent_enemy, *exclude),
            Self::IsNaturalEnemy { exclude } => (record.natural_enemy, *exclude),
        };
        hit != exclude
    }
}

/// Keep the records every filter accepts, in source order.
pub fn filter_definitions<F: Filter>(
    source: &[DefinitionRecord],
    filters: &[F],
) -> Vec<DefinitionRecord> {
    source
        .iter()
        .filter(|record| filters.iter().all(|f| f.matches(record)))
        .cloned()
        .collect()
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category tag carried by placeholder definitions awaiting replacement.
pub const RANDOM_CATEGORY: &str = "Random";

/// Default goodwill of a permanent enemy toward everyone else.
pub const PERMANENT_ENEMY_GOODWILL: i32 = -100;

/// Default goodwill of a natural (but not permanent) enemy.
pub const NATURAL_ENEMY_GOODWILL: i32 = -80;

/// Definitions whose baseline chance is above this are still eligible for
/// variant conversion even though they carry an overlay.
pub const BASELINE_CONVERSION_THRESHOLD: f32 = 0.65;

/// Case-insensitive check against [`RANDOM_CATEGORY`].
pub fn is_random_category(tag: &str) -> bool {
    tag.eq_ignore_ascii_case(RANDOM_CATEGORY)
}

/// A genetic/aesthetic variant that can be overlaid on a faction definition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariantRecord {
    pub key: String,
    #[serde(default)]
    pub label: String,
}

impl VariantRecord {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
        }
    }
}

/// One weighted entry of a [`VariantOverlay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantChance {
    pub variant: String,
    pub weight: f32,
}

/// Weighted association between a faction definition and variant records.
///
/// Weights are clamped to `[0, 1]` on construction. Whatever weight is left
/// over after all entries is the chance of the unmodified baseline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VariantOverlay {
    chances: Vec<VariantChance>,
}

impl VariantOverlay {
    pub fn new(chances: Vec<VariantChance>) -> Self {
        let chances = chances
            .into_iter()
            .map(|c| VariantChance {
                weight: c.weight.clamp(0.0, 1.0),
                variant: c.variant,
            })
            .collect();
        Self { chances }
    }

    /// Overlay that always yields `variant`.
    pub fn single(variant: &VariantRecord) -> Self {
        Self::new(vec![VariantChance {
            variant: variant.key.clone(),
            weight: 1.0,
        }])
    }

    pub fn chances(&self) -> &[VariantChance] {
        &self.chances
    }

    pub fn len(&self) -> usize {
        self.chances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chances.is_empty()
    }

    /// Probability that a member rolls no variant at all.
    pub fn baseline_chance(&self) -> f32 {
        let total: f32 = self.chances.iter().map(|c| c.weight).sum();
        (1.0 - total).max(0.0)
    }
}

impl fmt::Display for VariantOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.chances.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}% {}", (c.weight * 100.0) as i32, c.variant)?;
        }
        Ok(())
    }
}

/// Template describing a faction archetype.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DefinitionRecord {
    pub key: String,
    #[serde(default)]
    pub label: String,
    pub category_tag: String,
    #[serde(default)]
    pub is_player: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub permanent_enemy: bool,
    #[serde(default)]
    pub natural_enemy: bool,
    /// Goodwill a faction of this kind starts with when no enemy rule applies.
    #[serde(default)]
    pub baseline_goodwill: i32,
    /// Start-of-game population cap; `<= 0` means unlimited.
    #[serde(default)]
    pub max_count_at_game_start: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<VariantOverlay>,
    #[serde(default)]
    pub disambiguation_id: u32,
}

impl DefinitionRecord {
    pub fn new(key: impl Into<String>, category_tag: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
            category_tag: category_tag.into(),
            ..Self::default()
        }
    }

    pub fn is_random_placeholder(&self) -> bool {
        is_random_category(&self.category_tag)
    }

    /// Whether one more faction of this kind fits under the start-of-game cap,
    /// given `existing` factions already using it.
    pub fn under_population_cap(&self, existing: usize) -> bool {
        self.max_count_at_game_start <= 0 || existing < self.max_count_at_game_start as usize
    }

    /// True when the definition has no overlay or is still mostly baseline.
    pub fn is_variant_conversion_candidate(&self) -> bool {
        self.overlay
            .as_ref()
            .is_none_or(|o| o.baseline_chance() > BASELINE_CONVERSION_THRESHOLD)
    }

    /// Goodwill implied by the definition's enemy flags alone.
    pub fn default_goodwill(&self) -> i32 {
        if self.is_random_placeholder() {
            0
        } else if self.permanent_enemy {
            PERMANENT_ENEMY_GOODWILL
        } else if self.natural_enemy {
            NATURAL_ENEMY_GOODWILL
        } else {
            0
        }
    }

    /// Key of the record derived from `base_key` with `variant_key` overlaid.
    pub fn derived_key(variant_key: &str, base_key: &str) -> String {
        format!("{variant_key}{base_key}")
    }

    /// Copy every field of `self`, then overlay `variant` and take on the
    /// derived key and `disambiguation_id`.
    pub fn with_variant(&self, variant: &VariantRecord, disambiguation_id: u32) -> Self {
        Self {
            key: Self::derived_key(&variant.key, &self.key),
            label: self.label.clone(),
            category_tag: self.category_tag.clone(),
            is_player: self.is_player,
            hidden: self.hidden,
            permanent_enemy: self.permanent_enemy,
            natural_enemy: self.natural_enemy,
            baseline_goodwill: self.baseline_goodwill,
            max_count_at_game_start: self.max_count_at_game_start,
            overlay: Some(VariantOverlay::single(variant)),
            disambiguation_id,
        }
    }
}

/// Comma-separated keys, for trace output.
pub(crate) fn key_list<'a>(keys: impl IntoIterator<Item = &'a str>) -> String {
    keys.into_iter().collect::<Vec<_>>().join(", ")
}

use std::fmt;

use serde::{Deserialize, Serialize};

use super::definition::DefinitionRecord;

/// Goodwill at or below this is hostile.
pub const HOSTILE_THRESHOLD: i32 = -75;

/// Goodwill at or above this is allied.
pub const ALLY_THRESHOLD: i32 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactionId(pub u64);

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Disposition {
    Hostile,
    Neutral,
    Ally,
}

string_enum!(Disposition {
    Hostile => "hostile",
    Neutral => "neutral",
    Ally => "ally",
});

impl Disposition {
    pub fn from_goodwill(goodwill: i32) -> Self {
        if goodwill <= HOSTILE_THRESHOLD {
            Disposition::Hostile
        } else if goodwill >= ALLY_THRESHOLD {
            Disposition::Ally
        } else {
            Disposition::Neutral
        }
    }
}

/// One side of a relation between two factions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub counterpart: FactionId,
    pub disposition: Disposition,
    pub goodwill: i32,
}

impl RelationRecord {
    pub fn from_goodwill(counterpart: FactionId, goodwill: i32) -> Self {
        Self {
            counterpart,
            disposition: Disposition::from_goodwill(goodwill),
            goodwill,
        }
    }

    /// Neutral, zero-goodwill relation. Used to wipe history toward a replaced faction.
    pub fn neutral(counterpart: FactionId) -> Self {
        Self {
            counterpart,
            disposition: Disposition::Neutral,
            goodwill: 0,
        }
    }
}

/// A live faction in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionEntity {
    pub id: FactionId,
    pub name: String,
    pub definition: DefinitionRecord,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub defeated: bool,
    /// Goodwill this faction naturally holds when no enemy rule applies.
    #[serde(default)]
    pub baseline_goodwill: i32,
    #[serde(default)]
    pub relations: Vec<RelationRecord>,
}

impl FactionEntity {
    pub fn new(id: FactionId, name: String, definition: DefinitionRecord) -> Self {
        Self {
            id,
            name,
            hidden: definition.hidden,
            baseline_goodwill: definition.baseline_goodwill,
            definition,
            defeated: false,
            relations: Vec::new(),
        }
    }

    pub fn is_player(&self) -> bool {
        self.definition.is_player
    }

    pub fn definition_key(&self) -> &str {
        &self.definition.key
    }

    pub fn is_random_placeholder(&self) -> bool {
        self.definition.is_random_placeholder()
    }

    /// Default goodwill this faction offers a newcomer. Falls back to the
    /// faction's own baseline when its definition implies no enemy rule.
    pub fn default_goodwill(&self) -> i32 {
        if self.is_random_placeholder() {
            return 0;
        }
        match self.definition.default_goodwill() {
            0 => self.baseline_goodwill,
            goodwill => goodwill,
        }
    }

    pub fn relation(&self, other: FactionId) -> Option<&RelationRecord> {
        self.relations.iter().find(|r| r.counterpart == other)
    }

    /// Insert or overwrite the relation toward `relation.counterpart`.
    pub fn set_relation(&mut self, relation: RelationRecord) {
        match self
            .relations
            .iter_mut()
            .find(|r| r.counterpart == relation.counterpart)
        {
            Some(existing) => *existing = relation,
            None => self.relations.push(relation),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: u64,
    pub name: String,
    pub owner: FactionId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faction(def: DefinitionRecord) -> FactionEntity {
        FactionEntity::new(FactionId(1), "The Iron Hold".to_string(), def)
    }

    #[test]
    fn disposition_thresholds() {
        assert_eq!(Disposition::from_goodwill(-100), Disposition::Hostile);
        assert_eq!(Disposition::from_goodwill(-75), Disposition::Hostile);
        assert_eq!(Disposition::from_goodwill(-74), Disposition::Neutral);
        assert_eq!(Disposition::from_goodwill(0), Disposition::Neutral);
        assert_eq!(Disposition::from_goodwill(75), Disposition::Ally);
    }

    #[test]
    fn disposition_serializes_as_lowercase() {
        assert_eq!(
            serde_json::to_string(&Disposition::Hostile).unwrap(),
            "\"hostile\""
        );
        let back: Disposition = serde_json::from_str("\"ally\"").unwrap();
        assert_eq!(back, Disposition::Ally);
        assert!(serde_json::from_str::<Disposition>("\"friendly\"").is_err());
    }

    #[test]
    fn new_faction_mirrors_definition() {
        let def = DefinitionRecord {
            hidden: true,
            baseline_goodwill: 15,
            ..DefinitionRecord::new("Mechanoids", "Mech")
        };
        let f = faction(def);
        assert!(f.hidden);
        assert!(!f.defeated);
        assert_eq!(f.baseline_goodwill, 15);
        assert_eq!(f.definition_key(), "Mechanoids");
    }

    #[test]
    fn faction_goodwill_falls_back_to_baseline() {
        let mut f = faction(DefinitionRecord::new("Traders", "Outlander"));
        f.baseline_goodwill = 30;
        assert_eq!(f.default_goodwill(), 30);

        let mut pirate = faction(DefinitionRecord {
            permanent_enemy: true,
            ..DefinitionRecord::new("Pirates", "Pirate")
        });
        pirate.baseline_goodwill = 30;
        assert_eq!(pirate.default_goodwill(), -100);

        let mut placeholder = faction(DefinitionRecord::new("RF_RandomFaction", "Random"));
        placeholder.baseline_goodwill = 30;
        assert_eq!(placeholder.default_goodwill(), 0);
    }

    #[test]
    fn set_relation_overwrites() {
        let mut f = faction(DefinitionRecord::new("Traders", "Outlander"));
        f.set_relation(RelationRecord::from_goodwill(FactionId(2), -90));
        f.set_relation(RelationRecord::neutral(FactionId(2)));
        assert_eq!(f.relations.len(), 1);
        let rel = f.relation(FactionId(2)).unwrap();
        assert_eq!(rel.disposition, Disposition::Neutral);
        assert_eq!(rel.goodwill, 0);
    }
}

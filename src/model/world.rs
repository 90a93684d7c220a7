use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::definition::DefinitionRecord;
use super::faction::{FactionEntity, FactionId, RelationRecord, Settlement};
use crate::id::IdGenerator;
use crate::store::StoreState;

/// The host's persisted world: its seed, live factions and settlements, and
/// the slot where the faction store's state is saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub constant_seed: i32,
    pub factions: BTreeMap<FactionId, FactionEntity>,
    pub settlements: Vec<Settlement>,
    pub id_gen: IdGenerator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction_store: Option<StoreState>,
}

impl World {
    pub fn new(constant_seed: i32) -> Self {
        Self {
            constant_seed,
            factions: BTreeMap::new(),
            settlements: Vec::new(),
            id_gen: IdGenerator::new(),
            faction_store: None,
        }
    }

    pub fn next_faction_id(&mut self) -> FactionId {
        FactionId(self.id_gen.next_id())
    }

    /// Create a faction with no relations and add it. Returns its ID.
    pub fn spawn_faction(
        &mut self,
        name: impl Into<String>,
        definition: DefinitionRecord,
    ) -> FactionId {
        let id = self.next_faction_id();
        self.add_faction(FactionEntity::new(id, name.into(), definition))
    }

    /// Register a faction into the live population.
    ///
    /// Each relation the faction carries is mirrored onto its counterpart so
    /// both sides agree on goodwill.
    pub fn add_faction(&mut self, faction: FactionEntity) -> FactionId {
        let id = faction.id;
        for rel in &faction.relations {
            if let Some(other) = self.factions.get_mut(&rel.counterpart) {
                other.set_relation(RelationRecord::from_goodwill(id, rel.goodwill));
            }
        }
        self.factions.insert(id, faction);
        id
    }

    pub fn faction(&self, id: FactionId) -> Option<&FactionEntity> {
        self.factions.get(&id)
    }

    pub fn faction_mut(&mut self, id: FactionId) -> Option<&mut FactionEntity> {
        self.factions.get_mut(&id)
    }

    pub fn add_settlement(&mut self, name: impl Into<String>, owner: FactionId) -> u64 {
        let id = self.id_gen.next_id();
        self.settlements.push(Settlement {
            id,
            name: name.into(),
            owner,
        });
        id
    }

    pub fn settlements_of(&self, owner: FactionId) -> impl Iterator<Item = &Settlement> {
        self.settlements.iter().filter(move |s| s.owner == owner)
    }

    /// Non-defeated factions still waiting for replacement, in ID order.
    pub fn placeholder_factions(&self) -> Vec<FactionId> {
        self.factions
            .values()
            .filter(|f| f.is_random_placeholder() && !f.defeated)
            .map(|f| f.id)
            .collect()
    }
}

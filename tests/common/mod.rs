#![allow(dead_code)]

use random_factions::*;

/// A small catalog covering every placeholder kind's candidate pool.
pub fn build_test_registry() -> InMemoryRegistry {
    let mut registry = InMemoryRegistry::with_definitions([
        DefinitionRecord {
            is_player: true,
            ..DefinitionRecord::new("PlayerColony", "Player")
        },
        DefinitionRecord {
            baseline_goodwill: 20,
            ..DefinitionRecord::new("OutlanderCivil", "Outlander")
        },
        DefinitionRecord {
            natural_enemy: true,
            ..DefinitionRecord::new("TribeSavage", "Tribal")
        },
        DefinitionRecord {
            permanent_enemy: true,
            natural_enemy: true,
            ..DefinitionRecord::new("Pirate", "Pirate")
        },
        DefinitionRecord {
            hidden: true,
            permanent_enemy: true,
            ..DefinitionRecord::new("Mechanoid", "Mech")
        },
        DefinitionRecord::new("RF_RandomFaction", "Random"),
        DefinitionRecord::new("RF_RandomPirateFaction", "Random"),
        DefinitionRecord::new("RF_RandomRoughFaction", "Random"),
        DefinitionRecord::new("RF_RandomTradeFaction", "Random"),
    ]);
    registry.add_variant(VariantRecord::new("Genie"));
    registry.add_variant(VariantRecord::new("Yttakin"));
    registry
}

/// A fresh world: the player, one real NPC faction, and one placeholder of
/// each kind, each placeholder holding a settlement.
pub fn build_test_world(registry: &InMemoryRegistry, seed: i32) -> World {
    let mut world = World::new(seed);
    let def = |key: &str| registry.get(key).unwrap().clone();

    world.spawn_faction("Colony", def("PlayerColony"));
    world.spawn_faction("Harbor Union", def("OutlanderCivil"));
    for kind in PlaceholderKind::ALL {
        let id = world.spawn_faction(format!("{kind} slot"), def(kind.definition_key()));
        world.add_settlement(format!("{kind} town"), id);
    }
    world
}

pub fn faction_id_by_name(world: &World, name: &str) -> FactionId {
    world
        .factions
        .values()
        .find(|f| f.name == name)
        .map(|f| f.id)
        .unwrap()
}

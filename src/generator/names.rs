use rand::Rng;
use rand::RngCore;

use crate::model::{DefinitionRecord, World};

const PREFIXES: &[&str] = &[
    "Rust", "Ash", "Iron", "Dust", "Salt", "Ember", "Glass", "Bone", "Cinder", "Flint", "Hollow",
    "Red", "Black", "Pale", "Sun", "Storm", "Thorn", "Wander", "Deep", "Copper", "Shard",
];

/// Permanent enemies.
const RAIDER_KINDS: &[&str] = &["Raiders", "Marauders", "Reavers", "Corsairs", "Butchers"];

/// Natural but not permanent enemies.
const WARBAND_KINDS: &[&str] = &["Warband", "Horde", "Clan", "Pack", "Tribe", "Legion"];

const CIVIL_KINDS: &[&str] = &[
    "Union", "Collective", "Syndicate", "Compact", "Republic", "Company", "League", "Confederacy",
];

fn pick<'t>(table: &[&'t str], rng: &mut dyn RngCore) -> &'t str {
    table[rng.random_range(0..table.len())]
}

fn kinds_for(definition: &DefinitionRecord) -> &'static [&'static str] {
    if definition.permanent_enemy {
        RAIDER_KINDS
    } else if definition.natural_enemy {
        WARBAND_KINDS
    } else {
        CIVIL_KINDS
    }
}

/// Random name for a faction of `definition`.
///
/// The noun follows the definition's enemy flags; a single-variant
/// definition carries its variant in the name ("The Ash Genie Compact").
pub fn generate_faction_name(definition: &DefinitionRecord, rng: &mut dyn RngCore) -> String {
    let prefix = pick(PREFIXES, rng);
    let kind = pick(kinds_for(definition), rng);
    match definition.overlay.as_ref().map(|o| o.chances()) {
        Some([only]) => format!("The {prefix} {} {kind}", only.variant),
        _ => format!("The {prefix} {kind}"),
    }
}

/// Faction name not already used by a living faction.
///
/// After a few collisions the last draw gets the lowest free ordinal
/// ("The Ash Raiders 2").
pub fn generate_unique_faction_name(
    world: &World,
    definition: &DefinitionRecord,
    rng: &mut dyn RngCore,
) -> String {
    let is_taken = |name: &str| world.factions.values().any(|f| !f.defeated && f.name == name);

    let mut name = generate_faction_name(definition, rng);
    for _ in 1..5 {
        if !is_taken(&name) {
            return name;
        }
        name = generate_faction_name(definition, rng);
    }
    if !is_taken(&name) {
        return name;
    }
    (2..=world.factions.len() + 1)
        .map(|n| format!("{name} {n}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{VariantChance, VariantOverlay, VariantRecord};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn pirate() -> DefinitionRecord {
        DefinitionRecord {
            permanent_enemy: true,
            natural_enemy: true,
            ..DefinitionRecord::new("Pirate", "Pirate")
        }
    }

    #[test]
    fn noun_follows_enemy_flags() {
        let mut rng = SmallRng::seed_from_u64(42);
        let rough = DefinitionRecord {
            natural_enemy: true,
            ..DefinitionRecord::new("TribeSavage", "Tribal")
        };
        let civil = DefinitionRecord::new("OutlanderCivil", "Outlander");

        for _ in 0..10 {
            let name = generate_faction_name(&pirate(), &mut rng);
            assert!(RAIDER_KINDS.iter().any(|k| name.ends_with(k)), "{name}");
            let name = generate_faction_name(&rough, &mut rng);
            assert!(WARBAND_KINDS.iter().any(|k| name.ends_with(k)), "{name}");
            let name = generate_faction_name(&civil, &mut rng);
            assert!(CIVIL_KINDS.iter().any(|k| name.ends_with(k)), "{name}");
        }
    }

    #[test]
    fn variant_definition_names_its_variant() {
        let mut rng = SmallRng::seed_from_u64(7);
        let genie = pirate().with_variant(&VariantRecord::new("Genie"), 1);
        let name = generate_faction_name(&genie, &mut rng);
        assert!(name.starts_with("The "));
        assert_eq!(name.split_whitespace().nth(2), Some("Genie"), "{name}");
        assert_eq!(name.split_whitespace().count(), 4);
    }

    #[test]
    fn mixed_overlay_names_like_baseline() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mixed = DefinitionRecord {
            overlay: Some(VariantOverlay::new(vec![
                VariantChance {
                    variant: "Genie".into(),
                    weight: 0.2,
                },
                VariantChance {
                    variant: "Hussar".into(),
                    weight: 0.2,
                },
            ])),
            ..pirate()
        };
        let name = generate_faction_name(&mixed, &mut rng);
        assert_eq!(name.split_whitespace().count(), 3, "{name}");
    }

    #[test]
    fn deterministic() {
        let mut rng1 = SmallRng::seed_from_u64(123);
        let mut rng2 = SmallRng::seed_from_u64(123);
        assert_eq!(
            generate_faction_name(&pirate(), &mut rng1),
            generate_faction_name(&pirate(), &mut rng2)
        );
    }

    #[test]
    fn unique_name_avoids_living_factions() {
        // Five raider nouns and 21 prefixes: collisions are certain well
        // before 150 names, so the ordinal fallback gets exercised.
        let mut world = World::new(1);
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..150 {
            let name = generate_unique_faction_name(&world, &pirate(), &mut rng);
            assert!(
                world.factions.values().all(|f| f.name != name),
                "duplicate name {name}"
            );
            world.spawn_faction(name, pirate());
        }
    }

    #[test]
    fn defeated_names_are_reusable() {
        let mut world = World::new(1);
        let mut rng = SmallRng::seed_from_u64(9);
        let name = generate_faction_name(&pirate(), &mut SmallRng::seed_from_u64(9));
        let id = world.spawn_faction(name.clone(), pirate());
        world.faction_mut(id).unwrap().defeated = true;
        assert_eq!(generate_unique_faction_name(&world, &pirate(), &mut rng), name);
    }
}

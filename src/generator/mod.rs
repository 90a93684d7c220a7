//! Constrained random selection of faction definitions and the replacement
//! of placeholder factions in the live world.

pub mod names;

use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::error::{Error, Result};
use crate::filter::{DefinitionFilter, filter_definitions};
use crate::model::{
    DefinitionRecord, FactionEntity, FactionId, RANDOM_CATEGORY, RelationRecord, World,
};
use crate::registry::DefinitionRegistry;
use crate::rng::{generator_seed, make_rng};
use crate::store::SyncStore;

/// Draw attempts before the population cap is given up on.
pub const DRAW_ATTEMPTS: usize = 31;

/// Which replacement rule a placeholder definition asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    /// Any non-hidden faction.
    Any,
    /// A permanent enemy.
    Enemy,
    /// A natural, but not permanent, enemy.
    Rough,
    /// Neither kind of enemy.
    Neutral,
}

impl PlaceholderKind {
    pub const ALL: [PlaceholderKind; 4] = [Self::Any, Self::Enemy, Self::Rough, Self::Neutral];

    pub fn definition_key(&self) -> &'static str {
        match self {
            Self::Any => "RF_RandomFaction",
            Self::Enemy => "RF_RandomPirateFaction",
            Self::Rough => "RF_RandomRoughFaction",
            Self::Neutral => "RF_RandomTradeFaction",
        }
    }

    /// Case-insensitive lookup by placeholder definition key.
    pub fn from_definition_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.definition_key().eq_ignore_ascii_case(key))
    }

    /// Filter chain applied to the store snapshot for this kind.
    pub fn filters(&self) -> Vec<DefinitionFilter> {
        let mut filters = vec![
            DefinitionFilter::IsPlayer { exclude: true },
            DefinitionFilter::IsHidden { exclude: true },
        ];
        match self {
            Self::Any => {
                filters.push(DefinitionFilter::category_tag(RANDOM_CATEGORY, true));
            }
            Self::Enemy => {
                filters.push(DefinitionFilter::category_tag(RANDOM_CATEGORY, true));
                filters.push(DefinitionFilter::IsPermanentEnemy { exclude: false });
            }
            Self::Rough => {
                filters.push(DefinitionFilter::category_tag(RANDOM_CATEGORY, true));
                filters.push(DefinitionFilter::IsPermanentEnemy { exclude: true });
                filters.push(DefinitionFilter::IsNaturalEnemy { exclude: false });
            }
            Self::Neutral => {
                filters.push(DefinitionFilter::IsPermanentEnemy { exclude: true });
                filters.push(DefinitionFilter::IsNaturalEnemy { exclude: true });
            }
        }
        filters
    }
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Any => "any",
            Self::Enemy => "enemy",
            Self::Rough => "rough",
            Self::Neutral => "neutral",
        })
    }
}

/// Outcome of a placeholder sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// (placeholder, replacement) pairs in sweep order.
    pub replaced: Vec<(FactionId, FactionId)>,
    /// Placeholders left in place after an error.
    pub skipped: Vec<FactionId>,
}

/// Draws and instantiates factions against a store's snapshot.
///
/// Borrows the store and registry for its lifetime; the host builds one per
/// sweep. Owns its own PRNG, seeded one scramble away from the world seed.
pub struct FactionGenerator<'a> {
    store: &'a mut SyncStore,
    registry: &'a mut dyn DefinitionRegistry,
    rng: SmallRng,
}

impl<'a> FactionGenerator<'a> {
    pub fn new(
        store: &'a mut SyncStore,
        registry: &'a mut dyn DefinitionRegistry,
        world_seed: i32,
    ) -> Self {
        tracing::trace!(world_seed, "faction generator constructed");
        Self {
            store,
            registry,
            rng: make_rng(generator_seed(world_seed)),
        }
    }

    /// The store snapshot narrowed by `kind`'s filter chain.
    pub fn candidates(&mut self, kind: PlaceholderKind) -> Vec<DefinitionRecord> {
        let definitions = self.store.definitions(&mut *self.registry);
        filter_definitions(definitions, &kind.filters())
    }

    /// Pick a definition, preferring ones still under their population cap.
    ///
    /// After [`DRAW_ATTEMPTS`] over-cap picks the last one is accepted anyway.
    /// A mostly-baseline pick may then be swapped for a derived variant.
    pub fn draw_definition<'f>(
        &mut self,
        candidates: &[DefinitionRecord],
        existing: impl IntoIterator<Item = &'f FactionEntity>,
    ) -> Result<DefinitionRecord> {
        if candidates.is_empty() {
            return Err(Error::EmptyCandidateSet);
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for faction in existing {
            *counts.entry(faction.definition_key()).or_default() += 1;
        }

        let mut attempts = 0;
        let chosen = loop {
            attempts += 1;
            let pick = &candidates[self.rng.random_range(0..candidates.len())];
            let count = counts.get(pick.key.as_str()).copied().unwrap_or(0);
            if pick.under_population_cap(count) {
                break pick;
            }
            if attempts == DRAW_ATTEMPTS {
                tracing::debug!(
                    key = %pick.key,
                    cap = pick.max_count_at_game_start,
                    count,
                    "population cap exhausted; keeping last draw"
                );
                break pick;
            }
        };

        let mut chosen = chosen.clone();
        if chosen.is_variant_conversion_candidate()
            && self.rng.random_range(0..100) < self.store.variant_conversion_percent()
        {
            chosen = self.store.derive(&chosen, &mut *self.registry);
        }
        Ok(chosen)
    }

    /// Build a faction from `definition` with relations toward every
    /// non-player faction in `world`. The faction is not added to the world.
    ///
    /// Each relation takes the more hostile of the two sides' defaults.
    pub fn instantiate(
        &mut self,
        definition: DefinitionRecord,
        world: &mut World,
    ) -> FactionEntity {
        let id = world.next_faction_id();
        let name = names::generate_unique_faction_name(world, &definition, &mut self.rng);
        let offered = definition.default_goodwill();
        let mut faction = FactionEntity::new(id, name, definition);

        for other in world.factions.values().filter(|f| !f.is_player()) {
            let goodwill = offered.min(other.default_goodwill());
            faction.set_relation(RelationRecord::from_goodwill(other.id, goodwill));
        }
        faction
    }

    /// Draw and instantiate a faction of the given kind.
    pub fn random_faction(
        &mut self,
        kind: PlaceholderKind,
        world: &mut World,
    ) -> Result<FactionEntity> {
        let candidates = self.candidates(kind);
        let definition = self.draw_definition(&candidates, world.factions.values())?;
        Ok(self.instantiate(definition, world))
    }

    pub fn random_npc_faction(&mut self, world: &mut World) -> Result<FactionEntity> {
        self.random_faction(PlaceholderKind::Any, world)
    }

    pub fn random_enemy_faction(&mut self, world: &mut World) -> Result<FactionEntity> {
        self.random_faction(PlaceholderKind::Enemy, world)
    }

    pub fn random_rough_faction(&mut self, world: &mut World) -> Result<FactionEntity> {
        self.random_faction(PlaceholderKind::Rough, world)
    }

    pub fn random_neutral_faction(&mut self, world: &mut World) -> Result<FactionEntity> {
        self.random_faction(PlaceholderKind::Neutral, world)
    }

    /// Replace `old` with a freshly drawn faction of `kind`. Returns the new ID.
    pub fn replace_with_random(
        &mut self,
        kind: PlaceholderKind,
        old: FactionId,
        world: &mut World,
    ) -> Result<FactionId> {
        if world.faction(old).is_none() {
            return Err(Error::UnknownFaction(old));
        }
        let replacement = self.random_faction(kind, world)?;
        replace_faction(world, old, replacement)
    }

    /// Replace every live placeholder faction in `world`.
    ///
    /// Failures are logged and leave that placeholder in place; the sweep
    /// carries on with the rest.
    pub fn replace_placeholders(&mut self, world: &mut World) -> SweepReport {
        let mut report = SweepReport::default();
        for id in world.placeholder_factions() {
            let Some(key) = world.faction(id).map(|f| f.definition_key().to_string()) else {
                continue;
            };
            let result = match PlaceholderKind::from_definition_key(&key) {
                Some(kind) => self.replace_with_random(kind, id, world),
                None => Err(Error::UnrecognizedPlaceholderKind { key }),
            };
            match result {
                Ok(new_id) => report.replaced.push((id, new_id)),
                Err(err) => {
                    tracing::warn!(
                        faction = %id,
                        error = %err,
                        "cannot replace placeholder faction"
                    );
                    report.skipped.push(id);
                }
            }
        }
        report
    }
}

/// Hand `old`'s place in the world to `new`.
///
/// Every non-player faction's relation toward `old` is reset to neutral with
/// zero goodwill, `old`'s settlements move to `new`, `old` is marked
/// defeated, and `new` joins the population. `old` stays in the world.
pub fn replace_faction(
    world: &mut World,
    old: FactionId,
    mut new: FactionEntity,
) -> Result<FactionId> {
    let Some(old_faction) = world.faction(old) else {
        return Err(Error::UnknownFaction(old));
    };
    tracing::info!(
        old = %old_faction.name,
        old_key = %old_faction.definition_key(),
        new = %new.name,
        new_key = %new.definition_key(),
        "replacing faction"
    );

    for faction in world.factions.values_mut() {
        if faction.is_player() || faction.id == old {
            continue;
        }
        faction.set_relation(RelationRecord::neutral(old));
    }
    new.set_relation(RelationRecord::neutral(old));

    let new_id = new.id;
    for settlement in world.settlements.iter_mut().filter(|s| s.owner == old) {
        settlement.owner = new_id;
    }
    if let Some(old_faction) = world.faction_mut(old) {
        old_faction.defeated = true;
    }
    world.add_faction(new);
    Ok(new_id)
}

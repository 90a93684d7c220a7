//! World-scoped snapshot of faction and variant definitions.
//!
//! The store captures the eligible definitions once per world, puts back any
//! that the registry lost between sessions, and derives single-variant copies
//! of base definitions on demand. Its PRNG is seeded from the world seed and
//! is never saved, so a reloaded session restarts the derivation stream.

use rand::Rng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_VARIANT_CONVERSION_PERCENT;
use crate::model::definition::key_list;
use crate::model::{DefinitionRecord, VariantRecord};
use crate::registry::DefinitionRegistry;
use crate::rng::{make_rng, store_seed};

/// The part of the store that is written to the save file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    pub initialized: bool,
    pub variant_conversion_percent: u8,
    pub world_definitions: Vec<DefinitionRecord>,
    pub world_variants: Vec<VariantRecord>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            initialized: false,
            variant_conversion_percent: DEFAULT_VARIANT_CONVERSION_PERCENT,
            world_definitions: Vec::new(),
            world_variants: Vec::new(),
        }
    }
}

pub struct SyncStore {
    state: StoreState,
    /// Set by the first `synchronize` of a session. Never persisted.
    reconciled: bool,
    /// Registry contents seen by the first `synchronize`, before any repair
    /// or derivation touched the registry.
    registry_baseline: Vec<DefinitionRecord>,
    rng: SmallRng,
}

impl SyncStore {
    /// Fresh store for a newly created world.
    pub fn new(world_seed: i32) -> Self {
        Self::from_state(StoreState::default(), world_seed)
    }

    /// Rebuild a store from saved state. The PRNG is re-derived from the
    /// world seed and the session starts unreconciled.
    pub fn from_state(state: StoreState, world_seed: i32) -> Self {
        let seed = store_seed(world_seed);
        tracing::trace!(world_seed, seed, "seeded faction store");
        Self {
            state,
            reconciled: false,
            registry_baseline: Vec::new(),
            rng: make_rng(seed),
        }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn into_state(self) -> StoreState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    pub fn is_reconciled(&self) -> bool {
        self.reconciled
    }

    pub fn variant_conversion_percent(&self) -> u8 {
        self.state.variant_conversion_percent
    }

    pub fn set_variant_conversion_percent(&mut self, percent: u8) {
        self.state.variant_conversion_percent = percent.min(100);
    }

    /// The snapshot as it stands, without reconciling first.
    pub fn world_definitions(&self) -> &[DefinitionRecord] {
        &self.state.world_definitions
    }

    pub fn world_variants(&self) -> &[VariantRecord] {
        &self.state.world_variants
    }

    /// Registry contents from before this session's first reconcile. Empty
    /// until `synchronize` has run.
    pub fn registry_baseline(&self) -> &[DefinitionRecord] {
        &self.registry_baseline
    }

    /// Capture eligible definitions and all variants from the registry.
    /// Only the first call does anything.
    pub fn initialize(&mut self, registry: &dyn DefinitionRegistry) {
        if self.state.initialized {
            return;
        }
        self.state.initialized = true;

        self.state.world_definitions = registry
            .all_records()
            .filter(|def| !def.is_random_placeholder() && !def.is_player)
            .cloned()
            .collect();
        self.state.world_variants = registry.all_variants().cloned().collect();

        tracing::trace!(
            definitions = %key_list(self.state.world_definitions.iter().map(|d| d.key.as_str())),
            variants = %key_list(self.state.world_variants.iter().map(|v| v.key.as_str())),
            percent = self.state.variant_conversion_percent,
            "initialized world definitions"
        );
    }

    /// Make sure every snapshot record is resolvable in the registry.
    ///
    /// Runs once per session; later calls return 0 without touching the
    /// registry. Returns how many records were put back.
    pub fn synchronize(&mut self, registry: &mut dyn DefinitionRegistry) -> usize {
        self.initialize(registry);
        if self.reconciled {
            return 0;
        }
        self.reconciled = true;
        self.registry_baseline = registry.all_records().cloned().collect();

        let mut restored = 0;
        for def in &self.state.world_definitions {
            if !registry.contains(&def.key) {
                tracing::debug!(key = %def.key, "restoring definition missing from registry");
                registry.add(def.clone());
                restored += 1;
            }
        }

        tracing::trace!(
            restored,
            world = %key_list(self.state.world_definitions.iter().map(|d| d.key.as_str())),
            registry = %key_list(registry.all_records().map(|d| d.key.as_str())),
            "synchronized faction definitions"
        );
        restored
    }

    /// Synchronize, then hand out the snapshot.
    pub fn definitions(&mut self, registry: &mut dyn DefinitionRegistry) -> &[DefinitionRecord] {
        self.synchronize(registry);
        &self.state.world_definitions
    }

    /// Derive a single-variant copy of `base` using a randomly chosen variant.
    ///
    /// Player definitions come back unchanged, as does everything when the
    /// world has no variants. A derived key already in the snapshot returns
    /// the stored record instead of a duplicate.
    pub fn derive(
        &mut self,
        base: &DefinitionRecord,
        registry: &mut dyn DefinitionRegistry,
    ) -> DefinitionRecord {
        self.synchronize(registry);
        if base.is_player {
            return base.clone();
        }
        let count = self.state.world_variants.len();
        if count == 0 {
            tracing::warn!(key = %base.key, "no variants available; keeping base definition");
            return base.clone();
        }

        let variant = &self.state.world_variants[self.rng.random_range(0..count)];
        let key = DefinitionRecord::derived_key(&variant.key, &base.key);
        if let Some(existing) = self.state.world_definitions.iter().find(|d| d.key == key) {
            let same_variant = matches!(
                existing.overlay.as_ref().map(|o| o.chances()),
                Some([only]) if only.variant == variant.key
            );
            if same_variant {
                tracing::debug!(%key, "variant definition already derived");
                return existing.clone();
            }
            tracing::warn!(
                %key,
                variant = %variant.key,
                base = %base.key,
                "derived key collides with an unrelated definition; keeping base"
            );
            return base.clone();
        }

        let derived = base.with_variant(variant, self.next_disambiguation_id());
        tracing::debug!(
            variant = %variant.key,
            base = %base.key,
            base_overlay = %base
                .overlay
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "N/A".to_string()),
            %key,
            "derived variant faction definition"
        );

        if !registry.contains(&key) {
            registry.add(derived.clone());
        }
        self.state.world_definitions.push(derived.clone());
        derived
    }

    fn next_disambiguation_id(&self) -> u32 {
        self.state
            .world_definitions
            .iter()
            .map(|d| d.disambiguation_id)
            .max()
            .unwrap_or(0)
            + 1
    }
}

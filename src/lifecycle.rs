//! Host-facing entry points: the lifecycle signals the crate reacts to.

use crate::config::GenerationConfig;
use crate::generator::{FactionGenerator, SweepReport};
use crate::model::{DefinitionRecord, World};
use crate::registry::DefinitionRegistry;
use crate::store::SyncStore;

/// Signals the host raises as the player moves between scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleSignal {
    /// A world finished loading (new or from a save).
    WorldLoaded,
    /// The player left the world for a non-world scene such as the main menu.
    ReturnedToMenu,
}

/// Reacts to lifecycle signals on behalf of the host.
#[derive(Debug, Clone, Default)]
pub struct RandomFactions {
    config: GenerationConfig,
    /// Registry contents from before the first world load; restored on exit.
    default_definitions: Option<Vec<DefinitionRecord>>,
}

impl RandomFactions {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            default_definitions: None,
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GenerationConfig) {
        self.config = config;
    }

    /// Dispatch one signal. Returns the sweep report for `WorldLoaded`.
    ///
    /// `WorldLoaded` without a world is logged and ignored.
    pub fn handle(
        &mut self,
        signal: LifecycleSignal,
        world: Option<&mut World>,
        registry: &mut dyn DefinitionRegistry,
    ) -> Option<SweepReport> {
        match signal {
            LifecycleSignal::WorldLoaded => match world {
                Some(world) => Some(self.on_world_loaded(world, registry)),
                None => {
                    tracing::warn!("world loaded signal without a world");
                    None
                }
            },
            LifecycleSignal::ReturnedToMenu => {
                self.on_returned_to_menu(registry);
                None
            }
        }
    }

    /// Load or create the world's store, reconcile it with the registry, and
    /// replace every live placeholder faction. The store state is written
    /// back into `world` for the next save.
    pub fn on_world_loaded(
        &mut self,
        world: &mut World,
        registry: &mut dyn DefinitionRegistry,
    ) -> SweepReport {
        tracing::info!("world loaded; applying random faction rules");
        let seed = world.constant_seed;

        // A previous world's derived records must not reach this world's snapshot.
        if let Some(defaults) = &self.default_definitions {
            restore_definitions(defaults, registry);
        }

        let mut store = match world.faction_store.take() {
            Some(state) => {
                tracing::trace!("loaded faction store from world");
                SyncStore::from_state(state, seed)
            }
            None => {
                tracing::trace!("no faction store in world; creating one");
                SyncStore::new(seed)
            }
        };
        store.set_variant_conversion_percent(self.config.effective_percent());
        store.synchronize(registry);

        if self.default_definitions.is_none() {
            self.default_definitions = Some(store.registry_baseline().to_vec());
        }

        let report =
            FactionGenerator::new(&mut store, registry, seed).replace_placeholders(world);
        world.faction_store = Some(store.into_state());

        tracing::info!(
            replaced = report.replaced.len(),
            skipped = report.skipped.len(),
            "random faction generation complete"
        );
        report
    }

    /// Put the registry back the way it was before any world touched it.
    /// Returns false when there was nothing to restore.
    pub fn on_returned_to_menu(&mut self, registry: &mut dyn DefinitionRegistry) -> bool {
        let Some(defaults) = self.default_definitions.take() else {
            return false;
        };
        restore_definitions(&defaults, registry);
        true
    }
}

fn restore_definitions(defaults: &[DefinitionRecord], registry: &mut dyn DefinitionRegistry) {
    tracing::debug!(count = defaults.len(), "restoring default faction definitions");
    registry.clear();
    for def in defaults {
        registry.add(def.clone());
    }
}

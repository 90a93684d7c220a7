pub mod config;
pub mod ecs;
pub mod error;
pub mod filter;
pub mod generator;
pub mod id;
pub mod lifecycle;
pub mod model;
pub mod registry;
pub mod rng;
pub mod save;
pub mod store;

pub use config::GenerationConfig;
pub use error::{Error, Result};
pub use filter::{DefinitionFilter, Filter, filter_definitions};
pub use generator::{FactionGenerator, PlaceholderKind, SweepReport, replace_faction};
pub use id::IdGenerator;
pub use lifecycle::{LifecycleSignal, RandomFactions};
pub use model::{
    DefinitionRecord, Disposition, FactionEntity, FactionId, RelationRecord, Settlement,
    VariantChance, VariantOverlay, VariantRecord, World,
};
pub use registry::{DefinitionRegistry, InMemoryRegistry};
pub use store::{StoreState, SyncStore};

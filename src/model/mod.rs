#[macro_use]
mod macros;

pub mod definition;
pub mod faction;
pub mod world;

pub use definition::{
    DefinitionRecord, RANDOM_CATEGORY, VariantChance, VariantOverlay, VariantRecord,
    is_random_category,
};
pub use faction::{Disposition, FactionEntity, FactionId, RelationRecord, Settlement};
pub use world::World;

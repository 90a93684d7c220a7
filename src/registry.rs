use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{DefinitionRecord, VariantRecord};

/// Keyed catalog of definitions the wider simulation resolves keys against.
///
/// The host owns it and hands it to the store and generator for each
/// operation. Keys are unique; `add` ignores a record whose key is already
/// present and reports that by returning `false`.
pub trait DefinitionRegistry {
    fn add(&mut self, record: DefinitionRecord) -> bool;

    /// Remove every faction definition. Variants are left alone.
    fn clear(&mut self);

    fn all_records(&self) -> Box<dyn Iterator<Item = &DefinitionRecord> + '_>;

    fn get(&self, key: &str) -> Option<&DefinitionRecord>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn add_variant(&mut self, variant: VariantRecord) -> bool;

    fn all_variants(&self) -> Box<dyn Iterator<Item = &VariantRecord> + '_>;
}

/// Insertion-ordered in-process registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryRegistry {
    definitions: IndexMap<String, DefinitionRecord>,
    variants: IndexMap<String, VariantRecord>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_definitions(definitions: impl IntoIterator<Item = DefinitionRecord>) -> Self {
        let mut registry = Self::new();
        for def in definitions {
            registry.add(def);
        }
        registry
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }
}

impl DefinitionRegistry for InMemoryRegistry {
    fn add(&mut self, record: DefinitionRecord) -> bool {
        if self.definitions.contains_key(&record.key) {
            tracing::warn!(key = %record.key, "duplicate definition ignored");
            return false;
        }
        self.definitions.insert(record.key.clone(), record);
        true
    }

    fn clear(&mut self) {
        self.definitions.clear();
    }

    fn all_records(&self) -> Box<dyn Iterator<Item = &DefinitionRecord> + '_> {
        Box::new(self.definitions.values())
    }

    fn get(&self, key: &str) -> Option<&DefinitionRecord> {
        self.definitions.get(key)
    }

    fn add_variant(&mut self, variant: VariantRecord) -> bool {
        if self.variants.contains_key(&variant.key) {
            return false;
        }
        self.variants.insert(variant.key.clone(), variant);
        true
    }

    fn all_variants(&self) -> Box<dyn Iterator<Item = &VariantRecord> + '_> {
        Box::new(self.variants.values())
    }
}

use crate::{project, Item, LookupStore, PrimaryKey, StoreError};
use async_trait::async_trait;
use indexmap::IndexMap;
use models::FieldValue;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// In-process lookup store.
///
/// An item matches a key when every key attribute matches: text against an
/// equal JSON string, `null` against an explicit JSON null, and a missing
/// field against an item that lacks the attribute.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<IndexMap<String, Vec<Item>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a fixture file shaped as `{ "<collection>": [ {item}, ... ] }`.
    pub fn from_fixture_file(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        Self::from_fixture_str(&content)
    }

    pub fn from_fixture_str(content: &str) -> Result<Self, StoreError> {
        let collections: IndexMap<String, Vec<Item>> = serde_json::from_str(content)?;
        Ok(MemoryStore {
            collections: Arc::new(RwLock::new(collections)),
        })
    }

    pub fn insert(&self, collection: &str, item: Item) -> Result<(), StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(item);
        Ok(())
    }

    /// Insert a JSON object literal; non-objects are rejected.
    pub fn insert_json(&self, collection: &str, item: Value) -> Result<(), StoreError> {
        match item {
            Value::Object(item) => self.insert(collection, item),
            other => Err(StoreError::InvalidConfig(format!(
                "items must be JSON objects, got {}",
                other
            ))),
        }
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

fn attribute_matches(item: &Item, attribute: &str, expected: &FieldValue) -> bool {
    match (expected, item.get(attribute)) {
        (FieldValue::Text(s), Some(Value::String(actual))) => s == actual,
        (FieldValue::Null, Some(Value::Null)) => true,
        (FieldValue::Absent, None) => true,
        _ => false,
    }
}

fn key_matches(item: &Item, key: &PrimaryKey) -> bool {
    key.iter()
        .all(|(attribute, expected)| attribute_matches(item, attribute, expected))
}

#[async_trait]
impl LookupStore for MemoryStore {
    async fn get(
        &self,
        collection: &str,
        key: &PrimaryKey,
        projection: &[String],
    ) -> Result<Option<Item>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;

        let found = collections
            .get(collection)
            .and_then(|items| items.iter().find(|item| key_matches(item, key)))
            .map(|item| project(item, projection));

        logging::debug(&format!(
            "memory store: {} lookup in '{}' -> {}",
            serde_json::to_string(key).unwrap_or_default(),
            collection,
            if found.is_some() { "hit" } else { "miss" }
        ));

        Ok(found)
    }
}

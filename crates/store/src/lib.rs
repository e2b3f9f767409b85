// store crate

pub mod config;
pub mod dynamo;
pub mod memory;

use async_trait::async_trait;
use indexmap::IndexMap;
use models::FieldValue;
use serde::Serialize;
use thiserror::Error;

pub use config::{Credentials, StoreConfig};
pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

/// A stored item: attribute name -> JSON value.
pub type Item = serde_json::Map<String, serde_json::Value>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Lookup request failed: {0}")]
    Request(String),

    #[error("Store service error: {code} - {message}")]
    Service { code: String, message: String },

    #[error("Failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),
}

/// Primary key of a point lookup, attribute name -> value.
///
/// Values keep the record's null/absent distinction so a lookup for a
/// missing field can still be issued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PrimaryKey(IndexMap<String, FieldValue>);

impl PrimaryKey {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.0.insert(attribute.into(), value.into());
        self
    }

    pub fn get(&self, attribute: &str) -> Option<&FieldValue> {
        self.0.get(attribute)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Point lookups against named collections.
///
/// `projection` names the attributes to return; an empty projection returns
/// the whole item. A matched item whose projection is empty is returned as
/// `Some(empty)` and callers treat it the same as `None`.
#[async_trait]
pub trait LookupStore: Send + Sync {
    async fn get(
        &self,
        collection: &str,
        key: &PrimaryKey,
        projection: &[String],
    ) -> Result<Option<Item>, StoreError>;
}

/// Restrict an item to the projected attributes.
pub(crate) fn project(item: &Item, projection: &[String]) -> Item {
    if projection.is_empty() {
        return item.clone();
    }
    projection
        .iter()
        .filter_map(|attr| item.get(attr).map(|v| (attr.clone(), v.clone())))
        .collect()
}

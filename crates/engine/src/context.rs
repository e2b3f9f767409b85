use crate::ValidationEngine;
use models::{Record, RuleSpecMap, ValidationResult};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use store::{DynamoStore, LookupStore, StoreConfig};
use validators::{ConfigError, RuleRegistry, ValidationError};

// Process-wide engine, set exactly once by `init`
static ENGINE: OnceCell<ValidationEngine> = OnceCell::new();

/// Connect the process-wide engine to DynamoDB.
///
/// Must be called once before [`validate`]; a second call fails with
/// [`ConfigError::AlreadyInitialized`] and leaves the first engine in place.
pub fn init(config: StoreConfig) -> Result<(), ValidationError> {
    logging::info(&format!(
        "Initializing DynamoDB lookup store in {}{}",
        config.region,
        config
            .endpoint
            .as_deref()
            .map(|e| format!(" at {}", e))
            .unwrap_or_default()
    ));
    let store = DynamoStore::new(config)?;
    init_with_store(Arc::new(store))?;
    Ok(())
}

/// Like [`init`], with any store implementation.
pub fn init_with_store(store: Arc<dyn LookupStore>) -> Result<(), ConfigError> {
    let engine = ValidationEngine::new(RuleRegistry::with_builtins()).with_store(store);
    ENGINE.set(engine).map_err(|_| {
        logging::warning("Lookup store already initialized, ignoring second init");
        ConfigError::AlreadyInitialized
    })
}

pub fn is_initialized() -> bool {
    ENGINE.get().is_some()
}

/// The process-wide engine, once initialized.
pub fn engine() -> Result<&'static ValidationEngine, ConfigError> {
    ENGINE.get().ok_or(ConfigError::NotInitialized)
}

/// Validate with the process-wide engine.
pub async fn validate(
    record: &Record,
    rules: &RuleSpecMap,
) -> Result<ValidationResult, ValidationError> {
    engine()?.validate(record, rules).await
}

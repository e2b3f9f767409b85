// The process-wide engine can only be initialized once per test binary, so
// the whole lifecycle is exercised in a single test.

use models::{Record, RuleSpecMap};
use serde_json::json;
use std::sync::Arc;
use store::MemoryStore;
use validators::{ConfigError, ValidationError};

#[tokio::test]
async fn test_init_lifecycle() {
    let mut rules = RuleSpecMap::new();
    rules.insert("email".to_string(), "required|email".to_string());
    let record = Record::new().with("email", "a@b.com");

    // Before init
    assert!(!engine::is_initialized());
    let err = engine::validate(&record, &rules).await.unwrap_err();
    assert!(matches!(
        err,
        ValidationError::Config(ConfigError::NotInitialized)
    ));

    // First init wins
    let store = MemoryStore::new();
    store
        .insert_json("contacts", json!({"email": "taken@b.com"}))
        .unwrap();
    engine::init_with_store(Arc::new(store)).unwrap();
    assert!(engine::is_initialized());

    // Second init is rejected
    let err = engine::init_with_store(Arc::new(MemoryStore::new())).unwrap_err();
    assert_eq!(err, ConfigError::AlreadyInitialized);

    let result = engine::validate(&record, &rules).await.unwrap();
    assert!(result.valid);

    // The store from the first init is the one in use
    rules.insert("email".to_string(), "unique:contacts,email".to_string());
    let record = Record::new().with("email", "taken@b.com");
    let result = engine::validate(&record, &rules).await.unwrap();
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].error, "The email attribute already exists.");
}

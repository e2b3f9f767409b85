use async_trait::async_trait;
use engine::ValidationEngine;
use futures::future::join_all;
use models::{FieldValue, Record, RuleSpecMap};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use store::{Item, LookupStore, MemoryStore, PrimaryKey, StoreError};
use validators::{ConfigError, RuleRegistry, ValidationError};

/// Counts lookups and sleeps before answering, so concurrent calls
/// interleave at every lookup.
struct SlowCounting {
    inner: MemoryStore,
    delay: Duration,
    lookups: AtomicUsize,
}

impl SlowCounting {
    fn new(inner: MemoryStore, delay: Duration) -> Self {
        SlowCounting {
            inner,
            delay,
            lookups: AtomicUsize::new(0),
        }
    }

    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LookupStore for SlowCounting {
    async fn get(
        &self,
        collection: &str,
        key: &PrimaryKey,
        projection: &[String],
    ) -> Result<Option<Item>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.inner.get(collection, key, projection).await
    }
}

/// Fails every lookup.
struct Throttled;

#[async_trait]
impl LookupStore for Throttled {
    async fn get(
        &self,
        _collection: &str,
        _key: &PrimaryKey,
        _projection: &[String],
    ) -> Result<Option<Item>, StoreError> {
        Err(StoreError::Service {
            code: "ProvisionedThroughputExceededException".to_string(),
            message: "Rate of requests exceeds the allowed throughput".to_string(),
        })
    }
}

fn contacts() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .insert_json(
            "contacts",
            json!({"tenant_id": "tenant1", "email": "a@b.com"}),
        )
        .unwrap();
    store
}

fn rules(pairs: &[(&str, &str)]) -> RuleSpecMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_exists_against_store() {
    let store = Arc::new(SlowCounting::new(contacts(), Duration::ZERO));
    let engine = ValidationEngine::default().with_store(store.clone());
    let spec = rules(&[("email", "exists:contacts,tenant1")]);

    let found = Record::new().with("email", "a@b.com");
    assert!(engine.validate(&found, &spec).await.unwrap().valid);

    let missing = Record::new().with("email", "z@b.com");
    let result = engine.validate(&missing, &spec).await.unwrap();
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].rule, "exists");
    assert_eq!(result.errors[0].key, "email");
    assert_eq!(result.errors[0].value, FieldValue::text("z@b.com"));
    assert_eq!(result.errors[0].param.as_deref(), Some("contacts,tenant1"));
    assert_eq!(result.errors[0].error, "The email does not exist.");

    assert_eq!(store.lookups(), 2);
}

#[tokio::test]
async fn test_unique_against_store() {
    let store = Arc::new(SlowCounting::new(contacts(), Duration::ZERO));
    let engine = ValidationEngine::default().with_store(store.clone());
    let spec = rules(&[("email", "unique:contacts,email")]);

    let fresh = Record::new().with("email", "new@b.com");
    assert!(engine.validate(&fresh, &spec).await.unwrap().valid);

    let taken = Record::new().with("email", "a@b.com");
    let result = engine.validate(&taken, &spec).await.unwrap();
    assert_eq!(result.errors[0].error, "The email attribute already exists.");

    assert_eq!(store.lookups(), 2);

    // Falsy values never reach the store
    for record in [
        Record::new(),
        Record::new().with_null("email"),
        Record::new().with("email", ""),
    ] {
        assert!(engine.validate(&record, &spec).await.unwrap().valid);
    }
    assert_eq!(store.lookups(), 2);
}

#[tokio::test]
async fn test_unknown_rule_aborts_before_any_lookup() {
    let store = Arc::new(SlowCounting::new(contacts(), Duration::ZERO));
    let engine = ValidationEngine::default().with_store(store.clone());
    let spec = rules(&[
        ("email", "unique:contacts,email"),
        ("name", "required|titlecase"),
    ]);

    let record = Record::new().with("email", "new@b.com").with("name", "ada");
    let err = engine.validate(&record, &spec).await.unwrap_err();
    assert!(err.is_config());
    assert_eq!(store.lookups(), 0);
}

#[tokio::test]
async fn test_malformed_lookup_parameter_aborts() {
    let engine = ValidationEngine::default().with_store(Arc::new(contacts()));
    let spec = rules(&[("email", "required|exists:contacts")]);

    let record = Record::new().with("email", "a@b.com");
    let err = engine.validate(&record, &spec).await.unwrap_err();
    match err {
        ValidationError::Config(ConfigError::MalformedParameter {
            field, rule, param, ..
        }) => {
            assert_eq!(field, "email");
            assert_eq!(rule, "exists");
            assert_eq!(param, "contacts");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_store_error_aborts_without_partial_result() {
    let engine = ValidationEngine::default().with_store(Arc::new(Throttled));
    // `required` fails before the lookup runs; the call still aborts
    let spec = rules(&[
        ("name", "required"),
        ("email", "unique:contacts,email"),
    ]);

    let record = Record::new().with("email", "a@b.com");
    let err = engine.validate(&record, &spec).await.unwrap_err();
    assert!(err.is_store());
    assert!(err.to_string().contains("ProvisionedThroughputExceededException"));
}

#[tokio::test]
async fn test_custom_rule_participates_in_dispatch() {
    use validators::{Evaluator, Outcome, RuleContext};

    struct Lowercase;

    #[async_trait]
    impl Evaluator for Lowercase {
        async fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Outcome, ValidationError> {
            match ctx.value.as_str() {
                Some(s) if s.chars().any(char::is_uppercase) => {
                    Ok(ctx.fail(format!("The {} attribute must be lowercase.", ctx.key)))
                }
                _ => Ok(Outcome::Pass),
            }
        }
    }

    let mut registry = RuleRegistry::with_builtins();
    registry.register("lowercase", Lowercase);
    let engine = ValidationEngine::new(registry);

    let record = Record::new().with("slug", "Hello");
    let result = engine
        .validate(&record, &rules(&[("slug", "required|lowercase")]))
        .await
        .unwrap();
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].rule, "lowercase");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_do_not_share_failures() {
    let store = Arc::new(SlowCounting::new(contacts(), Duration::from_millis(20)));
    let engine = Arc::new(ValidationEngine::default().with_store(store.clone()));
    let spec = Arc::new(rules(&[
        ("email", "required|email|unique:contacts,email"),
        ("name", "required|max:5"),
    ]));

    let tasks = (0..16).map(|i| {
        let engine = engine.clone();
        let spec = spec.clone();
        tokio::spawn(async move {
            // Even calls are clean, odd calls fail in two places
            let record = if i % 2 == 0 {
                Record::new()
                    .with("email", format!("user{}@b.com", i))
                    .with("name", "ada")
            } else {
                Record::new()
                    .with("email", "a@b.com")
                    .with("name", format!("too-long-{}", i))
            };
            (i, engine.validate(&record, &spec).await.unwrap())
        })
    });

    for joined in join_all(tasks).await {
        let (i, result) = joined.unwrap();
        if i % 2 == 0 {
            assert!(result.valid, "call {} picked up foreign failures", i);
        } else {
            let rules_hit: Vec<&str> = result.errors.iter().map(|f| f.rule.as_str()).collect();
            assert_eq!(rules_hit, vec!["unique", "max"], "call {}", i);
            assert_eq!(
                result.errors[1].value,
                FieldValue::text(format!("too-long-{}", i))
            );
        }
    }

    assert_eq!(store.lookups(), 16);
}

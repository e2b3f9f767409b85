//! Declarative field validation.
//!
//! ```no_run
//! use fieldcheck_lib::{init, validate, Credentials, Record, RuleSpecMap, StoreConfig};
//!
//! # async fn run() -> Result<(), fieldcheck_lib::ValidationError> {
//! init(StoreConfig::new(Credentials::new("id", "secret")))?;
//!
//! let mut rules = RuleSpecMap::new();
//! rules.insert("email".into(), "required|email|unique:contacts,email".into());
//!
//! let record = Record::new().with("email", "ada@example.com");
//! let result = validate(&record, &rules).await?;
//! for failure in &result.errors {
//!     println!("{}", failure.error);
//! }
//! # Ok(())
//! # }
//! ```

pub mod report;

pub use engine::{engine, init, init_with_store, is_initialized, validate, ValidationEngine};
pub use models::{FieldValue, Record, RuleSpecMap, ValidationFailure, ValidationResult};
pub use parser::{load_record, load_rule_spec, parse_rules, ParseError, ParsedRule};
pub use store::{
    Credentials, DynamoStore, Item, LookupStore, MemoryStore, PrimaryKey, StoreConfig, StoreError,
};
pub use validators::{
    ConfigError, Evaluator, Outcome, RuleContext, RuleRegistry, ValidationError,
};

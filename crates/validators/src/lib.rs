// validators crate

mod error;
mod registry;
pub mod rules;

use async_trait::async_trait;
use models::{FieldValue, ValidationFailure};
use store::LookupStore;

pub use error::{ConfigError, ValidationError};
pub use registry::RuleRegistry;

/// Everything an evaluator gets to see for one rule application.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    /// Name the rule was dispatched under.
    pub rule: &'a str,
    pub key: &'a str,
    pub value: &'a FieldValue,
    pub param: Option<&'a str>,
    pub store: Option<&'a dyn LookupStore>,
}

impl<'a> RuleContext<'a> {
    /// The rule parameter, or a configuration error if the rule was written
    /// without one.
    pub fn require_param(&self) -> Result<&'a str, ConfigError> {
        self.param.ok_or_else(|| ConfigError::MissingParameter {
            field: self.key.to_string(),
            rule: self.rule.to_string(),
        })
    }

    pub fn malformed(&self, reason: impl Into<String>) -> ConfigError {
        ConfigError::MalformedParameter {
            field: self.key.to_string(),
            rule: self.rule.to_string(),
            param: self.param.unwrap_or_default().to_string(),
            reason: reason.into(),
        }
    }

    pub fn require_store(&self) -> Result<&'a dyn LookupStore, ConfigError> {
        self.store.ok_or(ConfigError::NotInitialized)
    }

    /// Build the failure for this application with the given message.
    pub fn fail(&self, error: impl Into<String>) -> Outcome {
        let mut failure =
            ValidationFailure::new(self.rule, self.key, self.value.clone(), error.into());
        failure.param = self.param.map(str::to_string);
        Outcome::Fail(failure)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail(ValidationFailure),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    pub fn into_failure(self) -> Option<ValidationFailure> {
        match self {
            Outcome::Pass => None,
            Outcome::Fail(failure) => Some(failure),
        }
    }
}

/// Executable behaviour bound to a rule name.
///
/// Every evaluator is async so the engine can drive all of them the same
/// way; only the lookup rules actually suspend. A rule violation is an
/// `Ok(Outcome::Fail(..))`; `Err` is reserved for configuration and store
/// errors, which abort the whole validation call.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Outcome, ValidationError>;
}

use store::StoreError;
use thiserror::Error;

/// Mistakes in the rule configuration or engine setup, as opposed to bad
/// input data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown rule '{rule}' for field '{field}'")]
    UnknownRule { field: String, rule: String },

    #[error("Rule '{rule}' for field '{field}' requires a parameter")]
    MissingParameter { field: String, rule: String },

    #[error("Rule '{rule}' for field '{field}' has malformed parameter '{param}': {reason}")]
    MalformedParameter {
        field: String,
        rule: String,
        param: String,
        reason: String,
    },

    #[error("Lookup store is not initialized; call init() before validate()")]
    NotInitialized,

    #[error("Lookup store is already initialized")]
    AlreadyInitialized,
}

/// Anything that aborts a validation call.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ValidationError {
    pub fn is_config(&self) -> bool {
        matches!(self, ValidationError::Config(_))
    }

    pub fn is_store(&self) -> bool {
        matches!(self, ValidationError::Store(_))
    }
}

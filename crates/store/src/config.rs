use crate::StoreError;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_REGION: &str = "FIELDCHECK_REGION";
pub const ENV_ACCESS_KEY_ID: &str = "FIELDCHECK_ACCESS_KEY_ID";
pub const ENV_SECRET_ACCESS_KEY: &str = "FIELDCHECK_SECRET_ACCESS_KEY";
pub const ENV_ENDPOINT: &str = "FIELDCHECK_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "FIELDCHECK_TIMEOUT_SECS";

// Standard AWS variables, read when the fieldcheck ones are unset
const AWS_REGION: &str = "AWS_REGION";
const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Credentials {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }
}

// Never print the secret
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .finish()
    }
}

/// Connection parameters for the DynamoDB lookup store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub region: String,
    pub credentials: Credentials,
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(credentials: Credentials) -> Self {
        StoreConfig {
            region: DEFAULT_REGION.to_string(),
            credentials,
            endpoint: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let access_key_id = get(ENV_ACCESS_KEY_ID)
            .or_else(|| get(AWS_ACCESS_KEY_ID))
            .ok_or_else(|| {
                StoreError::InvalidConfig(format!("{} is not set", ENV_ACCESS_KEY_ID))
            })?;
        let secret_access_key = get(ENV_SECRET_ACCESS_KEY)
            .or_else(|| get(AWS_SECRET_ACCESS_KEY))
            .ok_or_else(|| {
                StoreError::InvalidConfig(format!("{} is not set", ENV_SECRET_ACCESS_KEY))
            })?;

        let mut config = StoreConfig::new(Credentials::new(access_key_id, secret_access_key));

        if let Some(region) = get(ENV_REGION).or_else(|| get(AWS_REGION)) {
            config.region = region;
        }
        config.endpoint = get(ENV_ENDPOINT);

        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.parse().map_err(|_| {
                StoreError::InvalidConfig(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, secs
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

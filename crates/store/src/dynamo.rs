use crate::{Item, LookupStore, PrimaryKey, StoreConfig, StoreError};
use async_trait::async_trait;
use aws_credential_types::Credentials as AwsCredentials;
use aws_sdk_dynamodb::config::timeout::TimeoutConfig;
use aws_sdk_dynamodb::config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use models::FieldValue;
use serde_json::{Number, Value};
use std::collections::HashMap;

const PROVIDER_NAME: &str = "fieldcheck";

/// Lookup store backed by DynamoDB.
///
/// Collections are tables and every lookup is a single `GetItem` with the
/// projection sent as `AttributesToGet`. Credentials are static, taken from
/// the config; the regional endpoint is used unless one is configured.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    config: StoreConfig,
}

impl DynamoStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let credentials = &config.credentials;
        if credentials.access_key_id.is_empty() || credentials.secret_access_key.is_empty() {
            return Err(StoreError::InvalidConfig(
                "access key id and secret access key must not be empty".to_string(),
            ));
        }

        let provider = AwsCredentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            PROVIDER_NAME,
        );

        let mut builder = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(provider)
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(config.timeout)
                    .build(),
            );
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint.clone());
        }

        Ok(DynamoStore {
            client: Client::from_conf(builder.build()),
            config,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

// Key attributes must be strings, numbers or binary, so a key with a null
// or missing attribute can never match an item.
fn key_attributes(key: &PrimaryKey) -> Option<HashMap<String, AttributeValue>> {
    key.iter()
        .map(|(attribute, value)| match value {
            FieldValue::Text(s) => Some((attribute.to_string(), AttributeValue::S(s.clone()))),
            FieldValue::Null | FieldValue::Absent => None,
        })
        .collect()
}

fn to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => n
            .parse::<Number>()
            .map(Value::Number)
            .unwrap_or_else(|_| Value::String(n.clone())),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(items) => Value::Array(items.iter().map(to_json).collect()),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect(),
        ),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(
            set.iter()
                .map(|n| to_json(&AttributeValue::N(n.clone())))
                .collect(),
        ),
        AttributeValue::B(blob) => {
            Value::Array(blob.as_ref().iter().map(|b| Value::from(*b)).collect())
        }
        AttributeValue::Bs(blobs) => Value::Array(
            blobs
                .iter()
                .map(|b| to_json(&AttributeValue::B(b.clone())))
                .collect(),
        ),
        _ => Value::Null,
    }
}

/// A missing item and an item with no projected attributes are both "not
/// found".
fn into_item(attributes: Option<&HashMap<String, AttributeValue>>) -> Option<Item> {
    attributes.filter(|a| !a.is_empty()).map(|a| {
        a.iter()
            .map(|(name, value)| (name.clone(), to_json(value)))
            .collect()
    })
}

fn request_error(err: SdkError<GetItemError>) -> StoreError {
    if let Some(service) = err.as_service_error() {
        return StoreError::Service {
            code: service.code().unwrap_or("Unknown").to_string(),
            message: service.message().unwrap_or_default().to_string(),
        };
    }
    StoreError::Request(DisplayErrorContext(err).to_string())
}

#[async_trait]
impl LookupStore for DynamoStore {
    async fn get(
        &self,
        collection: &str,
        key: &PrimaryKey,
        projection: &[String],
    ) -> Result<Option<Item>, StoreError> {
        let Some(key) = key_attributes(key) else {
            logging::debug(&format!(
                "dynamo store: key for '{}' has a null attribute, nothing can match",
                collection
            ));
            return Ok(None);
        };

        logging::debug(&format!("dynamo store: GetItem on '{}'", collection));

        let mut request = self
            .client
            .get_item()
            .table_name(collection)
            .set_key(Some(key));
        if !projection.is_empty() {
            request = request.set_attributes_to_get(Some(projection.to_vec()));
        }

        let output = request.send().await.map_err(request_error)?;
        Ok(into_item(output.item()))
    }
}

use indexmap::IndexMap;
use models::{Record, RuleSpecMap};
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Unsupported file format: '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    #[error("Field '{field}' has unsupported value type: {found}")]
    InvalidValue { field: String, found: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            _ => Err(ParseError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

// Both formats go through an IndexMap so the document's key order survives.
fn parse_object(content: &str, format: Format) -> Result<IndexMap<String, Value>, ParseError> {
    let object = match format {
        Format::Json => serde_json::from_str(content)?,
        Format::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(object)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse a record. Strings and nulls are kept as is, numbers and booleans
/// are converted to their string form.
pub fn parse_record(content: &str, format: Format) -> Result<Record, ParseError> {
    parse_object(content, format)?
        .into_iter()
        .map(|(field, value)| {
            let value = match value {
                Value::Null => None,
                Value::String(s) => Some(s),
                Value::Bool(b) => Some(b.to_string()),
                Value::Number(n) => Some(n.to_string()),
                other => {
                    return Err(ParseError::InvalidValue {
                        field,
                        found: type_name(&other).to_string(),
                    })
                }
            };
            Ok((field, value))
        })
        .collect()
}

/// Parse a field -> rule specification map, keeping document order.
pub fn parse_rule_spec(content: &str, format: Format) -> Result<RuleSpecMap, ParseError> {
    parse_object(content, format)?
        .into_iter()
        .map(|(field, value)| match value {
            Value::String(spec) => Ok((field, spec)),
            other => Err(ParseError::InvalidValue {
                field,
                found: type_name(&other).to_string(),
            }),
        })
        .collect()
}

pub fn load_record(path: &Path) -> Result<Record, ParseError> {
    let format = Format::from_path(path)?;
    let content = fs::read_to_string(path)?;
    parse_record(&content, format)
}

pub fn load_rule_spec(path: &Path) -> Result<RuleSpecMap, ParseError> {
    let format = Format::from_path(path)?;
    let content = fs::read_to_string(path)?;
    parse_rule_spec(&content, format)
}

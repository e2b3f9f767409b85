// models crate

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Field name -> rule specification string, e.g. `"required|max:40"`.
///
/// Fields are validated in insertion order.
pub type RuleSpecMap = IndexMap<String, String>;

/// The value of a single field as seen by a rule.
///
/// A field that is missing from the record is `Absent`, which is distinct
/// from a field that is present with an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FieldValue {
    #[default]
    Absent,
    Null,
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for anything other than `null` or a missing field.
    pub fn is_present(&self) -> bool {
        matches!(self, FieldValue::Text(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Missing, `null` and the empty string are all falsy.
    pub fn is_truthy(&self) -> bool {
        matches!(self, FieldValue::Text(s) if !s.is_empty())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent => write!(f, "undefined"),
            FieldValue::Null => write!(f, "null"),
            FieldValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(s) => FieldValue::Text(s),
            None => FieldValue::Null,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

// `Absent` and `Null` both serialize as JSON null; callers skip absent values
// with `skip_serializing_if = "FieldValue::is_absent"`.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Absent | FieldValue::Null => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer).map(FieldValue::from)
    }
}

/// A record under validation: field name -> string or `null`.
///
/// Fields that are not in the map read back as [`FieldValue::Absent`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Option<String>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn with_null(mut self, field: impl Into<String>) -> Self {
        self.insert_null(field);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), Some(value.into()));
    }

    pub fn insert_null(&mut self, field: impl Into<String>) {
        self.fields.insert(field.into(), None);
    }

    pub fn get(&self, field: &str) -> FieldValue {
        match self.fields.get(field) {
            None => FieldValue::Absent,
            Some(None) => FieldValue::Null,
            Some(Some(s)) => FieldValue::Text(s.clone()),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl FromIterator<(String, Option<String>)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}

/// One failed rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub rule: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "FieldValue::is_absent")]
    pub value: FieldValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    pub error: String,
}

impl ValidationFailure {
    pub fn new(
        rule: impl Into<String>,
        key: impl Into<String>,
        value: FieldValue,
        error: impl Into<String>,
    ) -> Self {
        ValidationFailure {
            rule: rule.into(),
            key: key.into(),
            value,
            param: None,
            error: error.into(),
        }
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }
}

/// Outcome of one `validate` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationFailure>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        ValidationResult {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn from_failures(errors: Vec<ValidationFailure>) -> Self {
        ValidationResult {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn add_failure(&mut self, failure: ValidationFailure) {
        self.valid = false;
        self.errors.push(failure);
    }

    /// Failures recorded against `key`, in evaluation order.
    pub fn errors_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ValidationFailure> {
        self.errors.iter().filter(move |f| f.key == key)
    }
}

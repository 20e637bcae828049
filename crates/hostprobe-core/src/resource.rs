//! Resource attributes attached to every emitted metric.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Resource attribute key for the host name.
pub const HOST_NAME: &str = "host.name";

/// Resource attribute key for the operating system type.
pub const OS_TYPE: &str = "os.type";

/// Schema URL of the semantic conventions used for resource keys.
pub const SCHEMA_URL: &str = "https://opentelemetry.io/schemas/1.5.0";

/// Scalar attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// String value.
    String(String),
    /// Integer value.
    Int(i64),
    /// Boolean value.
    Bool(bool),
}

impl AttributeValue {
    /// Returns the string value, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Int(_) | Self::Bool(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Identity attributes of the entity producing telemetry.
///
/// Keys are unique. [`insert`](Self::insert) never overwrites an existing
/// key; [`upsert`](Self::upsert) always does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    attributes: BTreeMap<String, AttributeValue>,
}

impl Resource {
    /// Creates an empty resource.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key` unless the key is already present.
    ///
    /// Returns true if the value was stored.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> bool {
        let key = key.into();
        if self.attributes.contains_key(&key) {
            return false;
        }
        self.attributes.insert(key, value.into());
        true
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn upsert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Returns the string value stored under `key`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttributeValue::as_str)
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true if the resource carries no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterates attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merges `other` into `self`; keys already present in `self` win.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in &other.attributes {
            self.attributes
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
}

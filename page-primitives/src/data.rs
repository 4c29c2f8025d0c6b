//! The result object handed from a page loader to the rendering layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// String-keyed data produced by a single load invocation.
///
/// A `PageData` value is created fresh per invocation, owned exclusively by
/// the caller for the duration of one request or build, and never mutated
/// after the loader returns it. It serializes to a plain JSON object, so a
/// loader returning one entry `changelog` produces `{"changelog": "..."}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageData(Map<String, Value>);

impl PageData {
    /// Creates an empty result object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a result object holding a single text field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataKey`] if the key is empty.
    pub fn from_text(key: impl Into<String>, text: impl Into<String>) -> Result<Self> {
        let mut data = Self::new();
        data.insert(key, Value::String(text.into()))?;
        Ok(data)
    }

    /// Inserts a field, returning the previous value if the key was present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataKey`] if the key is empty.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Result<Option<Value>> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::InvalidDataKey {
                reason: "key cannot be empty".into(),
            });
        }
        Ok(self.0.insert(key, value))
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the string stored under `key`, if the field exists and is a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no fields are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the field names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Consumes the object, returning the underlying JSON map.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

//! Typed access to loaded document values.

use crate::error::{Result, RosettaError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const KEY_PACKAGES: &str = "packages";
pub const KEY_CLASSES: &str = "classes";
pub const KEY_TYPES: &str = "types";

const DOCUMENT_LABEL: &str = "document";

/// A JSON object together with the label used to report errors about it.
#[derive(Debug)]
pub struct Fields<'a> {
    label: String,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn new(label: impl Into<String>, map: &'a Map<String, Value>) -> Self {
        Self {
            label: label.into(),
            map,
        }
    }

    /// Wraps the top-level value of a document.
    pub fn root(value: &'a Value) -> Result<Self> {
        Self::wrap(DOCUMENT_LABEL.to_string(), DOCUMENT_LABEL, "root", value)
    }

    /// Wraps `value`, the entry `key` of the group labeled `parent`; it must be an object.
    pub fn expect(parent: &str, key: &str, value: &'a Value) -> Result<Self> {
        Self::wrap(format!("{}[\"{}\"]", parent, key), parent, key, value)
    }

    fn wrap(label: String, parent: &str, key: &str, value: &'a Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::new(label, map)),
            _ => Err(RosettaError::ValueType {
                label: parent.to_string(),
                key: key.to_string(),
                expected: "an object",
            }),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key)
    }

    pub fn require(&self, key: &str) -> Result<&'a Value> {
        self.map.get(key).ok_or_else(|| RosettaError::MissingKey {
            label: self.label.clone(),
            key: key.to_string(),
        })
    }

    pub fn str(&self, key: &str) -> Result<Option<&'a str>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(self.wrong_type(key, "a string")),
        }
    }

    pub fn require_str(&self, key: &str) -> Result<&'a str> {
        self.str(key)?.ok_or_else(|| RosettaError::MissingKey {
            label: self.label.clone(),
            key: key.to_string(),
        })
    }

    /// Boolean flag, `false` when absent.
    pub fn flag(&self, key: &str) -> Result<bool> {
        match self.map.get(key) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(self.wrong_type(key, "a boolean")),
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool> {
        match self.map.get(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(self.wrong_type(key, "a boolean")),
        }
    }

    pub fn usize(&self, key: &str) -> Result<Option<usize>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| self.wrong_type(key, "a non-negative integer")),
        }
    }

    /// Array under `key`, empty when absent.
    pub fn array(&self, key: &str) -> Result<&'a [Value]> {
        match self.map.get(key) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(self.wrong_type(key, "an array")),
        }
    }

    pub fn object(&self, key: &str) -> Result<Option<Fields<'a>>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) => {
                Self::wrap(format!("{}.{}", self.label, key), &self.label, key, value).map(Some)
            }
        }
    }

    /// Entries of the object under `key`, each wrapped with a child label.
    pub fn entries(&self, key: &str) -> Result<Vec<(&'a str, Fields<'a>)>> {
        let Some(group) = self.object(key)? else {
            return Ok(Vec::new());
        };
        group
            .map
            .iter()
            .map(|(name, value)| {
                Fields::expect(&group.label, name, value).map(|f| (name.as_str(), f))
            })
            .collect()
    }

    pub fn wrong_type(&self, key: &str, expected: &'static str) -> RosettaError {
        RosettaError::ValueType {
            label: self.label.clone(),
            key: key.to_string(),
            expected,
        }
    }

    pub fn unknown_value(&self, key: &str, value: &str) -> RosettaError {
        RosettaError::UnknownValue {
            label: self.label.clone(),
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Rendered type dictionary of a loaded document.
#[derive(Debug, Clone, Default)]
pub struct DocumentDictionary {
    id: String,
    slots: BTreeMap<usize, Value>,
}

impl DocumentDictionary {
    /// Reads the `types` value, either an object keyed by slot index or a list.
    pub fn from_value(id: impl Into<String>, value: &Value) -> Result<Self> {
        let slots: BTreeMap<usize, Value> = match value {
            Value::Array(items) => items.iter().cloned().enumerate().collect(),
            Value::Object(map) => map
                .iter()
                .map(|(key, payload)| {
                    key.parse::<usize>()
                        .map(|slot| (slot, payload.clone()))
                        .map_err(|_| RosettaError::ValueType {
                            label: KEY_TYPES.to_string(),
                            key: key.clone(),
                            expected: "keyed by a slot index",
                        })
                })
                .collect::<Result<_>>()?,
            _ => {
                return Err(RosettaError::ValueType {
                    label: DOCUMENT_LABEL.to_string(),
                    key: KEY_TYPES.to_string(),
                    expected: "an object or an array",
                });
            }
        };
        Ok(Self {
            id: id.into(),
            slots,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, slot: usize) -> Option<&Value> {
        self.slots.get(&slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

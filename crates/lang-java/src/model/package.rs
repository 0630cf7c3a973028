use super::JavaClass;
use crate::document::{Fields, KEY_CLASSES};
use crate::error::{Result, RosettaError};
use crate::reader::PayloadReader;
use crate::serialize::SerializePass;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JavaPackage {
    pub path: String,
    /// Top-level classes by simple name
    pub classes: BTreeMap<String, JavaClass>,
}

impl JavaPackage {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            classes: BTreeMap::new(),
        }
    }

    pub fn load(path: &str, fields: &Fields<'_>, reader: &mut PayloadReader<'_>) -> Result<Self> {
        let mut package = Self::new(path);
        for (name, entry) in fields.entries(KEY_CLASSES)? {
            package.add_class(JavaClass::load(name, path, path, &entry, reader)?)?;
        }
        Ok(package)
    }

    pub fn add_class(&mut self, class: JavaClass) -> Result<()> {
        match self.classes.entry(class.name.clone()) {
            Entry::Occupied(_) => Err(RosettaError::DuplicateClass(class.fqn)),
            Entry::Vacant(slot) => {
                slot.insert(class);
                Ok(())
            }
        }
    }

    /// Finds a class by its name relative to this package, e.g. `Map.Entry`.
    pub fn class(&self, relative: &str) -> Option<&JavaClass> {
        let (top, rest) = match relative.split_once('.') {
            Some((top, rest)) => (top, Some(rest)),
            None => (relative, None),
        };
        let class = self.classes.get(top)?;
        match rest {
            Some(path) => class.nested(path),
            None => Some(class),
        }
    }

    pub fn class_mut(&mut self, relative: &str) -> Option<&mut JavaClass> {
        let (top, rest) = match relative.split_once('.') {
            Some((top, rest)) => (top, Some(rest)),
            None => (relative, None),
        };
        let class = self.classes.get_mut(top)?;
        match rest {
            Some(path) => class.nested_mut(path),
            None => Some(class),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn to_document(&self, pass: &mut SerializePass<'_>) -> Value {
        let classes: Map<String, Value> = self
            .classes
            .iter()
            .map(|(name, class)| (name.clone(), class.to_document(pass)))
            .collect();
        let mut raw = Map::new();
        raw.insert(KEY_CLASSES.into(), Value::Object(classes));
        Value::Object(raw)
    }
}

use crate::error::{Result, RosettaError};
use rosetta_api::{ClassSource, HostClass};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Serialized host environment: class descriptions plus names that resolve without one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Snapshot {
    #[serde(default)]
    pub classes: Vec<HostClass>,
    /// Types known to the host but not described, e.g. `java.lang.String`
    #[serde(default)]
    pub known_types: Vec<String>,
}

/// In-memory [`ClassSource`] backed by a [`Snapshot`].
#[derive(Debug, Default)]
pub struct SnapshotSource {
    classes: HashMap<String, HostClass>,
    known_types: HashSet<String>,
}

impl SnapshotSource {
    pub fn new(snapshot: Snapshot) -> Result<Self> {
        let mut classes = HashMap::with_capacity(snapshot.classes.len());
        for class in snapshot.classes {
            if classes.contains_key(&class.name) {
                return Err(RosettaError::DuplicateClass(class.name));
            }
            classes.insert(class.name.clone(), class);
        }
        Ok(Self {
            classes,
            known_types: snapshot.known_types.into_iter().collect(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Self::new(snapshot)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassSource for SnapshotSource {
    fn class(&self, name: &str) -> Option<&HostClass> {
        self.classes.get(name)
    }

    fn can_resolve(&self, name: &str) -> bool {
        self.classes.contains_key(name) || self.known_types.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_source() {
        let source = SnapshotSource::from_json(
            r#"{
                "classes": [{ "name": "com.example.Node", "package": "com.example" }],
                "known_types": ["java.lang.String"]
            }"#,
        )
        .unwrap();
        assert_eq!(source.len(), 1);
        assert!(source.class("com.example.Node").is_some());
        assert!(source.can_resolve("java.lang.String"));
        assert!(source.class("java.lang.String").is_none());
        assert!(!source.can_resolve("T"));
    }

    #[test]
    fn test_duplicate_class() {
        let result = SnapshotSource::from_json(
            r#"{ "classes": [
                { "name": "a.B", "package": "a" },
                { "name": "a.B", "package": "a" }
            ] }"#,
        );
        assert!(matches!(result, Err(RosettaError::DuplicateClass(name)) if name == "a.B"));
    }
}

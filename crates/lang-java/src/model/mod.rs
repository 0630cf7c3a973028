//! Document entities: packages, classes and their members.
//!
//! Every entity is built either from a host description (`from_host`) or from a loaded
//! document (`load`), and writes itself back with `to_document`.

pub mod class;
pub mod executable;
pub mod field;
pub mod package;

pub use class::JavaClass;
pub use executable::{JavaConstructor, JavaExecutable, JavaMethod, JavaParameter, JavaReturn};
pub use field::JavaField;
pub use package::JavaPackage;
pub use rosetta_api::{Modifiers, Scope};

use crate::document::Fields;
use crate::error::Result;
use rosetta_api::TypeRef;
use serde_json::{Map, Value};

pub(crate) const KEY_NAME: &str = "name";
pub(crate) const KEY_TYPE: &str = "type";
pub(crate) const KEY_SCOPE: &str = "scope";
pub(crate) const KEY_NULLABLE: &str = "nullable";
pub(crate) const KEY_NOTES: &str = "notes";
pub(crate) const KEY_TAGS: &str = "tags";
pub(crate) const KEY_DEPRECATED: &str = "deprecated";
pub(crate) const KEY_TYPE_PARAMETERS: &str = "type_parameters";
pub(crate) const KEY_STATIC: &str = "static";
pub(crate) const KEY_FINAL: &str = "final";
pub(crate) const KEY_ABSTRACT: &str = "abstract";
pub(crate) const KEY_NATIVE: &str = "native";
pub(crate) const KEY_VOLATILE: &str = "volatile";
pub(crate) const KEY_TRANSIENT: &str = "transient";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deprecation {
    Flagged,
    Message(String),
}

/// Documentation attached to classes and members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Docs {
    pub deprecated: Option<Deprecation>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

impl Docs {
    pub(crate) fn load(fields: &Fields<'_>) -> Result<Self> {
        let deprecated = match fields.get(KEY_DEPRECATED) {
            None | Some(Value::Bool(false)) => None,
            Some(Value::Bool(true)) => Some(Deprecation::Flagged),
            Some(Value::String(message)) if message.is_empty() => Some(Deprecation::Flagged),
            Some(Value::String(message)) => Some(Deprecation::Message(message.clone())),
            Some(_) => return Err(fields.wrong_type(KEY_DEPRECATED, "a boolean or a string")),
        };
        let tags = fields
            .array(KEY_TAGS)?
            .iter()
            .map(|tag| {
                tag.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| fields.wrong_type(KEY_TAGS, "a list of strings"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            deprecated,
            notes: load_notes(fields)?,
            tags,
        })
    }

    pub(crate) fn write(&self, raw: &mut Map<String, Value>) {
        match &self.deprecated {
            None => {}
            Some(Deprecation::Flagged) => {
                raw.insert(KEY_DEPRECATED.into(), Value::Bool(true));
            }
            Some(Deprecation::Message(message)) => {
                raw.insert(KEY_DEPRECATED.into(), Value::String(message.clone()));
            }
        }
        write_notes(raw, self.notes.as_deref());
        if !self.tags.is_empty() {
            raw.insert(
                KEY_TAGS.into(),
                self.tags.iter().cloned().map(Value::String).collect(),
            );
        }
    }
}

pub(crate) fn load_notes(fields: &Fields<'_>) -> Result<Option<String>> {
    Ok(fields
        .str(KEY_NOTES)?
        .filter(|notes| !notes.is_empty())
        .map(str::to_string))
}

pub(crate) fn write_notes(raw: &mut Map<String, Value>, notes: Option<&str>) {
    if let Some(notes) = notes.filter(|n| !n.is_empty()) {
        raw.insert(KEY_NOTES.into(), Value::String(notes.to_string()));
    }
}

/// Scope, `package` when absent.
pub(crate) fn load_scope(fields: &Fields<'_>) -> Result<Scope> {
    match fields.str(KEY_SCOPE)? {
        None => Ok(Scope::Package),
        Some(id) => Scope::from_id(id).ok_or_else(|| fields.unknown_value(KEY_SCOPE, id)),
    }
}

pub(crate) fn write_scope(raw: &mut Map<String, Value>, scope: Scope) {
    if scope != Scope::Package {
        raw.insert(KEY_SCOPE.into(), Value::String(scope.id().to_string()));
    }
}

pub(crate) fn write_flag(raw: &mut Map<String, Value>, key: &str, flag: bool) {
    if flag {
        raw.insert(key.into(), Value::Bool(true));
    }
}

pub(crate) fn load_modifiers(fields: &Fields<'_>) -> Result<Modifiers> {
    Ok(Modifiers {
        is_static: fields.flag(KEY_STATIC)?,
        is_final: fields.flag(KEY_FINAL)?,
        is_abstract: fields.flag(KEY_ABSTRACT)?,
        is_native: fields.flag(KEY_NATIVE)?,
        is_volatile: fields.flag(KEY_VOLATILE)?,
        is_transient: fields.flag(KEY_TRANSIENT)?,
    })
}

/// Primitive values cannot be null; arrays of them can.
pub fn default_nullable(ty: &TypeRef) -> bool {
    !ty.is_primitive() || ty.is_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_docs_round_trip() {
        let value = json!({ "deprecated": "use other", "notes": "n", "tags": ["a", "b"] });
        let fields = Fields::expect("class", "A", &value).unwrap();
        let docs = Docs::load(&fields).unwrap();
        assert_eq!(docs.deprecated, Some(Deprecation::Message("use other".into())));

        let mut raw = Map::new();
        docs.write(&mut raw);
        assert_eq!(Value::Object(raw), value);
    }

    #[test]
    fn test_deprecated_flag_and_bad_type() {
        let value = json!({ "deprecated": true });
        let fields = Fields::expect("class", "A", &value).unwrap();
        assert_eq!(
            Docs::load(&fields).unwrap().deprecated,
            Some(Deprecation::Flagged)
        );

        let value = json!({ "deprecated": 1 });
        let fields = Fields::expect("class", "A", &value).unwrap();
        assert!(Docs::load(&fields).is_err());
    }

    #[test]
    fn test_scope() {
        let value = json!({ "scope": "friend" });
        let fields = Fields::expect("class", "A", &value).unwrap();
        assert!(load_scope(&fields).is_err());

        let value = json!({});
        let fields = Fields::expect("class", "A", &value).unwrap();
        assert_eq!(load_scope(&fields).unwrap(), Scope::Package);

        let mut raw = Map::new();
        write_scope(&mut raw, Scope::Package);
        assert!(raw.is_empty());
        write_scope(&mut raw, Scope::Public);
        assert_eq!(raw["scope"], json!("public"));
    }
}

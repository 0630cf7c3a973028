//! Reads type payloads back into [`TypeRef`]s.

use crate::document::{DocumentDictionary, Fields};
use crate::error::{Result, RosettaError};
use crate::parser::{TypeCache, TypeParser};
use crate::serialize::parse_token;
use crate::serialize::payload::{KEY_ARRAY, KEY_BASE, KEY_BOUNDS, KEY_BOUNDS_TYPE, KEY_PARAMETERS};
use rosetta_api::{BoundKind, MAX_ARRAY_DEPTH, TypeError, TypeRef};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

pub struct PayloadReader<'a> {
    parser: TypeParser<'a>,
    dictionary: Option<&'a DocumentDictionary>,
    cache: TypeCache,
    slots: HashMap<usize, Arc<TypeRef>>,
}

impl<'a> PayloadReader<'a> {
    pub fn new(parser: TypeParser<'a>, dictionary: Option<&'a DocumentDictionary>) -> Self {
        Self {
            parser,
            dictionary,
            cache: TypeCache::new(),
            slots: HashMap::new(),
        }
    }

    /// Reads the type stored under `key` of `fields`.
    pub fn read_key(&mut self, fields: &Fields<'_>, key: &str) -> Result<Arc<TypeRef>> {
        let value = fields.require(key)?;
        self.read_at(value, fields.label(), key, None)
    }

    /// Reads every type in the list under `key` of `fields`.
    pub fn read_list(&mut self, fields: &Fields<'_>, key: &str) -> Result<Vec<Arc<TypeRef>>> {
        fields
            .array(key)?
            .iter()
            .map(|value| self.read_at(value, fields.label(), key, None))
            .collect()
    }

    pub fn read(&mut self, value: &Value, label: &str) -> Result<Arc<TypeRef>> {
        self.read_at(value, label, "type", None)
    }

    /// `limit` is the slot being read, if any; tokens inside it must point below it.
    fn read_at(
        &mut self,
        value: &Value,
        label: &str,
        key: &str,
        limit: Option<usize>,
    ) -> Result<Arc<TypeRef>> {
        match value {
            Value::String(text) => match parse_token(text) {
                Some((id, slot)) => self.read_token(text, id, slot, limit),
                None => Ok(self.cache.parse(&self.parser, text)?),
            },
            Value::Object(map) => {
                let fields = Fields::new(format!("{}.{}", label, key), map);
                self.read_structure(&fields, limit).map(Arc::new)
            }
            _ => Err(RosettaError::ValueType {
                label: label.to_string(),
                key: key.to_string(),
                expected: "a type string or object",
            }),
        }
    }

    fn read_token(
        &mut self,
        token: &str,
        id: &str,
        slot: usize,
        limit: Option<usize>,
    ) -> Result<Arc<TypeRef>> {
        let dictionary = self
            .dictionary
            .filter(|dict| dict.id() == id)
            .ok_or_else(|| TypeError::InvalidTypeToken(token.to_string()))?;
        let violation = || TypeError::DictionaryRenderOrderViolation {
            token: token.to_string(),
            slot,
        };
        if limit.is_some_and(|current| slot >= current) {
            return Err(violation().into());
        }
        if let Some(hit) = self.slots.get(&slot) {
            return Ok(Arc::clone(hit));
        }
        let payload = dictionary.get(slot).ok_or_else(violation)?;
        let label = format!("types[{}]", slot);
        let ty = match payload {
            Value::Object(map) => {
                let fields = Fields::new(label, map);
                Arc::new(self.read_structure(&fields, Some(slot))?)
            }
            other => self.read_at(other, &label, "type", Some(slot))?,
        };
        self.slots.insert(slot, Arc::clone(&ty));
        Ok(ty)
    }

    fn read_structure(&mut self, fields: &Fields<'_>, limit: Option<usize>) -> Result<TypeRef> {
        let base = fields.require_str(KEY_BASE)?;
        self.parser.check_name(base)?;
        let array_depth = fields.usize(KEY_ARRAY)?.unwrap_or(0);
        if array_depth > MAX_ARRAY_DEPTH {
            return Err(fields.wrong_type(KEY_ARRAY, "an array depth of at most 255"));
        }

        if fields.contains(KEY_BOUNDS) {
            let kind = match fields.str(KEY_BOUNDS_TYPE)? {
                None => BoundKind::Extends,
                Some(keyword) => BoundKind::from_keyword(keyword)
                    .ok_or_else(|| fields.unknown_value(KEY_BOUNDS_TYPE, keyword))?,
            };
            let bounds = self.read_nested(fields, KEY_BOUNDS, limit)?;
            return Ok(self.parser.bounded(base, kind, bounds, array_depth));
        }

        let sub_types = match fields.get(KEY_PARAMETERS) {
            None => None,
            Some(_) => Some(self.read_nested(fields, KEY_PARAMETERS, limit)?),
        };
        Ok(self.parser.simple(base, sub_types, array_depth))
    }

    fn read_nested(
        &mut self,
        fields: &Fields<'_>,
        key: &str,
        limit: Option<usize>,
    ) -> Result<Vec<TypeRef>> {
        fields
            .array(key)?
            .iter()
            .map(|value| {
                self.read_at(value, fields.label(), key, limit)
                    .map(Arc::unwrap_or_clone)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosetta_api::KnownTypes;
    use serde_json::json;

    fn universe() -> KnownTypes {
        KnownTypes::new(["java.util.List", "java.lang.String", "java.lang.Number"])
    }

    #[test]
    fn test_read_plain_and_structured() {
        let universe = universe();
        let parser = TypeParser::new(&universe);
        let mut reader = PayloadReader::new(parser, None);

        let plain = reader.read(&json!("java.lang.String[]"), "field").unwrap();
        assert_eq!(*plain, parser.parse("java.lang.String[]").unwrap());

        let structured = reader
            .read(
                &json!({
                    "base": "java.util.List",
                    "generic": false,
                    "parameters": [{
                        "base": "?",
                        "bounds_type": "extends",
                        "bounds": ["java.lang.Number"]
                    }]
                }),
                "field",
            )
            .unwrap();
        assert_eq!(
            *structured,
            parser.parse("java.util.List<? extends java.lang.Number>").unwrap()
        );
    }

    #[test]
    fn test_read_tokens() {
        let universe = universe();
        let parser = TypeParser::new(&universe);
        let dictionary = DocumentDictionary::from_value(
            "doc",
            &json!(["java.lang.String", { "base": "java.util.List", "parameters": ["$doc:0"], "array": 1 }]),
        )
        .unwrap();
        let mut reader = PayloadReader::new(parser, Some(&dictionary));

        let ty = reader.read(&json!("$doc:1"), "field").unwrap();
        assert_eq!(*ty, parser.parse("java.util.List<java.lang.String>[]").unwrap());
        let again = reader.read(&json!("$doc:1"), "field").unwrap();
        assert!(Arc::ptr_eq(&ty, &again));
    }

    #[test]
    fn test_forward_reference_is_a_violation() {
        let universe = universe();
        let parser = TypeParser::new(&universe);
        let dictionary = DocumentDictionary::from_value(
            "doc",
            &json!([{ "base": "java.util.List", "parameters": ["$doc:1"] }, "T"]),
        )
        .unwrap();
        let mut reader = PayloadReader::new(parser, Some(&dictionary));

        let err = reader.read(&json!("$doc:0"), "field").unwrap_err();
        assert!(matches!(
            err,
            RosettaError::Type(TypeError::DictionaryRenderOrderViolation { slot: 1, .. })
        ));

        let err = reader.read(&json!("$doc:7"), "field").unwrap_err();
        assert!(matches!(
            err,
            RosettaError::Type(TypeError::DictionaryRenderOrderViolation { slot: 7, .. })
        ));
    }

    #[test]
    fn test_foreign_token() {
        let universe = universe();
        let parser = TypeParser::new(&universe);
        let mut reader = PayloadReader::new(parser, None);
        assert!(matches!(
            reader.read(&json!("$doc:0"), "field"),
            Err(RosettaError::Type(TypeError::InvalidTypeToken(_)))
        ));
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        let universe = universe();
        let parser = TypeParser::new(&universe);
        let mut reader = PayloadReader::new(parser, None);

        for payload in [
            json!({ "base": "" }),
            json!({ "base": "java.util.List<java.lang.String> extends X", "parameters": ["T"] }),
            json!({ "base": "T extends A", "bounds": ["java.lang.Number"] }),
            json!({ "base": "int[]" }),
        ] {
            let err = reader.read(&payload, "field").unwrap_err();
            assert!(
                matches!(
                    err,
                    RosettaError::Type(TypeError::MalformedTypeExpression { .. })
                ),
                "expected malformed error for {}",
                payload
            );
        }
    }

    #[test]
    fn test_array_depth_is_capped() {
        let universe = universe();
        let parser = TypeParser::new(&universe);
        let mut reader = PayloadReader::new(parser, None);

        let deepest = reader
            .read(&json!({ "base": "T", "array": MAX_ARRAY_DEPTH }), "field")
            .unwrap();
        assert_eq!(deepest.array_depth(), MAX_ARRAY_DEPTH);

        for array in [json!(MAX_ARRAY_DEPTH + 1), json!(1_000_000_000_000_000u64)] {
            let err = reader
                .read(&json!({ "base": "T", "array": array }), "field")
                .unwrap_err();
            assert!(matches!(err, RosettaError::ValueType { .. }));
        }
    }

    #[test]
    fn test_bad_bound_keyword() {
        let universe = universe();
        let parser = TypeParser::new(&universe);
        let mut reader = PayloadReader::new(parser, None);
        let err = reader
            .read(
                &json!({ "base": "T", "bounds_type": "implements", "bounds": ["A"] }),
                "field",
            )
            .unwrap_err();
        assert!(matches!(err, RosettaError::UnknownValue { .. }));
    }
}

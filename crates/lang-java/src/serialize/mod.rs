//! Type payloads, the per-document type dictionary and save passes.

pub mod dictionary;
pub mod payload;
pub mod settings;

pub use dictionary::{TypeDictionary, make_token, parse_token};
pub use payload::{PayloadOptions, to_payload};
pub use settings::{DictionaryMode, SerializeSettings};

use crate::compile::{TypeContext, compile_in};
use rosetta_api::{NameShortener, TypeRef};
use serde_json::Value;

/// State of one save call.
///
/// Every type slot of the document goes through [`SerializePass::type_value`]; the
/// dictionary, when enabled, is rendered once by [`SerializePass::finish`].
pub struct SerializePass<'a> {
    id: String,
    options: PayloadOptions,
    shortener: &'a dyn NameShortener,
    dictionary: Option<TypeDictionary>,
}

impl<'a> SerializePass<'a> {
    pub fn new(
        settings: &SerializeSettings,
        id: impl Into<String>,
        shortener: &'a dyn NameShortener,
    ) -> Self {
        let id = id.into();
        let dictionary = settings
            .type_mode
            .is_enabled()
            .then(|| TypeDictionary::new(id.clone(), settings.type_mode));
        Self {
            id,
            options: PayloadOptions {
                write_full_type: settings.write_full_type,
            },
            shortener,
            dictionary,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn has_dictionary(&self) -> bool {
        self.dictionary.is_some()
    }

    /// Serializes a type used by the class `owner`.
    pub fn type_value(&mut self, ty: &TypeRef, owner: &str) -> Value {
        let ctx = TypeContext::new(owner, owner, self.shortener);
        match self.dictionary.as_mut() {
            Some(dictionary) => Value::String(dictionary.register(ty, &ctx, &self.options)),
            None => to_payload(ty, &ctx, &self.options, None),
        }
    }

    /// Compiles a type as seen from `owner`, without registering it.
    pub fn compile(&self, ty: &TypeRef, owner: &str) -> String {
        compile_in(ty, &TypeContext::new(owner, owner, self.shortener))
    }

    /// Renders the dictionary, if any.
    pub fn finish(mut self) -> Option<Value> {
        self.dictionary.as_mut().map(TypeDictionary::render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::ShorteningPolicy;
    use crate::parser::TypeParser;
    use rosetta_api::KnownTypes;
    use serde_json::json;

    #[test]
    fn test_pass_without_dictionary_inlines() {
        let universe = KnownTypes::new(["java.util.List", "java.lang.String"]);
        let parser = TypeParser::new(&universe);
        let settings = SerializeSettings::default();
        let mut pass = SerializePass::new(&settings, "doc", &ShorteningPolicy::Qualified);
        let ty = parser.parse("java.util.List<java.lang.String>").unwrap();

        assert!(!pass.has_dictionary());
        assert_eq!(
            pass.type_value(&ty, "a.B"),
            json!({ "base": "java.util.List", "parameters": ["java.lang.String"] })
        );
        assert_eq!(pass.finish(), None);
    }

    #[test]
    fn test_pass_registers_top_level_types() {
        let universe = KnownTypes::new(["java.util.List", "java.lang.String"]);
        let parser = TypeParser::new(&universe);
        let settings = SerializeSettings::default().with_type_mode(DictionaryMode::Dictionary);
        let mut pass = SerializePass::new(&settings, "doc", &ShorteningPolicy::Qualified);
        let ty = parser.parse("java.util.List<java.lang.String>").unwrap();

        assert_eq!(pass.type_value(&ty, "a.B"), json!("$doc:1"));
        assert_eq!(pass.type_value(&ty, "a.C"), json!("$doc:1"));
        assert_eq!(
            pass.finish(),
            Some(json!({
                "0": "java.lang.String",
                "1": { "base": "java.util.List", "parameters": ["$doc:0"] }
            }))
        );
    }
}

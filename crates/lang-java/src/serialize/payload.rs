use super::dictionary::TypeDictionary;
use crate::compile::{TypeContext, compile_in};
use rosetta_api::TypeRef;
use serde_json::{Map, Value};

pub const KEY_FULL: &str = "full";
pub const KEY_BASE: &str = "base";
pub const KEY_GENERIC: &str = "generic";
pub const KEY_ARRAY: &str = "array";
pub const KEY_PARAMETERS: &str = "parameters";
pub const KEY_BOUNDS_TYPE: &str = "bounds_type";
pub const KEY_BOUNDS: &str = "bounds";

#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadOptions {
    pub write_full_type: bool,
}

/// Serializes a type into its document form.
///
/// Plain non-generic names without arguments collapse to their compiled string. With a
/// dictionary, nested types are registered and referenced by token.
pub fn to_payload(
    ty: &TypeRef,
    ctx: &TypeContext<'_>,
    options: &PayloadOptions,
    mut dictionary: Option<&mut TypeDictionary>,
) -> Value {
    let mut raw = Map::new();
    let nested = match ty {
        TypeRef::Simple(simple) => {
            if !simple.has_sub_types() && !ty.is_generic() {
                return Value::String(compile_in(ty, ctx));
            }
            if options.write_full_type {
                raw.insert(KEY_FULL.into(), Value::String(compile_in(ty, ctx)));
            }
            simple.sub_types()
        }
        TypeRef::Bounded(bounded) => {
            raw.insert(KEY_FULL.into(), Value::String(compile_in(ty, ctx)));
            raw.insert(
                KEY_BOUNDS_TYPE.into(),
                Value::String(bounded.bound_kind().keyword().to_string()),
            );
            None
        }
    };

    raw.insert(KEY_BASE.into(), Value::String(ty.base().to_string()));
    if ty.is_generic() {
        raw.insert(KEY_GENERIC.into(), Value::Bool(true));
    }
    if ty.is_array() {
        raw.insert(KEY_ARRAY.into(), Value::from(ty.array_depth()));
    }

    let mut nested_values = |types: &[TypeRef]| -> Value {
        types
            .iter()
            .map(|t| match dictionary.as_deref_mut() {
                Some(dict) => Value::String(dict.register(t, ctx, options)),
                None => to_payload(t, ctx, options, None),
            })
            .collect()
    };

    if let Some(sub_types) = nested {
        let parameters = nested_values(sub_types);
        raw.insert(KEY_PARAMETERS.into(), parameters);
    }
    if let TypeRef::Bounded(bounded) = ty {
        let bounds = nested_values(bounded.bounds());
        raw.insert(KEY_BOUNDS.into(), bounds);
    }

    Value::Object(raw)
}

//! Type expression parser.
//!
//! Turns text such as `java.util.Map<K, List<? extends V>>[]` or
//! `T extends Comparable<T> & Serializable` into a [`TypeRef`].

mod cache;
pub mod scan;

pub use cache::TypeCache;

use rosetta_api::{
    BoundKind, BoundedType, Classification, HostType, MAX_ARRAY_DEPTH, SimpleType, TypeError,
    TypeRef, TypeResult, TypeUniverse,
};
use scan::{check_balanced, find_clause, split_top_level, strip_array_suffix, type_arguments};

/// Characters that may never appear in a bare type name.
const NAME_DELIMITERS: [char; 4] = [',', '&', '<', '>'];

#[derive(Clone, Copy)]
pub struct TypeParser<'u> {
    universe: &'u dyn TypeUniverse,
}

impl<'u> TypeParser<'u> {
    pub fn new(universe: &'u dyn TypeUniverse) -> Self {
        Self { universe }
    }

    pub fn classify(&self, base: &str) -> Classification {
        Classification::classify(base, self.universe)
    }

    pub fn parse(&self, raw: &str) -> TypeResult<TypeRef> {
        check_balanced(raw)?;
        self.parse_type(raw)
    }

    /// Converts a host handle. Type variables keep their declared bounds as-is.
    pub fn from_host(&self, handle: &HostType) -> TypeResult<TypeRef> {
        match handle {
            HostType::Named(raw) => self.parse(raw),
            HostType::Variable { name, bounds } => {
                let base = name.trim();
                validate_name(name, base)?;
                let bounds = bounds
                    .iter()
                    .map(|b| self.from_host(b))
                    .collect::<TypeResult<Vec<_>>>()?;
                Ok(self.bounded(base, BoundKind::Extends, bounds, 0))
            }
        }
    }

    /// Checks a bare type name that did not come through [`TypeParser::parse`].
    pub fn check_name(&self, name: &str) -> TypeResult<()> {
        if let Some(c) = name.chars().find(|c| matches!(c, '[' | ']')) {
            return Err(TypeError::malformed(
                name,
                format!("unexpected `{}` in type name", c),
            ));
        }
        validate_name(name, name).map_err(|err| match err {
            TypeError::UnsupportedBoundCombination { expr, reason } => {
                TypeError::MalformedTypeExpression { expr, reason }
            }
            other => other,
        })
    }

    pub fn simple(
        &self,
        base: &str,
        sub_types: Option<Vec<TypeRef>>,
        array_depth: usize,
    ) -> TypeRef {
        TypeRef::Simple(SimpleType::new(
            base,
            sub_types,
            array_depth,
            self.classify(base),
        ))
    }

    pub fn bounded(
        &self,
        base: &str,
        kind: BoundKind,
        bounds: Vec<TypeRef>,
        array_depth: usize,
    ) -> TypeRef {
        TypeRef::Bounded(BoundedType::new(
            base,
            kind,
            bounds,
            array_depth,
            self.classify(base),
        ))
    }

    fn parse_type(&self, raw: &str) -> TypeResult<TypeRef> {
        let (text, array_depth) = strip_array_suffix(raw);
        if text.is_empty() {
            return Err(TypeError::malformed(raw, "empty type"));
        }
        if array_depth > MAX_ARRAY_DEPTH {
            return Err(TypeError::malformed(
                raw,
                format!("more than {} array dimensions", MAX_ARRAY_DEPTH),
            ));
        }
        let element = self.parse_element(text)?;
        Ok(element.with_array_depth(array_depth))
    }

    fn parse_element(&self, text: &str) -> TypeResult<TypeRef> {
        let space = text.find(char::is_whitespace);
        let open = text.find('<');

        let Some(space) = space.filter(|s| open.is_none_or(|o| *s < o)) else {
            return match open {
                None => {
                    validate_name(text, text)?;
                    Ok(self.simple(text, None, 0))
                }
                Some(open) => self.parse_generic(text, open),
            };
        };

        let Some((kind, at, after)) = find_clause(text) else {
            return Err(TypeError::unsupported_bounds(
                text,
                "expected an `extends` or `super` clause",
            ));
        };

        if text.contains('&') {
            let base = text[..at].trim();
            validate_name(text, base)?;
            let bounds = split_top_level(&text[after..], '&')
                .into_iter()
                .map(|piece| self.parse_type(piece))
                .collect::<TypeResult<Vec<_>>>()?;
            Ok(self.bounded(base, kind, bounds, 0))
        } else {
            let base = &text[..space];
            if at != space {
                return Err(TypeError::unsupported_bounds(
                    text,
                    "the bound clause must follow the type name",
                ));
            }
            validate_name(text, base)?;
            let bound = self.parse_type(&text[after..])?;
            Ok(self.bounded(base, kind, vec![bound], 0))
        }
    }

    fn parse_generic(&self, text: &str, open: usize) -> TypeResult<TypeRef> {
        let base = text[..open].trim();
        validate_name(text, base)?;
        let (args, close) = type_arguments(text, open)?;
        if close + 1 != text.len() {
            return Err(TypeError::malformed(
                text,
                "unexpected text after type arguments",
            ));
        }
        let sub_types = args
            .into_iter()
            .map(|arg| self.parse_type(arg))
            .collect::<TypeResult<Vec<_>>>()?;
        Ok(self.simple(base, Some(sub_types), 0))
    }
}

fn validate_name(expr: &str, name: &str) -> TypeResult<()> {
    if name.is_empty() {
        return Err(TypeError::malformed(expr, "missing type name"));
    }
    if name.contains(char::is_whitespace) {
        return Err(TypeError::unsupported_bounds(
            expr,
            format!("`{}` is not a single type name", name),
        ));
    }
    if let Some(c) = name.chars().find(|c| NAME_DELIMITERS.contains(c)) {
        return Err(TypeError::malformed(
            expr,
            format!("unexpected `{}` in type name `{}`", c, name),
        ));
    }
    Ok(())
}

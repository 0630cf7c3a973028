use crate::resolve::TypeUniverse;
use serde::Serialize;
use std::borrow::Cow;

/// Root of the class hierarchy. Used as the implicit bound of free type variables.
pub const OBJECT_TYPE: &str = "java.lang.Object";

pub const WILDCARD: &str = "?";

/// Most array dimensions a type may have, as on the JVM.
pub const MAX_ARRAY_DEPTH: usize = 255;

pub const PRIMITIVE_TYPES: [&str; 9] = [
    "void", "boolean", "byte", "short", "char", "int", "float", "double", "long",
];

pub fn is_primitive(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}

/// Direction of an explicit bound clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundKind {
    /// Upper bound(s): `T extends A & B`
    Extends,
    /// Lower bound: `? super T`
    Super,
}

impl BoundKind {
    pub fn keyword(self) -> &'static str {
        match self {
            BoundKind::Extends => "extends",
            BoundKind::Super => "super",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "extends" => Some(BoundKind::Extends),
            "super" => Some(BoundKind::Super),
            _ => None,
        }
    }

    pub fn is_upper(self) -> bool {
        matches!(self, BoundKind::Extends)
    }
}

/// Facts derived from a base name. Computed once, when a type is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Classification {
    pub wildcard: bool,
    pub primitive: bool,
    pub generic: bool,
}

impl Classification {
    pub fn classify(base: &str, universe: &dyn TypeUniverse) -> Self {
        let wildcard = base == WILDCARD;
        let primitive = is_primitive(base);
        let generic = wildcard
            || (!primitive && base != OBJECT_TYPE && !universe.can_resolve(base));
        Self {
            wildcard,
            primitive,
            generic,
        }
    }

    /// Classification of a name known to resolve.
    pub fn concrete(base: &str) -> Self {
        Self {
            wildcard: false,
            primitive: is_primitive(base),
            generic: false,
        }
    }
}

/// A named type with optional type arguments, e.g. `java.util.Map<K, V>[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SimpleType {
    base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub_types: Option<Vec<TypeRef>>,
    array_depth: usize,
    #[serde(flatten)]
    class: Classification,
}

impl SimpleType {
    pub fn new(
        base: impl Into<String>,
        sub_types: Option<Vec<TypeRef>>,
        array_depth: usize,
        class: Classification,
    ) -> Self {
        let base = base.into();
        debug_assert!(!base.is_empty(), "type base must not be empty");
        Self {
            base,
            sub_types,
            array_depth,
            class,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Type arguments as written. `None` when the source had no `<...>`.
    pub fn sub_types(&self) -> Option<&[TypeRef]> {
        self.sub_types.as_deref()
    }

    pub fn has_sub_types(&self) -> bool {
        self.sub_types.as_ref().is_some_and(|s| !s.is_empty())
    }

    pub fn array_depth(&self) -> usize {
        self.array_depth
    }

    pub fn classification(&self) -> Classification {
        self.class
    }
}

/// A type variable or wildcard with explicit bound(s), e.g. `T extends Comparable<T> & Serializable`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BoundedType {
    base: String,
    bound_kind: BoundKind,
    bounds: Vec<TypeRef>,
    array_depth: usize,
    #[serde(flatten)]
    class: Classification,
}

impl BoundedType {
    /// Builds a bounded type. An empty bound list falls back to `extends java.lang.Object`.
    pub fn new(
        base: impl Into<String>,
        bound_kind: BoundKind,
        bounds: Vec<TypeRef>,
        array_depth: usize,
        class: Classification,
    ) -> Self {
        let base = base.into();
        debug_assert!(!base.is_empty(), "type base must not be empty");
        let (bound_kind, bounds) = if bounds.is_empty() {
            (BoundKind::Extends, vec![TypeRef::object()])
        } else {
            (bound_kind, bounds)
        };
        Self {
            base,
            bound_kind,
            bounds,
            array_depth,
            class,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn bound_kind(&self) -> BoundKind {
        self.bound_kind
    }

    /// `true` for `extends`, `false` for `super`.
    pub fn extends_or_super(&self) -> bool {
        self.bound_kind.is_upper()
    }

    pub fn bounds(&self) -> &[TypeRef] {
        &self.bounds
    }

    pub fn array_depth(&self) -> usize {
        self.array_depth
    }

    pub fn classification(&self) -> Classification {
        self.class
    }
}

/// Parsed, structural form of a type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeRef {
    Simple(SimpleType),
    Bounded(BoundedType),
}

impl TypeRef {
    /// `java.lang.Object`, the default bound.
    pub fn object() -> Self {
        TypeRef::Simple(SimpleType::new(
            OBJECT_TYPE,
            None,
            0,
            Classification::concrete(OBJECT_TYPE),
        ))
    }

    pub fn base(&self) -> &str {
        match self {
            TypeRef::Simple(s) => s.base(),
            TypeRef::Bounded(b) => b.base(),
        }
    }

    pub fn classification(&self) -> Classification {
        match self {
            TypeRef::Simple(s) => s.class,
            TypeRef::Bounded(b) => b.class,
        }
    }

    pub fn is_generic(&self) -> bool {
        self.classification().generic
    }

    pub fn is_wildcard(&self) -> bool {
        self.classification().wildcard
    }

    pub fn is_primitive(&self) -> bool {
        self.classification().primitive
    }

    pub fn array_depth(&self) -> usize {
        match self {
            TypeRef::Simple(s) => s.array_depth,
            TypeRef::Bounded(b) => b.array_depth,
        }
    }

    pub fn is_array(&self) -> bool {
        self.array_depth() > 0
    }

    /// Returns the same type with `depth` array levels layered on top.
    pub fn with_array_depth(self, depth: usize) -> Self {
        match self {
            TypeRef::Simple(mut s) => {
                s.array_depth = depth;
                TypeRef::Simple(s)
            }
            TypeRef::Bounded(mut b) => {
                b.array_depth = depth;
                TypeRef::Bounded(b)
            }
        }
    }

    /// Effective bounds: `[self]` for a concrete type, `[Object]` for a free simple
    /// type, the declared bounds for a bounded type.
    pub fn bounds(&self) -> Cow<'_, [TypeRef]> {
        match self {
            TypeRef::Simple(s) if s.class.generic => Cow::Owned(vec![TypeRef::object()]),
            TypeRef::Simple(_) => Cow::Owned(vec![self.clone()]),
            TypeRef::Bounded(b) => Cow::Borrowed(&b.bounds),
        }
    }

    pub fn as_simple(&self) -> Option<&SimpleType> {
        match self {
            TypeRef::Simple(s) => Some(s),
            TypeRef::Bounded(_) => None,
        }
    }

    pub fn as_bounded(&self) -> Option<&BoundedType> {
        match self {
            TypeRef::Bounded(b) => Some(b),
            TypeRef::Simple(_) => None,
        }
    }
}

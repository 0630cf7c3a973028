use crate::models::HostClass;
use std::collections::HashSet;

/// Answers whether a name denotes a known type.
///
/// Backed by a live type environment or a registry of declared entities. Names that do
/// not resolve are treated as free type parameters.
pub trait TypeUniverse {
    fn can_resolve(&self, name: &str) -> bool;
}

/// A fixed set of resolvable names.
#[derive(Debug, Clone, Default)]
pub struct KnownTypes {
    names: HashSet<String>,
}

impl KnownTypes {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl TypeUniverse for KnownTypes {
    fn can_resolve(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Resolves a name if either side does.
pub struct UnionUniverse<'a> {
    first: &'a dyn TypeUniverse,
    second: &'a dyn TypeUniverse,
}

impl<'a> UnionUniverse<'a> {
    pub fn new(first: &'a dyn TypeUniverse, second: &'a dyn TypeUniverse) -> Self {
        Self { first, second }
    }
}

impl TypeUniverse for UnionUniverse<'_> {
    fn can_resolve(&self, name: &str) -> bool {
        self.first.can_resolve(name) || self.second.can_resolve(name)
    }
}

/// Decides how a type name is rendered at a usage site.
///
/// Must be deterministic for the same inputs.
pub trait NameShortener {
    fn shorten(&self, usage: &str, declaring: &str, full_name: &str) -> String;
}

/// Supplies class descriptions from a host type environment.
pub trait ClassSource {
    fn class(&self, name: &str) -> Option<&HostClass>;

    /// Whether `name` denotes a type of the host environment.
    fn can_resolve(&self, name: &str) -> bool {
        self.class(name).is_some()
    }
}

/// Adapts a [`ClassSource`] to the resolvability capability.
pub struct SourceUniverse<'a>(pub &'a dyn ClassSource);

impl TypeUniverse for SourceUniverse<'_> {
    fn can_resolve(&self, name: &str) -> bool {
        self.0.can_resolve(name)
    }
}

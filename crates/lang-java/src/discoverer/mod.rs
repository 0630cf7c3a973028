//! Host discovery: settings and the bridge from host handles to parsed types.

pub mod snapshot;

pub use snapshot::{Snapshot, SnapshotSource};

use crate::error::Result;
use crate::parser::{TypeCache, TypeParser};
use rosetta_api::{HostType, TypeRef};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What discovery does with the supertypes of a discovered class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuperPolicy {
    /// Discover the superclass and interfaces too.
    Expose,
    /// Reference supertypes without discovering them.
    #[default]
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    pub super_policy: SuperPolicy,
    pub expose_fields: bool,
    pub expose_constructors: bool,
    pub expose_methods: bool,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            super_policy: SuperPolicy::Ignore,
            expose_fields: true,
            expose_constructors: true,
            expose_methods: true,
        }
    }
}

/// Parses host handles through one cache for the duration of a discovery.
pub struct HostTypes<'a> {
    parser: TypeParser<'a>,
    cache: TypeCache,
}

impl<'a> HostTypes<'a> {
    pub fn new(parser: TypeParser<'a>) -> Self {
        Self {
            parser,
            cache: TypeCache::new(),
        }
    }

    pub fn resolve(&mut self, handle: &HostType) -> Result<Arc<TypeRef>> {
        Ok(self.cache.resolve(&self.parser, handle)?)
    }

    pub fn resolve_all(&mut self, handles: &[HostType]) -> Result<Vec<Arc<TypeRef>>> {
        handles.iter().map(|h| self.resolve(h)).collect()
    }
}

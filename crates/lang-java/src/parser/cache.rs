use super::TypeParser;
use rosetta_api::{HostType, TypeRef, TypeResult};
use std::collections::HashMap;
use std::sync::Arc;

/// Memoizes parsed types by the identity of their source.
///
/// Owned by the caller; parsing through the cache yields the same structure as
/// parsing directly. Failed parses are not cached. Classification depends on the
/// parser's universe, so a cache must only be used with parsers sharing one universe.
#[derive(Debug, Default)]
pub struct TypeCache {
    entries: HashMap<HostType, Arc<TypeRef>>,
}

impl TypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(
        &mut self,
        parser: &TypeParser<'_>,
        handle: &HostType,
    ) -> TypeResult<Arc<TypeRef>> {
        if let Some(hit) = self.entries.get(handle) {
            return Ok(Arc::clone(hit));
        }
        let parsed = Arc::new(parser.from_host(handle)?);
        self.entries.insert(handle.clone(), Arc::clone(&parsed));
        Ok(parsed)
    }

    pub fn parse(&mut self, parser: &TypeParser<'_>, raw: &str) -> TypeResult<Arc<TypeRef>> {
        self.resolve(parser, &HostType::Named(raw.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

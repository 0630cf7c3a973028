use super::payload::{PayloadOptions, to_payload};
use super::settings::DictionaryMode;
use crate::compile::{TypeContext, compile, compile_in};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use rosetta_api::{TypeError, TypeRef, TypeResult};
use serde_json::{Map, Value};
use tracing::trace;

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$(.+):(\d+)$").expect("token pattern is valid"));

/// Builds the back-reference token for `slot` in the dictionary `id`.
pub fn make_token(id: &str, slot: usize) -> String {
    format!("${}:{}", id, slot)
}

/// Splits a token into its dictionary id and slot. Returns `None` for any other string.
pub fn parse_token(token: &str) -> Option<(&str, usize)> {
    let caps = TOKEN.captures(token)?;
    let id = caps.get(1)?.as_str();
    let slot = caps.get(2)?.as_str().parse().ok()?;
    Some((id, slot))
}

/// Identity of a registered type: its qualified form and its form at the usage site.
///
/// Shortened names alone may collide across packages, and the same type may render
/// differently from different sites.
type SlotKey = (String, String);

/// Per-document pool of type payloads.
///
/// Slots are assigned in first-registration order, after the type's own nested types,
/// so a payload only ever refers to lower slots.
#[derive(Debug)]
pub struct TypeDictionary {
    id: String,
    mode: DictionaryMode,
    entries: IndexMap<SlotKey, Value>,
    rendered_len: Option<usize>,
}

impl TypeDictionary {
    pub fn new(id: impl Into<String>, mode: DictionaryMode) -> Self {
        Self {
            id: id.into(),
            mode,
            entries: IndexMap::new(),
            rendered_len: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> DictionaryMode {
        self.mode
    }

    pub fn token(&self, slot: usize) -> String {
        make_token(&self.id, slot)
    }

    /// Returns the token for `ty`, serializing it on first sight.
    pub fn register(
        &mut self,
        ty: &TypeRef,
        ctx: &TypeContext<'_>,
        options: &PayloadOptions,
    ) -> String {
        let key = (compile(ty), compile_in(ty, ctx));
        if let Some(slot) = self.entries.get_index_of(&key) {
            return self.token(slot);
        }

        let payload = to_payload(ty, ctx, options, Some(self));
        let (slot, _) = self.entries.insert_full(key, payload);
        trace!("Registered type slot {} in dictionary '{}'", slot, self.id);
        self.token(slot)
    }

    /// Renders every registered payload in slot order.
    ///
    /// `List` mode yields an array; any other mode yields an object keyed by slot index.
    pub fn render(&mut self) -> Value {
        self.rendered_len = Some(self.entries.len());
        match self.mode {
            DictionaryMode::List => Value::Array(self.entries.values().cloned().collect()),
            DictionaryMode::Dictionary | DictionaryMode::None => {
                let raw: Map<String, Value> = self
                    .entries
                    .values()
                    .enumerate()
                    .map(|(slot, payload)| (slot.to_string(), payload.clone()))
                    .collect();
                Value::Object(raw)
            }
        }
    }

    /// Looks up a rendered payload by token.
    pub fn resolve(&self, token: &str) -> TypeResult<&Value> {
        let (id, slot) =
            parse_token(token).ok_or_else(|| TypeError::InvalidTypeToken(token.to_string()))?;
        if id != self.id {
            return Err(TypeError::InvalidTypeToken(token.to_string()));
        }
        if slot >= self.rendered_len.unwrap_or(0) {
            return Err(TypeError::DictionaryRenderOrderViolation {
                token: token.to_string(),
                slot,
            });
        }
        self.entries
            .get_index(slot)
            .map(|(_, payload)| payload)
            .ok_or_else(|| TypeError::InvalidTypeToken(token.to_string()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.rendered_len = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

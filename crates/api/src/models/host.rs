//! Class descriptions supplied by a host type environment.
//!
//! These are plain data: the type model never introspects a runtime itself, it only
//! consumes what a [`ClassSource`](crate::resolve::ClassSource) hands over.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a type as the host sees it.
///
/// Doubles as the identity key of the parse cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum HostType {
    /// A type name as text, e.g. `java.util.List<java.lang.String>`
    Named(String),
    /// A declared type variable with its upper bounds
    Variable {
        name: String,
        #[serde(default)]
        bounds: Vec<HostType>,
    },
}

impl HostType {
    pub fn named(name: impl Into<String>) -> Self {
        HostType::Named(name.into())
    }

    pub fn variable(name: impl Into<String>, bounds: Vec<HostType>) -> Self {
        HostType::Variable {
            name: name.into(),
            bounds,
        }
    }
}

/// Access scope of a class or member.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Public,
    Protected,
    #[default]
    Package,
    Private,
}

impl Scope {
    pub fn id(self) -> &'static str {
        match self {
            Scope::Public => "public",
            Scope::Protected => "protected",
            Scope::Package => "package",
            Scope::Private => "private",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "public" => Some(Scope::Public),
            "protected" => Some(Scope::Protected),
            "package" => Some(Scope::Package),
            "private" => Some(Scope::Private),
            _ => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Modifiers {
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(rename = "native")]
    pub is_native: bool,
    #[serde(rename = "volatile")]
    pub is_volatile: bool,
    #[serde(rename = "transient")]
    pub is_transient: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HostField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: HostType,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HostParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: HostType,
}

/// A method or constructor. Constructors leave `returns` empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HostExecutable {
    pub name: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub type_parameters: Vec<HostType>,
    #[serde(default)]
    pub parameters: Vec<HostParameter>,
    #[serde(default)]
    pub returns: Option<HostType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HostClass {
    /// Fully qualified name, e.g. `java.util.Map.Entry`
    pub name: String,
    pub package: String,
    /// Fully qualified name of the enclosing class, for nested classes
    #[serde(default)]
    pub enclosing: Option<String>,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub type_parameters: Vec<HostType>,
    #[serde(default)]
    pub superclass: Option<HostType>,
    #[serde(default)]
    pub interfaces: Vec<HostType>,
    #[serde(default)]
    pub fields: Vec<HostField>,
    #[serde(default)]
    pub constructors: Vec<HostExecutable>,
    #[serde(default)]
    pub methods: Vec<HostExecutable>,
}

impl HostClass {
    /// Name relative to the package, e.g. `Map.Entry`.
    pub fn relative_name(&self) -> &str {
        if self.package.is_empty() {
            return &self.name;
        }
        self.name
            .strip_prefix(self.package.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(&self.name)
    }

    /// Last segment of the name, e.g. `Entry`.
    pub fn simple_name(&self) -> &str {
        let relative = self.relative_name();
        relative.rsplit('.').next().unwrap_or(relative)
    }
}

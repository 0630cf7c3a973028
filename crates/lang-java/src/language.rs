//! The set of packages making up one document, and its discovery, save and load.

use crate::discoverer::{DiscoverySettings, HostTypes, SuperPolicy};
use crate::document::{DocumentDictionary, Fields, KEY_CLASSES, KEY_PACKAGES, KEY_TYPES};
use crate::error::{Result, RosettaError};
use crate::model::{JavaClass, JavaPackage};
use crate::naming::JavaNaming;
use crate::parser::TypeParser;
use crate::reader::PayloadReader;
use crate::serialize::{SerializePass, SerializeSettings};
use rosetta_api::{
    ClassSource, KnownTypes, NameShortener, SourceUniverse, TypeUniverse, UnionUniverse,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::iter;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JavaLanguage {
    packages: BTreeMap<String, JavaPackage>,
}

impl JavaLanguage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn packages(&self) -> impl Iterator<Item = &JavaPackage> {
        self.packages.values()
    }

    pub fn package(&self, path: &str) -> Option<&JavaPackage> {
        self.packages.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.packages.values().all(JavaPackage::is_empty)
    }

    /// Finds a class by fully qualified name, nested classes included.
    pub fn class(&self, fqn: &str) -> Option<&JavaClass> {
        package_splits(fqn).find_map(|(path, relative)| self.packages.get(path)?.class(relative))
    }

    fn class_mut(&mut self, fqn: &str) -> Option<&mut JavaClass> {
        let (path, relative) = package_splits(fqn).find(|(path, relative)| {
            self.packages
                .get(*path)
                .is_some_and(|p| p.class(relative).is_some())
        })?;
        self.packages.get_mut(path)?.class_mut(relative)
    }

    /// Describes the class `fqn` from `source`, along with its enclosing classes and,
    /// under [`SuperPolicy::Expose`], its supertypes.
    ///
    /// Already known classes are left untouched.
    pub fn discover(
        &mut self,
        settings: &DiscoverySettings,
        source: &dyn ClassSource,
        fqn: &str,
    ) -> Result<()> {
        let universe = SourceUniverse(source);
        let mut types = HostTypes::new(TypeParser::new(&universe));
        self.discover_with(settings, source, &mut types, fqn)
    }

    fn discover_with(
        &mut self,
        settings: &DiscoverySettings,
        source: &dyn ClassSource,
        types: &mut HostTypes<'_>,
        fqn: &str,
    ) -> Result<()> {
        if self.class(fqn).is_some() {
            return Ok(());
        }
        let host = source
            .class(fqn)
            .ok_or_else(|| RosettaError::UnknownClass(fqn.to_string()))?;

        if let Some(enclosing) = &host.enclosing {
            self.discover_with(settings, source, types, enclosing)?;
        }

        debug!("Discovering class {}", fqn);
        let class = JavaClass::from_host(host, settings, types)?;
        let supertypes: Vec<String> = match settings.super_policy {
            SuperPolicy::Expose => class
                .extends
                .iter()
                .chain(class.implements.iter())
                .map(|ty| ty.base().to_string())
                .collect(),
            SuperPolicy::Ignore => Vec::new(),
        };

        match &host.enclosing {
            Some(enclosing) => self
                .class_mut(enclosing)
                .ok_or_else(|| RosettaError::UnknownClass(enclosing.clone()))?
                .add_class(class)?,
            None => self
                .packages
                .entry(host.package.clone())
                .or_insert_with(|| JavaPackage::new(host.package.clone()))
                .add_class(class)?,
        }

        for supertype in supertypes {
            if source.class(&supertype).is_some() {
                self.discover_with(settings, source, types, &supertype)?;
            } else {
                warn!(
                    "Supertype {} of {} is not available from the source, skipping",
                    supertype, fqn
                );
            }
        }
        Ok(())
    }

    /// Saves with the shortening policy of `settings`.
    pub fn save(&self, settings: &SerializeSettings, id: &str) -> Value {
        self.save_with(settings, id, &settings.shortening)
    }

    pub fn save_with(
        &self,
        settings: &SerializeSettings,
        id: &str,
        shortener: &dyn NameShortener,
    ) -> Value {
        let mut pass = SerializePass::new(settings, id, shortener);
        let packages: Map<String, Value> = self
            .packages
            .iter()
            .filter(|(_, package)| !package.is_empty())
            .map(|(path, package)| (path.clone(), package.to_document(&mut pass)))
            .collect();

        let package_count = packages.len();
        let mut raw = Map::new();
        if !packages.is_empty() {
            raw.insert(KEY_PACKAGES.into(), Value::Object(packages));
        }
        if let Some(types) = pass.finish() {
            raw.insert(KEY_TYPES.into(), types);
        }
        debug!("Saved document '{}' with {} package(s)", id, package_count);
        Value::Object(raw)
    }

    /// Loads a document saved under `id`.
    ///
    /// Classes declared by the document resolve as concrete types in addition to the
    /// names `universe` knows.
    pub fn load(document: &Value, id: &str, universe: &dyn TypeUniverse) -> Result<Self> {
        let root = Fields::root(document)?;
        let dictionary = root
            .get(KEY_TYPES)
            .map(|types| DocumentDictionary::from_value(id, types))
            .transpose()?;

        let mut declared = KnownTypes::default();
        for (path, package) in root.entries(KEY_PACKAGES)? {
            collect_declared(&package, path, &mut declared)?;
        }
        let universe = UnionUniverse::new(&declared, universe);
        let mut reader = PayloadReader::new(TypeParser::new(&universe), dictionary.as_ref());

        let mut language = Self::new();
        for (path, entry) in root.entries(KEY_PACKAGES)? {
            let package = JavaPackage::load(path, &entry, &mut reader)?;
            language.packages.insert(path.to_string(), package);
        }
        debug!(
            "Loaded document '{}' with {} declared class(es)",
            id,
            declared.len()
        );
        Ok(language)
    }
}

/// Candidate `(package, relative name)` splits of a name, longest package first.
fn package_splits(fqn: &str) -> impl Iterator<Item = (&str, &str)> {
    fqn.rmatch_indices('.')
        .map(move |(i, _)| (&fqn[..i], &fqn[i + 1..]))
        .chain(iter::once(("", fqn)))
}

fn collect_declared(fields: &Fields<'_>, parent: &str, out: &mut KnownTypes) -> Result<()> {
    for (name, class) in fields.entries(KEY_CLASSES)? {
        let fqn = JavaNaming::join(parent, name);
        collect_declared(&class, &fqn, out)?;
        out.insert(fqn);
    }
    Ok(())
}

use super::{
    Docs, JavaConstructor, JavaField, JavaMethod, KEY_ABSTRACT, KEY_FINAL, KEY_STATIC,
    KEY_TYPE_PARAMETERS, Modifiers, Scope, load_modifiers, load_scope, write_flag, write_scope,
};
use crate::discoverer::{DiscoverySettings, HostTypes};
use crate::document::{Fields, KEY_CLASSES};
use crate::error::{Result, RosettaError};
use crate::naming::JavaNaming;
use crate::reader::PayloadReader;
use crate::serialize::SerializePass;
use rosetta_api::{HostClass, TypeRef};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;

pub(crate) const KEY_EXTENDS: &str = "extends";
pub(crate) const KEY_IMPLEMENTS: &str = "implements";
pub(crate) const KEY_FIELDS: &str = "fields";
pub(crate) const KEY_CONSTRUCTORS: &str = "constructors";
pub(crate) const KEY_METHODS: &str = "methods";

#[derive(Debug, Clone, PartialEq)]
pub struct JavaClass {
    /// Simple name, the key under the package or the enclosing class
    pub name: String,
    pub fqn: String,
    pub package: String,
    pub scope: Scope,
    pub modifiers: Modifiers,
    pub type_parameters: Vec<Arc<TypeRef>>,
    pub extends: Option<Arc<TypeRef>>,
    pub implements: Vec<Arc<TypeRef>>,
    pub docs: Docs,
    pub classes: BTreeMap<String, JavaClass>,
    pub fields: BTreeMap<String, JavaField>,
    pub constructors: Vec<JavaConstructor>,
    /// Overloads grouped by name
    pub methods: BTreeMap<String, Vec<JavaMethod>>,
}

impl JavaClass {
    pub fn from_host(
        host: &HostClass,
        settings: &DiscoverySettings,
        types: &mut HostTypes<'_>,
    ) -> Result<Self> {
        let name = host.simple_name().to_string();
        let mut class = Self {
            fqn: host.name.clone(),
            package: host.package.clone(),
            scope: host.scope,
            modifiers: host.modifiers,
            type_parameters: types.resolve_all(&host.type_parameters)?,
            extends: host
                .superclass
                .as_ref()
                .map(|handle| types.resolve(handle))
                .transpose()?,
            implements: types.resolve_all(&host.interfaces)?,
            docs: Docs::default(),
            classes: BTreeMap::new(),
            fields: BTreeMap::new(),
            constructors: Vec::new(),
            methods: BTreeMap::new(),
            name,
        };

        if settings.expose_fields {
            for field in &host.fields {
                let field = JavaField::from_host(field, types)?;
                class.fields.insert(field.name.clone(), field);
            }
        }
        if settings.expose_constructors {
            for constructor in &host.constructors {
                let constructor = JavaConstructor::from_host(&class.fqn, constructor, types)?;
                class.add_constructor(constructor);
            }
        }
        if settings.expose_methods {
            for method in &host.methods {
                class.add_method(JavaMethod::from_host(method, types)?);
            }
        }
        Ok(class)
    }

    /// Loads the class `name` declared under `parent` (a package path or an enclosing class).
    pub fn load(
        name: &str,
        parent: &str,
        package: &str,
        fields: &Fields<'_>,
        reader: &mut PayloadReader<'_>,
    ) -> Result<Self> {
        let fqn = JavaNaming::join(parent, name);
        let extends = match fields.get(KEY_EXTENDS) {
            Some(_) => Some(reader.read_key(fields, KEY_EXTENDS)?),
            None => None,
        };
        let mut class = Self {
            name: name.to_string(),
            package: package.to_string(),
            scope: load_scope(fields)?,
            modifiers: load_modifiers(fields)?,
            type_parameters: reader.read_list(fields, KEY_TYPE_PARAMETERS)?,
            extends,
            implements: reader.read_list(fields, KEY_IMPLEMENTS)?,
            docs: Docs::load(fields)?,
            classes: BTreeMap::new(),
            fields: BTreeMap::new(),
            constructors: Vec::new(),
            methods: BTreeMap::new(),
            fqn,
        };

        for (child, entry) in fields.entries(KEY_CLASSES)? {
            let nested = JavaClass::load(child, &class.fqn, package, &entry, reader)?;
            class.add_class(nested)?;
        }
        for (field, entry) in fields.entries(KEY_FIELDS)? {
            let field = JavaField::load(field, &entry, reader)?;
            class.fields.insert(field.name.clone(), field);
        }
        let group = format!("{}.{}", fields.label(), KEY_CONSTRUCTORS);
        for (i, value) in fields.array(KEY_CONSTRUCTORS)?.iter().enumerate() {
            let entry = Fields::expect(&group, &i.to_string(), value)?;
            let constructor = JavaConstructor::load(&class.name, &entry, reader)?;
            class.add_constructor(constructor);
        }
        let group = format!("{}.{}", fields.label(), KEY_METHODS);
        for (i, value) in fields.array(KEY_METHODS)?.iter().enumerate() {
            let entry = Fields::expect(&group, &i.to_string(), value)?;
            class.add_method(JavaMethod::load(&entry, reader)?);
        }
        Ok(class)
    }

    pub fn add_class(&mut self, class: JavaClass) -> Result<()> {
        match self.classes.entry(class.name.clone()) {
            Entry::Occupied(_) => Err(RosettaError::DuplicateClass(class.fqn)),
            Entry::Vacant(slot) => {
                slot.insert(class);
                Ok(())
            }
        }
    }

    /// Keeps constructors ordered by signature.
    pub fn add_constructor(&mut self, constructor: JavaConstructor) {
        let signature = constructor.signature();
        let at = self
            .constructors
            .partition_point(|c| c.signature() <= signature);
        self.constructors.insert(at, constructor);
    }

    /// Keeps each overload group ordered by signature.
    pub fn add_method(&mut self, method: JavaMethod) {
        let signature = method.signature();
        let group = self.methods.entry(method.name().to_string()).or_default();
        let at = group.partition_point(|m| m.signature() <= signature);
        group.insert(at, method);
    }

    /// Finds a nested class by its dotted path relative to this class, e.g. `Inner.Leaf`.
    pub fn nested(&self, path: &str) -> Option<&JavaClass> {
        path.split('.')
            .try_fold(self, |class, segment| class.classes.get(segment))
    }

    pub fn nested_mut(&mut self, path: &str) -> Option<&mut JavaClass> {
        path.split('.')
            .try_fold(self, |class, segment| class.classes.get_mut(segment))
    }

    pub fn method_count(&self) -> usize {
        self.methods.values().map(Vec::len).sum()
    }

    pub fn to_document(&self, pass: &mut SerializePass<'_>) -> Value {
        let owner = self.fqn.as_str();
        let mut raw = Map::new();

        write_scope(&mut raw, self.scope);
        write_flag(&mut raw, KEY_STATIC, self.modifiers.is_static);
        write_flag(&mut raw, KEY_FINAL, self.modifiers.is_final);
        write_flag(&mut raw, KEY_ABSTRACT, self.modifiers.is_abstract);

        if !self.type_parameters.is_empty() {
            let values = type_values(pass, &self.type_parameters, owner);
            raw.insert(KEY_TYPE_PARAMETERS.into(), values);
        }
        if let Some(extends) = &self.extends {
            raw.insert(KEY_EXTENDS.into(), pass.type_value(extends, owner));
        }
        if !self.implements.is_empty() {
            let values = type_values(pass, &self.implements, owner);
            raw.insert(KEY_IMPLEMENTS.into(), values);
        }
        self.docs.write(&mut raw);

        if !self.classes.is_empty() {
            let classes: Map<String, Value> = self
                .classes
                .iter()
                .map(|(name, class)| (name.clone(), class.to_document(pass)))
                .collect();
            raw.insert(KEY_CLASSES.into(), Value::Object(classes));
        }
        if !self.fields.is_empty() {
            let fields: Map<String, Value> = self
                .fields
                .iter()
                .map(|(name, field)| (name.clone(), field.to_document(pass, owner)))
                .collect();
            raw.insert(KEY_FIELDS.into(), Value::Object(fields));
        }
        if !self.constructors.is_empty() {
            let values: Vec<Value> = sorted_by_signature(&self.constructors, |c| c.signature())
                .into_iter()
                .map(|c| c.to_document(pass, owner))
                .collect();
            raw.insert(KEY_CONSTRUCTORS.into(), Value::Array(values));
        }
        if !self.methods.is_empty() {
            let mut values = Vec::with_capacity(self.method_count());
            for group in self.methods.values() {
                values.extend(
                    sorted_by_signature(group, |m| m.signature())
                        .into_iter()
                        .map(|m| m.to_document(pass, owner)),
                );
            }
            raw.insert(KEY_METHODS.into(), Value::Array(values));
        }

        Value::Object(raw)
    }
}

/// Signature order, regardless of how the collection was filled.
fn sorted_by_signature<T>(items: &[T], signature: impl Fn(&T) -> String) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_cached_key(|item| signature(item));
    sorted
}

fn type_values(pass: &mut SerializePass<'_>, types: &[Arc<TypeRef>], owner: &str) -> Value {
    types.iter().map(|ty| pass.type_value(ty, owner)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::ShorteningPolicy;
    use crate::parser::TypeParser;
    use crate::serialize::SerializeSettings;
    use rosetta_api::{HostExecutable, HostParameter, HostType, KnownTypes};
    use serde_json::json;

    fn overload(param: &str) -> HostExecutable {
        HostExecutable {
            name: "add".into(),
            scope: Scope::Public,
            modifiers: Modifiers::default(),
            type_parameters: vec![],
            parameters: vec![HostParameter {
                name: "value".into(),
                ty: HostType::named(param),
            }],
            returns: None,
        }
    }

    fn host() -> HostClass {
        HostClass {
            name: "com.example.Box".into(),
            package: "com.example".into(),
            enclosing: None,
            scope: Scope::Public,
            modifiers: Modifiers::default(),
            type_parameters: vec![HostType::variable("T", vec![])],
            superclass: Some(HostType::named("java.lang.Object")),
            interfaces: vec![],
            fields: vec![],
            constructors: vec![],
            methods: vec![overload("java.lang.String"), overload("int")],
        }
    }

    #[test]
    fn test_overloads_sorted_by_signature() {
        let universe = KnownTypes::new(["java.lang.String"]);
        let mut types = HostTypes::new(TypeParser::new(&universe));
        let class = JavaClass::from_host(&host(), &DiscoverySettings::default(), &mut types)
            .unwrap();
        assert_eq!(class.name, "Box");
        assert_eq!(class.method_count(), 2);
        assert_eq!(class.methods["add"][0].signature(), "add(int)");

        let settings = SerializeSettings::default();
        let mut pass = SerializePass::new(&settings, "doc", &ShorteningPolicy::Qualified);
        let doc = class.to_document(&mut pass);
        assert_eq!(doc["methods"][0]["parameters"][0]["type"], json!("int"));
        assert_eq!(
            doc["methods"][1]["parameters"][0]["type"],
            json!("java.lang.String")
        );
        assert_eq!(doc["extends"], json!("java.lang.Object"));
        assert_eq!(
            doc["type_parameters"][0],
            json!({
                "full": "T extends java.lang.Object",
                "base": "T",
                "generic": true,
                "bounds_type": "extends",
                "bounds": ["java.lang.Object"]
            })
        );
    }

    #[test]
    fn test_expose_flags() {
        let universe = KnownTypes::default();
        let mut types = HostTypes::new(TypeParser::new(&universe));
        let settings = DiscoverySettings {
            expose_methods: false,
            ..DiscoverySettings::default()
        };
        let class = JavaClass::from_host(&host(), &settings, &mut types).unwrap();
        assert!(class.methods.is_empty());
    }

    #[test]
    fn test_nested_and_duplicates() {
        let universe = KnownTypes::default();
        let parser = TypeParser::new(&universe);
        let mut reader = PayloadReader::new(parser, None);
        let value = json!({ "classes": { "Inner": { "classes": { "Leaf": {} } } } });
        let fields = Fields::expect("classes", "Outer", &value).unwrap();
        let mut outer = JavaClass::load("Outer", "a.b", "a.b", &fields, &mut reader).unwrap();

        let leaf = outer.nested("Inner.Leaf").unwrap();
        assert_eq!(leaf.fqn, "a.b.Outer.Inner.Leaf");
        assert_eq!(leaf.package, "a.b");

        let copy = outer.nested("Inner").unwrap().clone();
        assert!(matches!(
            outer.add_class(copy),
            Err(RosettaError::DuplicateClass(name)) if name == "a.b.Outer.Inner"
        ));
        assert!(outer.nested_mut("Missing").is_none());
    }
}

use super::{
    Docs, KEY_ABSTRACT, KEY_FINAL, KEY_NAME, KEY_NATIVE, KEY_NULLABLE, KEY_STATIC, KEY_TYPE,
    KEY_TYPE_PARAMETERS, Modifiers, Scope, default_nullable, load_modifiers,
    load_notes, load_scope, write_flag, write_notes, write_scope,
};
use crate::compile::compile;
use crate::discoverer::HostTypes;
use crate::document::Fields;
use crate::error::{Result, RosettaError};
use crate::naming::JavaNaming;
use crate::reader::PayloadReader;
use crate::serialize::SerializePass;
use rosetta_api::{Classification, HostExecutable, HostParameter, HostType, SimpleType, TypeRef};
use serde_json::{Map, Value};
use std::sync::Arc;

pub(crate) const KEY_PARAMETERS: &str = "parameters";
pub(crate) const KEY_RETURNS: &str = "returns";

const VOID: &str = "void";

fn void_type() -> TypeRef {
    TypeRef::Simple(SimpleType::new(VOID, None, 0, Classification::concrete(VOID)))
}

#[derive(Debug, Clone, PartialEq)]
pub struct JavaParameter {
    pub name: String,
    pub ty: Arc<TypeRef>,
    pub nullable: bool,
    pub notes: Option<String>,
}

impl JavaParameter {
    pub fn new(name: impl Into<String>, ty: Arc<TypeRef>) -> Result<Self> {
        let name = name.into();
        if !JavaNaming::is_valid_identifier(&name) {
            return Err(RosettaError::InvalidName(name));
        }
        Ok(Self {
            name,
            nullable: default_nullable(&ty),
            ty,
            notes: None,
        })
    }

    pub fn from_host(host: &HostParameter, types: &mut HostTypes<'_>) -> Result<Self> {
        Self::new(host.name.clone(), types.resolve(&host.ty)?)
    }

    pub fn load(fields: &Fields<'_>, reader: &mut PayloadReader<'_>) -> Result<Self> {
        let name = fields.require_str(KEY_NAME)?;
        let mut parameter = Self::new(name, reader.read_key(fields, KEY_TYPE)?)?;
        parameter.nullable = fields.bool_or(KEY_NULLABLE, parameter.nullable)?;
        parameter.notes = load_notes(fields)?;
        Ok(parameter)
    }

    pub fn to_document(&self, pass: &mut SerializePass<'_>, owner: &str) -> Value {
        let mut raw = Map::new();
        raw.insert(KEY_NAME.into(), Value::String(self.name.clone()));
        write_notes(&mut raw, self.notes.as_deref());
        raw.insert(KEY_NULLABLE.into(), Value::Bool(self.nullable));
        raw.insert(KEY_TYPE.into(), pass.type_value(&self.ty, owner));
        Value::Object(raw)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JavaReturn {
    pub ty: Arc<TypeRef>,
    pub nullable: bool,
    pub notes: Option<String>,
}

impl JavaReturn {
    pub fn new(ty: Arc<TypeRef>) -> Self {
        Self {
            nullable: default_nullable(&ty),
            ty,
            notes: None,
        }
    }

    pub fn void() -> Self {
        Self::new(Arc::new(void_type()))
    }

    pub fn from_host(host: Option<&HostType>, types: &mut HostTypes<'_>) -> Result<Self> {
        match host {
            Some(handle) => Ok(Self::new(types.resolve(handle)?)),
            None => Ok(Self::void()),
        }
    }

    pub fn load(fields: &Fields<'_>, reader: &mut PayloadReader<'_>) -> Result<Self> {
        let mut returns = Self::new(reader.read_key(fields, KEY_TYPE)?);
        returns.nullable = fields.bool_or(KEY_NULLABLE, returns.nullable)?;
        returns.notes = load_notes(fields)?;
        Ok(returns)
    }

    pub fn is_void(&self) -> bool {
        self.ty.base() == VOID && !self.ty.is_array()
    }

    /// A void return without notes carries no information and is left out.
    pub fn is_worth_writing(&self) -> bool {
        !self.is_void() || self.notes.is_some()
    }

    pub fn to_document(&self, pass: &mut SerializePass<'_>, owner: &str) -> Value {
        let mut raw = Map::new();
        write_notes(&mut raw, self.notes.as_deref());
        if !self.nullable {
            raw.insert(KEY_NULLABLE.into(), Value::Bool(false));
        }
        raw.insert(KEY_TYPE.into(), pass.type_value(&self.ty, owner));
        Value::Object(raw)
    }
}

/// Parts shared by methods and constructors.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaExecutable {
    pub name: String,
    pub scope: Scope,
    pub modifiers: Modifiers,
    pub type_parameters: Vec<Arc<TypeRef>>,
    pub parameters: Vec<JavaParameter>,
    pub docs: Docs,
}

impl JavaExecutable {
    pub fn from_host(host: &HostExecutable, types: &mut HostTypes<'_>) -> Result<Self> {
        let parameters = host
            .parameters
            .iter()
            .map(|p| JavaParameter::from_host(p, types))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: host.name.clone(),
            scope: host.scope,
            modifiers: host.modifiers,
            type_parameters: types.resolve_all(&host.type_parameters)?,
            parameters,
            docs: Docs::default(),
        })
    }

    pub fn load(name: &str, fields: &Fields<'_>, reader: &mut PayloadReader<'_>) -> Result<Self> {
        let group = format!("{}.{}", fields.label(), KEY_PARAMETERS);
        let parameters = fields
            .array(KEY_PARAMETERS)?
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let entry = Fields::expect(&group, &i.to_string(), value)?;
                JavaParameter::load(&entry, reader)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: name.to_string(),
            scope: load_scope(fields)?,
            modifiers: load_modifiers(fields)?,
            type_parameters: reader.read_list(fields, KEY_TYPE_PARAMETERS)?,
            parameters,
            docs: Docs::load(fields)?,
        })
    }

    /// `name(param types)`, the sort key among overloads.
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| compile(&p.ty))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.name, params)
    }

    fn write(&self, raw: &mut Map<String, Value>, pass: &mut SerializePass<'_>, owner: &str) {
        write_scope(raw, self.scope);
        write_flag(raw, KEY_STATIC, self.modifiers.is_static);
        write_flag(raw, KEY_FINAL, self.modifiers.is_final);
        write_flag(raw, KEY_ABSTRACT, self.modifiers.is_abstract);
        write_flag(raw, KEY_NATIVE, self.modifiers.is_native);
        if !self.type_parameters.is_empty() {
            let values: Vec<Value> = self
                .type_parameters
                .iter()
                .map(|ty| pass.type_value(ty, owner))
                .collect();
            raw.insert(KEY_TYPE_PARAMETERS.into(), Value::Array(values));
        }
        if !self.parameters.is_empty() {
            let values: Vec<Value> = self
                .parameters
                .iter()
                .map(|p| p.to_document(pass, owner))
                .collect();
            raw.insert(KEY_PARAMETERS.into(), Value::Array(values));
        }
        self.docs.write(raw);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JavaConstructor {
    pub exec: JavaExecutable,
}

impl JavaConstructor {
    /// Constructors are named after the simple name of the declaring class `class_fqn`.
    pub fn from_host(
        class_fqn: &str,
        host: &HostExecutable,
        types: &mut HostTypes<'_>,
    ) -> Result<Self> {
        let mut exec = JavaExecutable::from_host(host, types)?;
        exec.name = JavaNaming::simple_name(class_fqn).to_string();
        Ok(Self { exec })
    }

    pub fn load(
        class_name: &str,
        fields: &Fields<'_>,
        reader: &mut PayloadReader<'_>,
    ) -> Result<Self> {
        Ok(Self {
            exec: JavaExecutable::load(class_name, fields, reader)?,
        })
    }

    pub fn signature(&self) -> String {
        self.exec.signature()
    }

    pub fn to_document(&self, pass: &mut SerializePass<'_>, owner: &str) -> Value {
        let mut raw = Map::new();
        self.exec.write(&mut raw, pass, owner);
        Value::Object(raw)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JavaMethod {
    pub exec: JavaExecutable,
    pub returns: JavaReturn,
}

impl JavaMethod {
    pub fn from_host(host: &HostExecutable, types: &mut HostTypes<'_>) -> Result<Self> {
        if !JavaNaming::is_valid_identifier(&host.name) {
            return Err(RosettaError::InvalidName(host.name.clone()));
        }
        Ok(Self {
            exec: JavaExecutable::from_host(host, types)?,
            returns: JavaReturn::from_host(host.returns.as_ref(), types)?,
        })
    }

    pub fn load(fields: &Fields<'_>, reader: &mut PayloadReader<'_>) -> Result<Self> {
        let name = fields.require_str(KEY_NAME)?;
        if !JavaNaming::is_valid_identifier(name) {
            return Err(RosettaError::InvalidName(name.to_string()));
        }
        let returns = match fields.object(KEY_RETURNS)? {
            Some(returns) => JavaReturn::load(&returns, reader)?,
            None => JavaReturn::void(),
        };
        Ok(Self {
            exec: JavaExecutable::load(name, fields, reader)?,
            returns,
        })
    }

    pub fn name(&self) -> &str {
        &self.exec.name
    }

    pub fn signature(&self) -> String {
        self.exec.signature()
    }

    pub fn to_document(&self, pass: &mut SerializePass<'_>, owner: &str) -> Value {
        let mut raw = Map::new();
        raw.insert(KEY_NAME.into(), Value::String(self.exec.name.clone()));
        self.exec.write(&mut raw, pass, owner);
        if self.returns.is_worth_writing() {
            raw.insert(KEY_RETURNS.into(), self.returns.to_document(pass, owner));
        }
        Value::Object(raw)
    }
}

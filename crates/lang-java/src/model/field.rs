use super::{
    Docs, KEY_FINAL, KEY_NATIVE, KEY_NULLABLE, KEY_STATIC, KEY_TRANSIENT, KEY_TYPE,
    KEY_VOLATILE, Modifiers, Scope, default_nullable, load_modifiers, load_scope, write_flag,
    write_scope,
};
use crate::discoverer::HostTypes;
use crate::document::Fields;
use crate::error::Result;
use crate::reader::PayloadReader;
use crate::serialize::SerializePass;
use rosetta_api::{HostField, TypeRef};
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct JavaField {
    pub name: String,
    pub ty: Arc<TypeRef>,
    pub scope: Scope,
    pub modifiers: Modifiers,
    pub nullable: bool,
    pub docs: Docs,
}

impl JavaField {
    pub fn from_host(host: &HostField, types: &mut HostTypes<'_>) -> Result<Self> {
        let ty = types.resolve(&host.ty)?;
        Ok(Self {
            name: host.name.clone(),
            nullable: default_nullable(&ty),
            ty,
            scope: host.scope,
            modifiers: host.modifiers,
            docs: Docs::default(),
        })
    }

    pub fn load(name: &str, fields: &Fields<'_>, reader: &mut PayloadReader<'_>) -> Result<Self> {
        let ty = reader.read_key(fields, KEY_TYPE)?;
        Ok(Self {
            name: name.to_string(),
            nullable: fields.bool_or(KEY_NULLABLE, true)?,
            ty,
            scope: load_scope(fields)?,
            modifiers: load_modifiers(fields)?,
            docs: Docs::load(fields)?,
        })
    }

    pub fn to_document(&self, pass: &mut SerializePass<'_>, owner: &str) -> Value {
        let mut raw = Map::new();
        raw.insert(KEY_TYPE.into(), pass.type_value(&self.ty, owner));
        write_scope(&mut raw, self.scope);
        if !self.nullable {
            raw.insert(KEY_NULLABLE.into(), Value::Bool(false));
        }
        write_flag(&mut raw, KEY_VOLATILE, self.modifiers.is_volatile);
        write_flag(&mut raw, KEY_TRANSIENT, self.modifiers.is_transient);
        write_flag(&mut raw, KEY_NATIVE, self.modifiers.is_native);
        write_flag(&mut raw, KEY_FINAL, self.modifiers.is_final);
        write_flag(&mut raw, KEY_STATIC, self.modifiers.is_static);
        self.docs.write(&mut raw);
        Value::Object(raw)
    }
}

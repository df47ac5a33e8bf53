//! Host object model.
//!
//! The host runtime owns its packet objects; the codec only sees their
//! declared shape and reads or writes values by slot. Nothing here knows
//! how a particular host build lays out its classes.

use crate::error::{ProtocolError, Result};
use crate::protocol::types::Vector3d;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Declared type of a host field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Int,
    Long,
    Double,
    Bool,
    Text,
    Vector,
    /// Enum-typed field; carries the host enum type name.
    Enum(String),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Int => f.write_str("int"),
            FieldType::Long => f.write_str("long"),
            FieldType::Double => f.write_str("double"),
            FieldType::Bool => f.write_str("bool"),
            FieldType::Text => f.write_str("text"),
            FieldType::Vector => f.write_str("vector"),
            FieldType::Enum(name) => write!(f, "enum {name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDecl {
    pub name: String,
    pub ty: FieldType,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Declared layout of a host class. Fixed once the host has loaded it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassShape {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    /// Names of enum types declared inside this class.
    pub nested_enums: Vec<String>,
}

impl ClassShape {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDecl>) -> Self {
        Self {
            name: name.into(),
            fields,
            nested_enums: Vec::new(),
        }
    }

    pub fn with_nested_enum(mut self, name: impl Into<String>) -> Self {
        self.nested_enums.push(name.into());
        self
    }

    /// Hash of the whole declaration. Two shapes sharing a name but not a
    /// layout get different fingerprints.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Whether `slot` exists and is declared with type `ty`.
    pub fn slot_has_type(&self, slot: usize, ty: &FieldType) -> bool {
        self.fields.get(slot).is_some_and(|decl| &decl.ty == ty)
    }

    /// Slot of the `ordinal`-th field declared with type `ty`.
    pub fn find_slot(&self, ty: &FieldType, ordinal: usize) -> Option<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, decl)| &decl.ty == ty)
            .nth(ordinal)
            .map(|(slot, _)| slot)
    }
}

/// A host enum type and its constants, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    pub constants: Vec<String>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            constants: constants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn constant(&self, name: &str) -> Option<EnumConstant> {
        self.constants
            .iter()
            .position(|c| c == name)
            .map(|ordinal| EnumConstant {
                enum_type: self.name.clone(),
                name: name.to_string(),
                ordinal,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant {
    pub enum_type: String,
    pub name: String,
    pub ordinal: usize,
}

/// A value stored in a host field. `Null` is an unset field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HostValue {
    #[default]
    Null,
    Int(i32),
    Long(i64),
    Double(f64),
    Bool(bool),
    Text(String),
    Vector(Vector3d),
    Enum(EnumConstant),
}

/// A host-owned structured value.
pub trait HostObject {
    fn shape(&self) -> &ClassShape;

    fn get(&self, slot: usize) -> HostValue;

    /// Must fail rather than drop a write to a slot the object does not have.
    fn set(&mut self, slot: usize, value: HostValue) -> Result<()>;
}

/// An entity the host can look up by id.
pub trait HostEntity {
    fn entity_id(&self) -> i32;
}

/// Lookups the wrappers need from the host runtime.
pub trait HostRuntime {
    type Entity: HostEntity;

    fn find_enum(&self, name: &str) -> Option<EnumType>;

    fn entity_by_id(&self, id: i32) -> Option<Self::Entity>;
}

/// Slot-vector [`HostObject`] for hosts that expose packets as plain records.
#[derive(Debug, Clone)]
pub struct DynamicObject {
    shape: Arc<ClassShape>,
    values: Vec<HostValue>,
}

impl DynamicObject {
    /// Every field starts as `Null`.
    pub fn new(shape: Arc<ClassShape>) -> Self {
        let values = vec![HostValue::Null; shape.fields.len()];
        Self { shape, values }
    }

    pub fn values(&self) -> &[HostValue] {
        &self.values
    }
}

impl HostObject for DynamicObject {
    fn shape(&self) -> &ClassShape {
        &self.shape
    }

    fn get(&self, slot: usize) -> HostValue {
        self.values.get(slot).cloned().unwrap_or_default()
    }

    fn set(&mut self, slot: usize, value: HostValue) -> Result<()> {
        let existing = self
            .values
            .get_mut(slot)
            .ok_or_else(|| ProtocolError::FieldResolutionFailure {
                shape: self.shape.name.clone(),
                field: format!("slot {slot}"),
                ordinal: slot,
            })?;
        *existing = value;
        Ok(())
    }
}

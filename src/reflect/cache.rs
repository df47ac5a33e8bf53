//! Process-wide cache of resolved field handles and enum types.
//!
//! Host shapes never change after load, so a handle resolved once is valid
//! for every instance of that shape. Inserts are idempotent: when two
//! threads resolve the same key concurrently the first stored value wins
//! and both callers get it back.

use crate::error::{constants, ProtocolError, Result};
use crate::reflect::host::{ClassShape, EnumType, FieldType};
use crate::utils::metrics::global_metrics;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Resolved location of a field within a host shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldHandle {
    pub slot: usize,
}

/// Shapes are identified by name and layout fingerprint, so a second
/// class reusing a name never sees the first one's handles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub shape: String,
    pub layout: u64,
    pub ty: FieldType,
    pub ordinal: usize,
}

impl FieldKey {
    pub fn new(shape: &ClassShape, ty: &FieldType, ordinal: usize) -> Self {
        Self {
            shape: shape.name.clone(),
            layout: shape.fingerprint(),
            ty: ty.clone(),
            ordinal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumKey {
    pub shape: String,
    pub layout: u64,
    pub logical_name: String,
}

impl EnumKey {
    pub fn new(shape: &ClassShape, logical_name: &str) -> Self {
        Self {
            shape: shape.name.clone(),
            layout: shape.fingerprint(),
            logical_name: logical_name.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ResolutionCache {
    fields: RwLock<HashMap<FieldKey, FieldHandle>>,
    enums: RwLock<HashMap<EnumKey, Arc<EnumType>>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, key: &FieldKey) -> Result<Option<FieldHandle>> {
        let fields = self
            .fields
            .read()
            .map_err(|_| ProtocolError::LockPoisoned(constants::ERR_CACHE_READ_LOCK))?;
        let hit = fields.get(key).copied();
        if hit.is_some() {
            global_metrics().resolution_cache_hit();
        }
        Ok(hit)
    }

    /// Store `handle` unless `key` is already present; returns the stored value.
    pub fn insert_field(&self, key: FieldKey, handle: FieldHandle) -> Result<FieldHandle> {
        let mut fields = self
            .fields
            .write()
            .map_err(|_| ProtocolError::LockPoisoned(constants::ERR_CACHE_WRITE_LOCK))?;
        Ok(*fields.entry(key).or_insert(handle))
    }

    pub fn enum_type(&self, key: &EnumKey) -> Result<Option<Arc<EnumType>>> {
        let enums = self
            .enums
            .read()
            .map_err(|_| ProtocolError::LockPoisoned(constants::ERR_CACHE_READ_LOCK))?;
        let hit = enums.get(key).cloned();
        if hit.is_some() {
            global_metrics().resolution_cache_hit();
        }
        Ok(hit)
    }

    pub fn insert_enum_type(&self, key: EnumKey, ty: EnumType) -> Result<Arc<EnumType>> {
        let mut enums = self
            .enums
            .write()
            .map_err(|_| ProtocolError::LockPoisoned(constants::ERR_CACHE_WRITE_LOCK))?;
        Ok(Arc::clone(enums.entry(key).or_insert_with(|| Arc::new(ty))))
    }

    pub fn field_count(&self) -> usize {
        self.fields.read().map_or(0, |f| f.len())
    }

    pub fn enum_count(&self) -> usize {
        self.enums.read().map_or(0, |e| e.len())
    }
}

static CACHE: Lazy<ResolutionCache> = Lazy::new(ResolutionCache::new);

pub fn resolution_cache() -> &'static ResolutionCache {
    &CACHE
}

//! # Reflective Field Wrapper
//!
//! Field-level access to a host-owned packet object, addressed as "the
//! N-th field of type T" rather than by name. Host builds rename fields
//! freely but keep their types and relative order, so ordinal lookup
//! survives across builds where name lookup would not.
//!
//! Handles are resolved on first use, then kept both in the wrapper and in
//! the process-wide [`ResolutionCache`](crate::reflect::cache::ResolutionCache).
//! A second access through the same wrapper never resolves again.

use crate::error::{ProtocolError, Result};
use crate::protocol::types::Vector3d;
use crate::protocol::version::ProtocolVersion;
use crate::reflect::cache::{resolution_cache, EnumKey, FieldHandle, FieldKey};
use crate::reflect::host::{
    ClassShape, EnumConstant, EnumType, FieldType, HostObject, HostRuntime, HostValue,
};
use crate::utils::metrics::global_metrics;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Resolve a host enum type by logical name.
///
/// Tries `logical_name` first; if the runtime does not know it, falls back
/// to the single enum nested inside `shape`. Results are cached per
/// `(shape, logical_name)` for the life of the process.
pub fn resolve_enum_type<R>(runtime: &R, shape: &ClassShape, logical_name: &str) -> Result<Arc<EnumType>>
where
    R: HostRuntime + ?Sized,
{
    let key = EnumKey::new(shape, logical_name);
    if let Some(hit) = resolution_cache().enum_type(&key)? {
        return Ok(hit);
    }

    let resolved = runtime.find_enum(logical_name).or_else(|| match shape.nested_enums.as_slice() {
        [only] => {
            debug!(shape = %shape.name, logical_name, nested = %only, "Enum resolved via nested fallback");
            runtime.find_enum(only)
        }
        _ => None,
    });

    let ty = resolved.ok_or_else(|| ProtocolError::FieldResolutionFailure {
        shape: shape.name.clone(),
        field: format!("enum {logical_name}"),
        ordinal: 0,
    })?;
    global_metrics().enum_resolution();
    resolution_cache().insert_enum_type(key, ty)
}

/// Ordinal field access over one host object, for one packet event.
#[derive(Debug)]
pub struct ReflectiveWrapper<'a, O: HostObject + ?Sized> {
    object: &'a mut O,
    version: ProtocolVersion,
    handles: HashMap<(FieldType, usize), FieldHandle>,
    enums: HashMap<String, Arc<EnumType>>,
    resolutions: usize,
}

impl<'a, O: HostObject + ?Sized> ReflectiveWrapper<'a, O> {
    pub fn new(object: &'a mut O, version: ProtocolVersion) -> Self {
        Self {
            object,
            version,
            handles: HashMap::new(),
            enums: HashMap::new(),
            resolutions: 0,
        }
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn object(&self) -> &O {
        self.object
    }

    /// Field handles and enum types resolved by this wrapper so far.
    pub fn resolution_count(&self) -> usize {
        self.resolutions
    }

    fn resolve(&mut self, ty: &FieldType, ordinal: usize) -> Result<FieldHandle> {
        if let Some(handle) = self.handles.get(&(ty.clone(), ordinal)) {
            return Ok(*handle);
        }

        let shape = self.object.shape();
        let key = FieldKey::new(shape, ty, ordinal);
        let handle = match resolution_cache().field(&key)? {
            Some(handle) if shape.slot_has_type(handle.slot, ty) => handle,
            Some(handle) => {
                return Err(ProtocolError::FieldResolutionFailure {
                    shape: shape.name.clone(),
                    field: format!("{ty} at slot {}", handle.slot),
                    ordinal,
                })
            }
            None => {
                let slot = shape.find_slot(ty, ordinal).ok_or_else(|| {
                    ProtocolError::FieldResolutionFailure {
                        shape: shape.name.clone(),
                        field: ty.to_string(),
                        ordinal,
                    }
                })?;
                global_metrics().field_resolution();
                trace!(shape = %shape.name, %ty, ordinal, slot, "Resolved field handle");
                resolution_cache().insert_field(key, FieldHandle { slot })?
            }
        };

        self.resolutions += 1;
        self.handles.insert((ty.clone(), ordinal), handle);
        Ok(handle)
    }

    fn mismatch(&self, ty: &FieldType, ordinal: usize) -> ProtocolError {
        ProtocolError::FieldResolutionFailure {
            shape: self.object.shape().name.clone(),
            field: ty.to_string(),
            ordinal,
        }
    }

    fn read_value(&mut self, ty: FieldType, ordinal: usize) -> Result<HostValue> {
        let handle = self.resolve(&ty, ordinal)?;
        Ok(self.object.get(handle.slot))
    }

    fn write_value(&mut self, ty: FieldType, ordinal: usize, value: HostValue) -> Result<()> {
        let handle = self.resolve(&ty, ordinal)?;
        self.object.set(handle.slot, value)
    }

    pub fn read_int(&mut self, ordinal: usize) -> Result<i32> {
        match self.read_value(FieldType::Int, ordinal)? {
            HostValue::Int(v) => Ok(v),
            _ => Err(self.mismatch(&FieldType::Int, ordinal)),
        }
    }

    pub fn write_int(&mut self, ordinal: usize, value: i32) -> Result<()> {
        self.write_value(FieldType::Int, ordinal, HostValue::Int(value))
    }

    pub fn read_long(&mut self, ordinal: usize) -> Result<i64> {
        match self.read_value(FieldType::Long, ordinal)? {
            HostValue::Long(v) => Ok(v),
            _ => Err(self.mismatch(&FieldType::Long, ordinal)),
        }
    }

    pub fn write_long(&mut self, ordinal: usize, value: i64) -> Result<()> {
        self.write_value(FieldType::Long, ordinal, HostValue::Long(value))
    }

    pub fn read_double(&mut self, ordinal: usize) -> Result<f64> {
        match self.read_value(FieldType::Double, ordinal)? {
            HostValue::Double(v) => Ok(v),
            _ => Err(self.mismatch(&FieldType::Double, ordinal)),
        }
    }

    pub fn write_double(&mut self, ordinal: usize, value: f64) -> Result<()> {
        self.write_value(FieldType::Double, ordinal, HostValue::Double(value))
    }

    pub fn read_bool(&mut self, ordinal: usize) -> Result<bool> {
        match self.read_value(FieldType::Bool, ordinal)? {
            HostValue::Bool(v) => Ok(v),
            _ => Err(self.mismatch(&FieldType::Bool, ordinal)),
        }
    }

    pub fn write_bool(&mut self, ordinal: usize, value: bool) -> Result<()> {
        self.write_value(FieldType::Bool, ordinal, HostValue::Bool(value))
    }

    /// `None` when the host left the field unset.
    pub fn read_text(&mut self, ordinal: usize) -> Result<Option<String>> {
        match self.read_value(FieldType::Text, ordinal)? {
            HostValue::Text(v) => Ok(Some(v)),
            HostValue::Null => Ok(None),
            _ => Err(self.mismatch(&FieldType::Text, ordinal)),
        }
    }

    pub fn write_text(&mut self, ordinal: usize, value: impl Into<String>) -> Result<()> {
        self.write_value(FieldType::Text, ordinal, HostValue::Text(value.into()))
    }

    /// `None` when the host left the field unset.
    pub fn read_vector(&mut self, ordinal: usize) -> Result<Option<Vector3d>> {
        match self.read_value(FieldType::Vector, ordinal)? {
            HostValue::Vector(v) => Ok(Some(v)),
            HostValue::Null => Ok(None),
            _ => Err(self.mismatch(&FieldType::Vector, ordinal)),
        }
    }

    pub fn write_vector(&mut self, ordinal: usize, value: Option<Vector3d>) -> Result<()> {
        let value = value.map_or(HostValue::Null, HostValue::Vector);
        self.write_value(FieldType::Vector, ordinal, value)
    }

    /// Resolve an enum type for this object's shape, caching it on the wrapper.
    pub fn resolve_enum_type<R>(&mut self, runtime: &R, logical_name: &str) -> Result<Arc<EnumType>>
    where
        R: HostRuntime + ?Sized,
    {
        if let Some(ty) = self.enums.get(logical_name) {
            return Ok(Arc::clone(ty));
        }
        let ty = resolve_enum_type(runtime, self.object.shape(), logical_name)?;
        self.resolutions += 1;
        self.enums.insert(logical_name.to_string(), Arc::clone(&ty));
        Ok(ty)
    }

    /// Current constant of the `ordinal`-th field of `enum_type`; `None` if unset.
    pub fn read_enum(&mut self, enum_type: &EnumType, ordinal: usize) -> Result<Option<EnumConstant>> {
        let ty = FieldType::Enum(enum_type.name.clone());
        match self.read_value(ty.clone(), ordinal)? {
            HostValue::Enum(constant) => Ok(Some(constant)),
            HostValue::Null => Ok(None),
            _ => Err(self.mismatch(&ty, ordinal)),
        }
    }

    /// Store the constant named `constant` into the `ordinal`-th field of `enum_type`.
    pub fn write_enum(&mut self, enum_type: &EnumType, ordinal: usize, constant: &str) -> Result<()> {
        let value = enum_type
            .constant(constant)
            .ok_or_else(|| ProtocolError::UnknownEnumConstant {
                enum_type: enum_type.name.clone(),
                value: constant.to_string(),
            })?;
        self.write_value(FieldType::Enum(enum_type.name.clone()), ordinal, HostValue::Enum(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::host::{DynamicObject, FieldDecl, HostEntity};

    struct NoEntity;

    impl HostEntity for NoEntity {
        fn entity_id(&self) -> i32 {
            0
        }
    }

    struct Runtime {
        enums: Vec<EnumType>,
    }

    impl HostRuntime for Runtime {
        type Entity = NoEntity;

        fn find_enum(&self, name: &str) -> Option<EnumType> {
            self.enums.iter().find(|e| e.name == name).cloned()
        }

        fn entity_by_id(&self, _id: i32) -> Option<NoEntity> {
            None
        }
    }

    fn object(shape_name: &str) -> DynamicObject {
        DynamicObject::new(Arc::new(
            ClassShape::new(
                shape_name,
                vec![
                    FieldDecl::new("a", FieldType::Int),
                    FieldDecl::new("b", FieldType::Long),
                    FieldDecl::new("c", FieldType::Int),
                    FieldDecl::new("d", FieldType::Enum("Mode".into())),
                ],
            )
            .with_nested_enum("Mode"),
        ))
    }

    #[test]
    fn test_field_resolved_once_per_wrapper() {
        let mut obj = object("wrapper::once");
        let mut wrapper = ReflectiveWrapper::new(&mut obj, ProtocolVersion::V1_12);

        wrapper.write_int(1, 40).unwrap();
        assert_eq!(wrapper.read_int(1).unwrap(), 40);
        assert_eq!(wrapper.read_int(1).unwrap(), 40);
        assert_eq!(wrapper.resolution_count(), 1);

        wrapper.write_long(0, -3).unwrap();
        assert_eq!(wrapper.read_long(0).unwrap(), -3);
        assert_eq!(wrapper.resolution_count(), 2);
        assert_eq!(obj.values()[2], HostValue::Int(40));
    }

    #[test]
    fn test_missing_ordinal_is_resolution_failure() {
        let mut obj = object("wrapper::missing");
        let mut wrapper = ReflectiveWrapper::new(&mut obj, ProtocolVersion::V1_12);
        let err = wrapper.read_int(2).unwrap_err();
        match err {
            ProtocolError::FieldResolutionFailure { shape, ordinal, .. } => {
                assert_eq!(shape, "wrapper::missing");
                assert_eq!(ordinal, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(wrapper.read_bool(0).is_err());
    }

    #[test]
    fn test_unset_int_is_type_mismatch() {
        let mut obj = object("wrapper::unset");
        let mut wrapper = ReflectiveWrapper::new(&mut obj, ProtocolVersion::V1_12);
        assert!(matches!(
            wrapper.read_int(0),
            Err(ProtocolError::FieldResolutionFailure { .. })
        ));
    }

    #[test]
    fn test_enum_nested_fallback_and_write() {
        let runtime = Runtime {
            enums: vec![EnumType::new("Mode", ["ON", "OFF"])],
        };
        let mut obj = object("wrapper::enum");
        let mut wrapper = ReflectiveWrapper::new(&mut obj, ProtocolVersion::V1_12);

        // "Switch" is unknown; the single nested enum answers
        let mode = wrapper.resolve_enum_type(&runtime, "Switch").unwrap();
        assert_eq!(mode.name, "Mode");
        assert_eq!(wrapper.read_enum(&mode, 0).unwrap(), None);

        wrapper.write_enum(&mode, 0, "OFF").unwrap();
        assert_eq!(wrapper.read_enum(&mode, 0).unwrap().unwrap().ordinal, 1);

        let err = wrapper.write_enum(&mode, 0, "DIM").unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownEnumConstant { .. }));
        assert_eq!(wrapper.read_enum(&mode, 0).unwrap().unwrap().name, "OFF");
    }

    #[test]
    fn test_same_name_different_layout_resolves_separately() {
        let mut wide = DynamicObject::new(Arc::new(ClassShape::new(
            "wrapper::renamed",
            vec![
                FieldDecl::new("a", FieldType::Long),
                FieldDecl::new("b", FieldType::Long),
                FieldDecl::new("c", FieldType::Int),
            ],
        )));
        ReflectiveWrapper::new(&mut wide, ProtocolVersion::V1_12)
            .write_int(0, 5)
            .unwrap();
        assert_eq!(wide.values()[2], HostValue::Int(5));

        let mut narrow = DynamicObject::new(Arc::new(ClassShape::new(
            "wrapper::renamed",
            vec![FieldDecl::new("a", FieldType::Int)],
        )));
        let mut wrapper = ReflectiveWrapper::new(&mut narrow, ProtocolVersion::V1_12);
        wrapper.write_int(0, 9).unwrap();
        assert_eq!(wrapper.read_int(0).unwrap(), 9);
        assert_eq!(narrow.values(), [HostValue::Int(9)].as_slice());
    }

    #[test]
    fn test_stale_cached_handle_is_rejected() {
        let shape = ClassShape::new("wrapper::stale", vec![FieldDecl::new("a", FieldType::Int)]);
        resolution_cache()
            .insert_field(FieldKey::new(&shape, &FieldType::Int, 0), FieldHandle { slot: 3 })
            .unwrap();
        let mut obj = DynamicObject::new(Arc::new(shape));
        let mut wrapper = ReflectiveWrapper::new(&mut obj, ProtocolVersion::V1_12);
        assert!(matches!(
            wrapper.write_int(0, 1),
            Err(ProtocolError::FieldResolutionFailure { .. })
        ));
        assert_eq!(obj.values(), [HostValue::Null].as_slice());
    }

    #[test]
    fn test_enum_unresolvable() {
        let runtime = Runtime { enums: vec![] };
        let shape = ClassShape::new("wrapper::noenum", vec![]);
        let err = resolve_enum_type(&runtime, &shape, "EnumHand").unwrap_err();
        assert!(matches!(err, ProtocolError::FieldResolutionFailure { .. }));
    }
}

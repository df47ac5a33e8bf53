#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Reflective field access against a host model with renamed types

use std::cell::RefCell;
use std::sync::Arc;
use versioned_protocol::error::ProtocolError;
use versioned_protocol::protocol::types::{EntityUseAction, Hand, Vector3d};
use versioned_protocol::protocol::version::ProtocolVersion;
use versioned_protocol::reflect::use_entity::{CAPABILITIES, HAND_ENUM};
use versioned_protocol::reflect::{
    ClassShape, DynamicObject, EnumType, FieldDecl, FieldType, HostEntity, HostObject, HostRuntime,
    HostValue, ReflectiveWrapper, WrappedUseEntity,
};

#[derive(Debug, Clone, PartialEq)]
struct Zombie {
    id: i32,
}

impl HostEntity for Zombie {
    fn entity_id(&self) -> i32 {
        self.id
    }
}

/// A host build whose action enum is only reachable as a nested type.
struct ObfuscatedHost {
    enum_queries: RefCell<Vec<String>>,
}

impl ObfuscatedHost {
    fn new() -> Self {
        Self {
            enum_queries: RefCell::new(Vec::new()),
        }
    }
}

impl HostRuntime for ObfuscatedHost {
    type Entity = Zombie;

    fn find_enum(&self, name: &str) -> Option<EnumType> {
        self.enum_queries.borrow_mut().push(name.to_string());
        match name {
            "PacketPlayInUseEntity$a" => {
                Some(EnumType::new(name, ["INTERACT", "ATTACK", "INTERACT_AT"]))
            }
            "EnumHand" => Some(EnumType::new(name, ["MAIN_HAND", "OFF_HAND"])),
            _ => None,
        }
    }

    fn entity_by_id(&self, id: i32) -> Option<Zombie> {
        (id == 77).then_some(Zombie { id })
    }
}

fn use_entity_object(shape_name: &str) -> DynamicObject {
    let shape = ClassShape::new(
        shape_name,
        vec![
            FieldDecl::new("a", FieldType::Int),
            FieldDecl::new("action", FieldType::Enum("PacketPlayInUseEntity$a".into())),
            FieldDecl::new("c", FieldType::Vector),
            FieldDecl::new("d", FieldType::Enum("EnumHand".into())),
        ],
    )
    .with_nested_enum("PacketPlayInUseEntity$a");
    let mut obj = DynamicObject::new(Arc::new(shape));
    obj.set(0, HostValue::Int(77)).unwrap();
    obj
}

#[test]
fn test_action_resolved_through_nested_enum() {
    let host = ObfuscatedHost::new();
    let mut obj = use_entity_object("reflective::nested");
    let mut wrapped = WrappedUseEntity::new(&mut obj, &host, ProtocolVersion::V1_12_2);

    wrapped.set_action(EntityUseAction::InteractAt).unwrap();
    assert_eq!(wrapped.action().unwrap(), EntityUseAction::InteractAt);

    let queries = host.enum_queries.borrow();
    assert_eq!(
        queries.as_slice(),
        ["EnumEntityUseAction", "PacketPlayInUseEntity$a"]
    );
}

#[test]
fn test_full_use_entity_rewrite() {
    let host = ObfuscatedHost::new();
    let mut obj = use_entity_object("reflective::rewrite");
    {
        let mut wrapped = WrappedUseEntity::new(&mut obj, &host, ProtocolVersion::V1_20_5);
        assert_eq!(wrapped.entity().unwrap(), Some(&Zombie { id: 77 }));

        wrapped.set_action(EntityUseAction::InteractAt).unwrap();
        wrapped.set_target(Some(Vector3d::new(0.5, 1.0, -0.5))).unwrap();
        wrapped.set_hand(Hand::OffHand).unwrap();
        wrapped.set_entity_id(5).unwrap();
        assert_eq!(wrapped.entity().unwrap(), None);
        assert_eq!(wrapped.target().unwrap(), Some(Vector3d::new(0.5, 1.0, -0.5)));
    }

    let values = obj.values();
    assert_eq!(values[0], HostValue::Int(5));
    assert_eq!(values[2], HostValue::Vector(Vector3d::new(0.5, 1.0, -0.5)));
    match &values[3] {
        HostValue::Enum(c) => {
            assert_eq!(c.enum_type, HAND_ENUM);
            assert_eq!(c.name, "OFF_HAND");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_gate_failure_reports_range_and_version() {
    let host = ObfuscatedHost::new();
    let mut obj = use_entity_object("reflective::gate");
    let before = obj.values().to_vec();
    let err = {
        let mut wrapped = WrappedUseEntity::new(&mut obj, &host, ProtocolVersion::V1_8);
        wrapped.set_hand(Hand::OffHand).unwrap_err()
    };
    match err {
        ProtocolError::UnsupportedOperation {
            operation,
            range,
            version,
        } => {
            assert_eq!(operation, "set_hand");
            assert_eq!(range.min(), ProtocolVersion::V1_9);
            assert_eq!(range.max(), None);
            assert_eq!(version, ProtocolVersion::V1_8);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(obj.values(), before.as_slice());
}

#[test]
fn test_every_capability_rejects_1_7() {
    for capability in CAPABILITIES {
        assert!(capability.check(ProtocolVersion::V1_7_10).is_err());
        assert!(capability.check(ProtocolVersion::latest()).is_ok());
    }
}

#[test]
fn test_resolution_count_tracks_distinct_fields() {
    let mut obj = use_entity_object("reflective::count");
    let mut wrapper = ReflectiveWrapper::new(&mut obj, ProtocolVersion::V1_16);
    for _ in 0..10 {
        wrapper.read_int(0).unwrap();
    }
    assert_eq!(wrapper.resolution_count(), 1);
    wrapper.read_vector(0).unwrap();
    assert_eq!(wrapper.resolution_count(), 2);

    // a fresh wrapper re-resolves locally but hits the shared cache
    let mut other = ReflectiveWrapper::new(&mut obj, ProtocolVersion::V1_16);
    assert_eq!(other.read_int(0).unwrap(), 77);
    assert_eq!(other.resolution_count(), 1);
}

#[test]
fn test_foreign_shape_fails_resolution() {
    let host = ObfuscatedHost::new();
    let mut obj = DynamicObject::new(Arc::new(ClassShape::new(
        "reflective::foreign",
        vec![FieldDecl::new("x", FieldType::Long)],
    )));
    let mut wrapped = WrappedUseEntity::new(&mut obj, &host, ProtocolVersion::V1_16);
    assert!(matches!(
        wrapped.entity_id(),
        Err(ProtocolError::FieldResolutionFailure { .. })
    ));
    assert!(matches!(
        wrapped.action(),
        Err(ProtocolError::FieldResolutionFailure { .. })
    ));
}

//! Reflective view of the host's use-entity packet.
//!
//! Host layout, by type ordinal:
//! - int #0: target entity id
//! - enum action #0: interaction kind
//! - vector #0: interaction point (1.8 and later)
//! - enum hand #0: hand used (1.9 and later)
//!
//! The target only means something for `INTERACT_AT` and the hand only for
//! the two interact actions. Outside those the getters report the neutral
//! value and the setters leave the object alone.

use crate::error::{ProtocolError, Result};
use crate::protocol::gate::{Capability, CapabilityRange};
use crate::protocol::types::{EntityUseAction, Hand, Vector3d};
use crate::protocol::version::ProtocolVersion;
use crate::reflect::host::{HostEntity, HostObject, HostRuntime};
use crate::reflect::wrapper::ReflectiveWrapper;
use tracing::debug;

/// Host enum name of the action field.
pub const ACTION_ENUM: &str = "EnumEntityUseAction";
/// Host enum name of the hand field.
pub const HAND_ENUM: &str = "EnumHand";

pub const GET_TARGET: Capability =
    Capability::new("get_target", CapabilityRange::since(ProtocolVersion::V1_8));
pub const SET_TARGET: Capability =
    Capability::new("set_target", CapabilityRange::since(ProtocolVersion::V1_8));
pub const SET_HAND: Capability =
    Capability::new("set_hand", CapabilityRange::since(ProtocolVersion::V1_9));

/// Every version-gated operation on [`WrappedUseEntity`].
pub const CAPABILITIES: &[Capability] = &[GET_TARGET, SET_TARGET, SET_HAND];

pub struct WrappedUseEntity<'a, R, O>
where
    R: HostRuntime,
    O: HostObject + ?Sized,
{
    wrapper: ReflectiveWrapper<'a, O>,
    runtime: &'a R,
    entity_id: Option<i32>,
    // Outer None: not looked up yet. Inner None: no such entity.
    entity: Option<Option<R::Entity>>,
}

impl<'a, R, O> WrappedUseEntity<'a, R, O>
where
    R: HostRuntime,
    O: HostObject + ?Sized,
{
    pub fn new(object: &'a mut O, runtime: &'a R, version: ProtocolVersion) -> Self {
        Self {
            wrapper: ReflectiveWrapper::new(object, version),
            runtime,
            entity_id: None,
            entity: None,
        }
    }

    pub fn version(&self) -> ProtocolVersion {
        self.wrapper.version()
    }

    pub fn wrapper(&self) -> &ReflectiveWrapper<'a, O> {
        &self.wrapper
    }

    pub fn entity_id(&mut self) -> Result<i32> {
        if let Some(id) = self.entity_id {
            return Ok(id);
        }
        let id = self.wrapper.read_int(0)?;
        self.entity_id = Some(id);
        Ok(id)
    }

    /// Rewrites the id and drops the previously resolved entity.
    pub fn set_entity_id(&mut self, id: i32) -> Result<()> {
        self.wrapper.write_int(0, id)?;
        self.entity_id = Some(id);
        self.entity = None;
        Ok(())
    }

    /// Entity referenced by the id field, looked up on first call.
    pub fn entity(&mut self) -> Result<Option<&R::Entity>> {
        if self.entity.is_none() {
            let id = self.entity_id()?;
            self.entity = Some(self.runtime.entity_by_id(id));
        }
        Ok(self.entity.as_ref().and_then(Option::as_ref))
    }

    pub fn set_entity(&mut self, entity: R::Entity) -> Result<()> {
        self.set_entity_id(entity.entity_id())?;
        self.entity = Some(Some(entity));
        Ok(())
    }

    /// Falls back to [`EntityUseAction::Interact`] when the host left the field unset.
    pub fn action(&mut self) -> Result<EntityUseAction> {
        let ty = self.wrapper.resolve_enum_type(self.runtime, ACTION_ENUM)?;
        match self.wrapper.read_enum(&ty, 0)? {
            Some(constant) => EntityUseAction::from_name(&constant.name).ok_or(
                ProtocolError::UnknownEnumConstant {
                    enum_type: ty.name.clone(),
                    value: constant.name,
                },
            ),
            None => {
                debug!("Use-entity action unset, assuming INTERACT");
                Ok(EntityUseAction::default())
            }
        }
    }

    pub fn set_action(&mut self, action: EntityUseAction) -> Result<()> {
        let ty = self.wrapper.resolve_enum_type(self.runtime, ACTION_ENUM)?;
        self.wrapper.write_enum(&ty, 0, action.name())
    }

    /// `None` unless the action is [`EntityUseAction::InteractAt`].
    pub fn target(&mut self) -> Result<Option<Vector3d>> {
        GET_TARGET.check(self.version())?;
        if self.action()? != EntityUseAction::InteractAt {
            return Ok(None);
        }
        self.wrapper.read_vector(0)
    }

    pub fn set_target(&mut self, target: Option<Vector3d>) -> Result<()> {
        SET_TARGET.check(self.version())?;
        let action = self.action()?;
        if action != EntityUseAction::InteractAt {
            debug!(%action, "Target ignored for non INTERACT_AT action");
            return Ok(());
        }
        self.wrapper.write_vector(0, target)
    }

    /// Main hand before 1.9, for attacks, or when the host left the field unset.
    pub fn hand(&mut self) -> Result<Hand> {
        if !SET_HAND.is_supported(self.version()) {
            return Ok(Hand::MainHand);
        }
        if self.action()? == EntityUseAction::Attack {
            return Ok(Hand::MainHand);
        }
        let ty = self.wrapper.resolve_enum_type(self.runtime, HAND_ENUM)?;
        match self.wrapper.read_enum(&ty, 0)? {
            Some(constant) => {
                Hand::from_name(&constant.name).ok_or(ProtocolError::UnknownEnumConstant {
                    enum_type: ty.name.clone(),
                    value: constant.name,
                })
            }
            None => Ok(Hand::MainHand),
        }
    }

    pub fn set_hand(&mut self, hand: Hand) -> Result<()> {
        SET_HAND.check(self.version())?;
        if self.action()? == EntityUseAction::Attack {
            debug!("Hand ignored for ATTACK action");
            return Ok(());
        }
        let ty = self.wrapper.resolve_enum_type(self.runtime, HAND_ENUM)?;
        self.wrapper.write_enum(&ty, 0, hand.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::host::{ClassShape, DynamicObject, EnumType, FieldDecl, FieldType, HostValue};
    use std::cell::Cell;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    struct Mob(i32);

    impl HostEntity for Mob {
        fn entity_id(&self) -> i32 {
            self.0
        }
    }

    #[derive(Default)]
    struct World {
        lookups: Cell<usize>,
    }

    impl HostRuntime for World {
        type Entity = Mob;

        fn find_enum(&self, name: &str) -> Option<EnumType> {
            match name {
                ACTION_ENUM => Some(EnumType::new(ACTION_ENUM, ["INTERACT", "ATTACK", "INTERACT_AT"])),
                HAND_ENUM => Some(EnumType::new(HAND_ENUM, ["MAIN_HAND", "OFF_HAND"])),
                _ => None,
            }
        }

        fn entity_by_id(&self, id: i32) -> Option<Mob> {
            self.lookups.set(self.lookups.get() + 1);
            (id > 0).then_some(Mob(id))
        }
    }

    fn packet(name: &str) -> DynamicObject {
        let mut obj = DynamicObject::new(Arc::new(ClassShape::new(
            name,
            vec![
                FieldDecl::new("a", FieldType::Int),
                FieldDecl::new("action", FieldType::Enum(ACTION_ENUM.into())),
                FieldDecl::new("c", FieldType::Vector),
                FieldDecl::new("d", FieldType::Enum(HAND_ENUM.into())),
            ],
        )));
        obj.set(0, HostValue::Int(12)).unwrap();
        obj
    }

    #[test]
    fn test_entity_lookup_is_lazy_and_invalidated() {
        let world = World::default();
        let mut obj = packet("use_entity::lazy");
        let mut wrapped = WrappedUseEntity::new(&mut obj, &world, ProtocolVersion::V1_12);

        assert_eq!(wrapped.entity().unwrap(), Some(&Mob(12)));
        assert_eq!(wrapped.entity().unwrap(), Some(&Mob(12)));
        assert_eq!(world.lookups.get(), 1);

        wrapped.set_entity_id(-1).unwrap();
        assert_eq!(wrapped.entity().unwrap(), None);
        assert_eq!(world.lookups.get(), 2);

        wrapped.set_entity(Mob(30)).unwrap();
        assert_eq!(wrapped.entity_id().unwrap(), 30);
        assert_eq!(wrapped.entity().unwrap(), Some(&Mob(30)));
        assert_eq!(world.lookups.get(), 2);
    }

    #[test]
    fn test_unset_action_and_hand_use_defaults() {
        let world = World::default();
        let mut obj = packet("use_entity::defaults");
        let mut wrapped = WrappedUseEntity::new(&mut obj, &world, ProtocolVersion::V1_16);
        assert_eq!(wrapped.action().unwrap(), EntityUseAction::Interact);
        assert_eq!(wrapped.hand().unwrap(), Hand::MainHand);

        wrapped.set_action(EntityUseAction::InteractAt).unwrap();
        wrapped.set_hand(Hand::OffHand).unwrap();
        assert_eq!(wrapped.action().unwrap(), EntityUseAction::InteractAt);
        assert_eq!(wrapped.hand().unwrap(), Hand::OffHand);
        assert_eq!(wrapped.target().unwrap(), None);
    }

    #[test]
    fn test_attack_ignores_hand_and_target() {
        let world = World::default();
        let mut obj = packet("use_entity::attack");
        {
            let mut wrapped = WrappedUseEntity::new(&mut obj, &world, ProtocolVersion::V1_16);
            wrapped.set_action(EntityUseAction::Attack).unwrap();
            wrapped.set_hand(Hand::OffHand).unwrap();
            wrapped.set_target(Some(Vector3d::new(1.0, 2.0, 3.0))).unwrap();
            assert_eq!(wrapped.hand().unwrap(), Hand::MainHand);
            assert_eq!(wrapped.target().unwrap(), None);
        }
        assert_eq!(obj.values()[2], HostValue::Null);
        assert_eq!(obj.values()[3], HostValue::Null);
    }

    #[test]
    fn test_target_only_for_interact_at() {
        let world = World::default();
        let mut obj = packet("use_entity::target");
        let mut wrapped = WrappedUseEntity::new(&mut obj, &world, ProtocolVersion::V1_16);
        let point = Vector3d::new(0.5, 1.0, 0.5);

        // unset action reads as INTERACT
        wrapped.set_target(Some(point)).unwrap();
        assert_eq!(wrapped.target().unwrap(), None);

        wrapped.set_action(EntityUseAction::InteractAt).unwrap();
        wrapped.set_target(Some(point)).unwrap();
        assert_eq!(wrapped.target().unwrap(), Some(point));

        // stored point is hidden once the action changes
        wrapped.set_action(EntityUseAction::Interact).unwrap();
        assert_eq!(wrapped.target().unwrap(), None);
    }

    #[test]
    fn test_gated_setters_leave_object_untouched() {
        let world = World::default();
        let mut obj = packet("use_entity::gates");
        let before = obj.values().to_vec();
        {
            let mut wrapped = WrappedUseEntity::new(&mut obj, &world, ProtocolVersion::V1_7_10);
            let err = wrapped.set_target(Some(Vector3d::new(1.0, 2.0, 3.0))).unwrap_err();
            assert!(matches!(err, ProtocolError::UnsupportedOperation { operation: "set_target", .. }));
            assert!(wrapped.target().is_err());
            assert!(wrapped.set_hand(Hand::OffHand).is_err());
            assert_eq!(wrapped.hand().unwrap(), Hand::MainHand);
        }
        assert_eq!(obj.values(), before.as_slice());
    }

    #[test]
    fn test_capabilities_cover_gated_operations() {
        let names: Vec<_> = CAPABILITIES.iter().map(|c| c.operation).collect();
        assert_eq!(names, ["get_target", "set_target", "set_hand"]);
        assert!(SET_HAND.is_supported(ProtocolVersion::V1_9));
        assert!(!SET_HAND.is_supported(ProtocolVersion::V1_8));
    }
}

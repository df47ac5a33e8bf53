//! Interact-entity: a client attacking or using an entity.

use crate::core::packet::{PacketData, PacketReader, PacketWriter};
use crate::core::rules::{
    Presence, ENTITY_ID, INTERACT_ACTION, INTERACT_HAND, INTERACT_SNEAKING, INTERACT_TARGET,
};
use crate::error::{ProtocolError, Result};
use crate::protocol::types::{EntityUseAction, Hand, Vector3f};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractAction {
    Interact { hand: Hand },
    Attack,
    /// Interaction at a point relative to the entity; 1.8 and later.
    InteractAt { target: Vector3f, hand: Hand },
}

impl InteractAction {
    pub fn kind(&self) -> EntityUseAction {
        match self {
            InteractAction::Interact { .. } => EntityUseAction::Interact,
            InteractAction::Attack => EntityUseAction::Attack,
            InteractAction::InteractAt { .. } => EntityUseAction::InteractAt,
        }
    }

    fn wire_id(&self) -> i64 {
        match self {
            InteractAction::Interact { .. } => 0,
            InteractAction::Attack => 1,
            InteractAction::InteractAt { .. } => 2,
        }
    }

    fn hand(&self) -> Option<Hand> {
        match self {
            InteractAction::Interact { hand } | InteractAction::InteractAt { hand, .. } => {
                Some(*hand)
            }
            InteractAction::Attack => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractEntity {
    pub entity_id: i32,
    pub action: InteractAction,
    /// Carried from 1.16; always `false` when decoded from older versions.
    pub sneaking: bool,
}

impl PacketData for InteractEntity {
    fn read_data(reader: &mut PacketReader<'_>) -> Result<Self> {
        let version = reader.version();
        let entity_id = reader.read_versioned_int(&ENTITY_ID)? as i32;
        let action_id = reader.read_versioned_int(&INTERACT_ACTION)?;
        let has_target = INTERACT_TARGET.select(version) == Presence::Present;

        let target = match action_id {
            0 | 1 => None,
            2 if has_target => Some(Vector3f::new(
                reader.read_f32()?,
                reader.read_f32()?,
                reader.read_f32()?,
            )),
            other => {
                return Err(ProtocolError::UnknownEnumConstant {
                    enum_type: "EntityUseAction".to_string(),
                    value: other.to_string(),
                })
            }
        };

        let hand = if action_id != 1 && INTERACT_HAND.select(version) == Presence::Present {
            let raw = reader.read_var_int()?;
            Hand::from_id(raw).ok_or_else(|| ProtocolError::UnknownEnumConstant {
                enum_type: "Hand".to_string(),
                value: raw.to_string(),
            })?
        } else {
            Hand::MainHand
        };

        let action = match (action_id, target) {
            (1, _) => InteractAction::Attack,
            (_, Some(target)) => InteractAction::InteractAt { target, hand },
            _ => InteractAction::Interact { hand },
        };

        let sneaking = match INTERACT_SNEAKING.select(version) {
            Presence::Present => reader.read_bool()?,
            Presence::Absent => false,
        };

        Ok(Self {
            entity_id,
            action,
            sneaking,
        })
    }

    fn write_data(&self, writer: &mut PacketWriter<'_>) -> Result<()> {
        let version = writer.version();
        let has_target = INTERACT_TARGET.select(version) == Presence::Present;
        let has_hand = INTERACT_HAND.select(version) == Presence::Present;
        let has_sneaking = INTERACT_SNEAKING.select(version) == Presence::Present;

        if matches!(self.action, InteractAction::InteractAt { .. }) && !has_target {
            return Err(writer.unrepresentable(INTERACT_TARGET.field()));
        }
        if self.action.hand() == Some(Hand::OffHand) && !has_hand {
            return Err(writer.unrepresentable(INTERACT_HAND.field()));
        }
        if self.sneaking && !has_sneaking {
            return Err(writer.unrepresentable(INTERACT_SNEAKING.field()));
        }

        writer.write_versioned_int(&ENTITY_ID, i64::from(self.entity_id));
        writer.write_versioned_int(&INTERACT_ACTION, self.action.wire_id());
        if let InteractAction::InteractAt { target, .. } = self.action {
            writer.write_f32(target.x);
            writer.write_f32(target.y);
            writer.write_f32(target.z);
        }
        if let (Some(hand), true) = (self.action.hand(), has_hand) {
            writer.write_var_int(hand.id());
        }
        if has_sneaking {
            writer.write_bool(self.sneaking);
        }
        Ok(())
    }
}

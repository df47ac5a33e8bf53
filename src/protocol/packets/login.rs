//! Login start: the player's name and, on newer versions, their UUID.

use crate::core::packet::{PacketData, PacketReader, PacketWriter};
use crate::core::rules::{UuidWire, LOGIN_UUID};
use crate::error::Result;
use uuid::Uuid;

/// Longest username accepted by the protocol.
pub const MAX_USERNAME_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginStart {
    pub username: String,
    /// Required from 1.20.2, optional from 1.19.3, absent before.
    pub player_uuid: Option<Uuid>,
}

impl PacketData for LoginStart {
    fn read_data(reader: &mut PacketReader<'_>) -> Result<Self> {
        let username = reader.read_string(MAX_USERNAME_LEN)?;
        let player_uuid = match LOGIN_UUID.select(reader.version()) {
            UuidWire::Required => Some(reader.read_uuid()?),
            UuidWire::Optional => {
                if reader.read_bool()? {
                    Some(reader.read_uuid()?)
                } else {
                    None
                }
            }
            UuidWire::Absent => None,
        };
        Ok(Self {
            username,
            player_uuid,
        })
    }

    fn write_data(&self, writer: &mut PacketWriter<'_>) -> Result<()> {
        let wire = LOGIN_UUID.select(writer.version());
        match (wire, self.player_uuid) {
            (UuidWire::Required, None) | (UuidWire::Absent, Some(_)) => {
                return Err(writer.unrepresentable(LOGIN_UUID.field()));
            }
            _ => {}
        }
        writer.write_string(&self.username, MAX_USERNAME_LEN)?;
        match (wire, self.player_uuid) {
            (UuidWire::Required, Some(uuid)) => writer.write_uuid(uuid),
            (UuidWire::Optional, Some(uuid)) => {
                writer.write_bool(true);
                writer.write_uuid(uuid);
            }
            (UuidWire::Optional, None) => writer.write_bool(false),
            _ => {}
        }
        Ok(())
    }
}

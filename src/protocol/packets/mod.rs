//! # Packet Definitions
//!
//! Typed packet values and the single mapping from [`PacketTypeId`] to the
//! [`PacketData`] implementation that decodes it.

mod handshake;
mod interact;
mod keep_alive;
mod login;
mod status;

pub use handshake::{Handshake, MAX_ADDRESS_LEN};
pub use interact::{InteractAction, InteractEntity};
pub use keep_alive::KeepAlive;
pub use login::{LoginStart, MAX_USERNAME_LEN};
pub use status::StatusPing;

use crate::core::packet::{PacketData, PacketReader, PacketWriter};
use crate::error::Result;
use crate::protocol::catalog::PacketTypeId;

/// A decoded packet; one variant per [`PacketTypeId`].
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Handshake(Handshake),
    StatusPing(StatusPing),
    LoginStart(LoginStart),
    ConfigKeepAliveServerbound(KeepAlive),
    ConfigKeepAliveClientbound(KeepAlive),
    PlayKeepAliveServerbound(KeepAlive),
    PlayKeepAliveClientbound(KeepAlive),
    PlayInteractEntity(InteractEntity),
}

impl Packet {
    pub fn type_id(&self) -> PacketTypeId {
        match self {
            Packet::Handshake(_) => PacketTypeId::Handshake,
            Packet::StatusPing(_) => PacketTypeId::StatusPing,
            Packet::LoginStart(_) => PacketTypeId::LoginStart,
            Packet::ConfigKeepAliveServerbound(_) => PacketTypeId::ConfigKeepAliveServerbound,
            Packet::ConfigKeepAliveClientbound(_) => PacketTypeId::ConfigKeepAliveClientbound,
            Packet::PlayKeepAliveServerbound(_) => PacketTypeId::PlayKeepAliveServerbound,
            Packet::PlayKeepAliveClientbound(_) => PacketTypeId::PlayKeepAliveClientbound,
            Packet::PlayInteractEntity(_) => PacketTypeId::PlayInteractEntity,
        }
    }

    /// Decode the reader's payload as its packet type.
    pub fn read_as(reader: &mut PacketReader<'_>) -> Result<Self> {
        Ok(match reader.packet_type() {
            PacketTypeId::Handshake => Packet::Handshake(Handshake::read_data(reader)?),
            PacketTypeId::StatusPing => Packet::StatusPing(StatusPing::read_data(reader)?),
            PacketTypeId::LoginStart => Packet::LoginStart(LoginStart::read_data(reader)?),
            PacketTypeId::ConfigKeepAliveServerbound => {
                Packet::ConfigKeepAliveServerbound(KeepAlive::read_data(reader)?)
            }
            PacketTypeId::ConfigKeepAliveClientbound => {
                Packet::ConfigKeepAliveClientbound(KeepAlive::read_data(reader)?)
            }
            PacketTypeId::PlayKeepAliveServerbound => {
                Packet::PlayKeepAliveServerbound(KeepAlive::read_data(reader)?)
            }
            PacketTypeId::PlayKeepAliveClientbound => {
                Packet::PlayKeepAliveClientbound(KeepAlive::read_data(reader)?)
            }
            PacketTypeId::PlayInteractEntity => {
                Packet::PlayInteractEntity(InteractEntity::read_data(reader)?)
            }
        })
    }

    pub fn write_to(&self, writer: &mut PacketWriter<'_>) -> Result<()> {
        match self {
            Packet::Handshake(p) => p.write_data(writer),
            Packet::StatusPing(p) => p.write_data(writer),
            Packet::LoginStart(p) => p.write_data(writer),
            Packet::ConfigKeepAliveServerbound(p)
            | Packet::ConfigKeepAliveClientbound(p)
            | Packet::PlayKeepAliveServerbound(p)
            | Packet::PlayKeepAliveClientbound(p) => p.write_data(writer),
            Packet::PlayInteractEntity(p) => p.write_data(writer),
        }
    }
}

//! Opening packet of every connection.

use crate::core::packet::{PacketData, PacketReader, PacketWriter};
use crate::core::rules::{Presence, TRANSFER_INTENT};
use crate::error::{ProtocolError, Result};
use crate::protocol::types::NextState;

/// Longest server address a client may send.
pub const MAX_ADDRESS_LEN: usize = 255;

/// Handshake sent by the client before anything else.
///
/// `protocol_version` is the raw number the client speaks; turning it into a
/// `ProtocolVersion` is the caller's negotiation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handshake {
    pub protocol_version: i32,
    pub server_address: String,
    pub server_port: u16,
    pub next_state: NextState,
}

impl PacketData for Handshake {
    fn read_data(reader: &mut PacketReader<'_>) -> Result<Self> {
        let protocol_version = reader.read_var_int()?;
        let server_address = reader.read_string(MAX_ADDRESS_LEN)?;
        let server_port = reader.read_u16()?;
        let raw_state = reader.read_var_int()?;
        let next_state = NextState::from_id(raw_state)
            .filter(|state| {
                *state != NextState::Transfer
                    || TRANSFER_INTENT.select(reader.version()) == Presence::Present
            })
            .ok_or_else(|| ProtocolError::UnknownEnumConstant {
                enum_type: "NextState".to_string(),
                value: raw_state.to_string(),
            })?;
        Ok(Self {
            protocol_version,
            server_address,
            server_port,
            next_state,
        })
    }

    fn write_data(&self, writer: &mut PacketWriter<'_>) -> Result<()> {
        if self.next_state == NextState::Transfer
            && TRANSFER_INTENT.select(writer.version()) == Presence::Absent
        {
            return Err(writer.unrepresentable("handshake.next_state"));
        }
        writer.write_var_int(self.protocol_version);
        writer.write_string(&self.server_address, MAX_ADDRESS_LEN)?;
        writer.write_u16(self.server_port);
        writer.write_var_int(self.next_state.id());
        Ok(())
    }
}

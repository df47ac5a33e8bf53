//! # Versioned Packet Wrapper
//!
//! A [`PacketReader`] or [`PacketWriter`] exists for exactly one decode or
//! encode call. It borrows the payload buffer, carries the negotiated
//! [`ProtocolVersion`] and the logical [`PacketTypeId`], and gives
//! packet-specific code ([`PacketData`] implementations) the primitive
//! operations plus rule-table driven helpers.
//!
//! ```rust
//! use versioned_protocol::core::packet::{decode_packet, encode_packet};
//! use versioned_protocol::protocol::catalog::PacketTypeId;
//! use versioned_protocol::protocol::packets::KeepAlive;
//! use versioned_protocol::protocol::version::ProtocolVersion;
//!
//! let id = PacketTypeId::PlayKeepAliveServerbound;
//! let bytes = encode_packet(&KeepAlive { id: 42 }, id, ProtocolVersion::V1_12).unwrap();
//! assert_eq!(bytes.len(), 8);
//! let decoded: KeepAlive = decode_packet(&bytes, id, ProtocolVersion::V1_12).unwrap();
//! assert_eq!(decoded.id, 42);
//! ```

use crate::core::cursor::ByteCursor;
use crate::core::rules::{IntWire, VersionRules};
use crate::core::writer::ByteWriter;
use crate::error::{Framing, ProtocolError, Result};
use crate::protocol::catalog::PacketTypeId;
use crate::protocol::version::ProtocolVersion;
use bytes::{Bytes, BytesMut};
use std::ops::{Deref, DerefMut};

/// Packet-specific encode/decode logic, branching on the reader/writer version.
pub trait PacketData: Sized {
    fn read_data(reader: &mut PacketReader<'_>) -> Result<Self>;

    fn write_data(&self, writer: &mut PacketWriter<'_>) -> Result<()>;
}

/// Decode-side wrapper: cursor, version and packet type for one packet.
#[derive(Debug)]
pub struct PacketReader<'a> {
    cursor: ByteCursor<'a>,
    version: ProtocolVersion,
    packet_type: PacketTypeId,
}

impl<'a> PacketReader<'a> {
    pub fn new(payload: &'a [u8], version: ProtocolVersion, packet_type: PacketTypeId) -> Self {
        Self {
            cursor: ByteCursor::new(payload),
            version,
            packet_type,
        }
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn packet_type(&self) -> PacketTypeId {
        self.packet_type
    }

    /// Read an integer using the representation `rules` selects for this version.
    pub fn read_versioned_int(&mut self, rules: &VersionRules<IntWire>) -> Result<i64> {
        rules.select(self.version).read(&mut self.cursor)
    }

    pub fn read_string(&mut self, max_len: usize) -> Result<String> {
        let version = self.version;
        self.cursor.read_string(version, max_len)
    }

    /// Require that every payload byte was consumed.
    pub fn finish(self) -> Result<()> {
        let remaining = self.cursor.remaining();
        if remaining == 0 {
            Ok(())
        } else {
            Err(ProtocolError::FrameMismatch(Framing::Trailing {
                packet: self.packet_type.name(),
                remaining,
            }))
        }
    }
}

impl<'a> Deref for PacketReader<'a> {
    type Target = ByteCursor<'a>;

    fn deref(&self) -> &Self::Target {
        &self.cursor
    }
}

impl<'a> DerefMut for PacketReader<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cursor
    }
}

/// Encode-side wrapper: output buffer, version and packet type for one packet.
#[derive(Debug)]
pub struct PacketWriter<'a> {
    writer: ByteWriter<'a>,
    version: ProtocolVersion,
    packet_type: PacketTypeId,
}

impl<'a> PacketWriter<'a> {
    pub fn new(buf: &'a mut BytesMut, version: ProtocolVersion, packet_type: PacketTypeId) -> Self {
        Self {
            writer: ByteWriter::new(buf),
            version,
            packet_type,
        }
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn packet_type(&self) -> PacketTypeId {
        self.packet_type
    }

    /// Write an integer using the representation `rules` selects for this version.
    pub fn write_versioned_int(&mut self, rules: &VersionRules<IntWire>, value: i64) {
        rules.select(self.version).write(&mut self.writer, value);
    }

    pub fn write_string(&mut self, text: &str, max_len: usize) -> Result<()> {
        let version = self.version;
        self.writer.write_string(version, text, max_len)
    }

    /// `UnrepresentableField` for `field` at this writer's version.
    pub fn unrepresentable(&self, field: &'static str) -> ProtocolError {
        ProtocolError::UnrepresentableField {
            field,
            version: self.version,
        }
    }
}

impl<'a> Deref for PacketWriter<'a> {
    type Target = ByteWriter<'a>;

    fn deref(&self) -> &Self::Target {
        &self.writer
    }
}

impl<'a> DerefMut for PacketWriter<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.writer
    }
}

/// Decode one packet, requiring the payload to be consumed exactly.
pub fn decode_packet<P: PacketData>(
    payload: &[u8],
    packet_type: PacketTypeId,
    version: ProtocolVersion,
) -> Result<P> {
    let mut reader = PacketReader::new(payload, version, packet_type);
    let packet = P::read_data(&mut reader)?;
    reader.finish()?;
    Ok(packet)
}

/// Encode one packet into a fresh buffer.
pub fn encode_packet<P: PacketData>(
    packet: &P,
    packet_type: PacketTypeId,
    version: ProtocolVersion,
) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    let mut writer = PacketWriter::new(&mut buf, version, packet_type);
    packet.write_data(&mut writer)?;
    Ok(buf.freeze())
}

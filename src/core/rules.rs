//! # Versioned Rule Tables
//!
//! Every field whose wire layout changed across protocol revisions is
//! described by one [`VersionRules`] table: an ordered list of
//! `(minimum version, representation)` pairs, newest first, plus a mandatory
//! representation for everything older. Selection walks the list and the
//! first rule whose minimum is at or below the active version wins.
//!
//! Decode and encode read the same table, so a value decoded under a rule
//! re-encodes to the same bytes under that rule. Supporting a new protocol
//! revision is an edit to these tables, not a new decoder.
//!
//! ```text
//! KEEP_ALIVE_ID:  >= 1.12 -> Long
//!                 >= 1.8  -> VarInt
//!                 (older) -> Int
//! ```

use crate::core::cursor::ByteCursor;
use crate::core::writer::ByteWriter;
use crate::error::Result;
use crate::protocol::version::ProtocolVersion;
use crate::protocol::version::ProtocolVersion::*;

/// Rule table for one versioned field.
#[derive(Debug)]
pub struct VersionRules<W: 'static> {
    field: &'static str,
    rules: &'static [(ProtocolVersion, W)],
    oldest: W,
}

impl<W: Copy + 'static> VersionRules<W> {
    /// `rules` must be ordered newest first; `oldest` applies below the last rule.
    pub const fn new(field: &'static str, rules: &'static [(ProtocolVersion, W)], oldest: W) -> Self {
        Self {
            field,
            rules,
            oldest,
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Representation in effect at `version`.
    pub fn select(&self, version: ProtocolVersion) -> W {
        self.rules
            .iter()
            .find(|(since, _)| version.is_newer_than_or_equals(*since))
            .map_or(self.oldest, |(_, wire)| *wire)
    }

    /// Minimum versions strictly decrease down the table.
    pub fn is_well_ordered(&self) -> bool {
        self.rules.windows(2).all(|pair| pair[0].0 > pair[1].0)
    }

    /// Versions at which the representation changes, newest first.
    pub fn boundaries(&self) -> impl Iterator<Item = ProtocolVersion> + '_ {
        self.rules.iter().map(|(since, _)| *since)
    }
}

/// Wire representation of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWire {
    /// Fixed 8 bytes.
    Long,
    /// VarInt, narrowed to 32 bits on write.
    VarInt,
    /// Fixed 4 bytes, narrowed to 32 bits on write.
    Int,
    /// Single signed byte, narrowed to 8 bits on write.
    Byte,
}

impl IntWire {
    pub fn read(self, cursor: &mut ByteCursor<'_>) -> Result<i64> {
        Ok(match self {
            IntWire::Long => cursor.read_i64()?,
            IntWire::VarInt => i64::from(cursor.read_var_int()?),
            IntWire::Int => i64::from(cursor.read_i32()?),
            IntWire::Byte => i64::from(cursor.read_i8()?),
        })
    }

    pub fn write(self, writer: &mut ByteWriter<'_>, value: i64) {
        match self {
            IntWire::Long => writer.write_i64(value),
            IntWire::VarInt => writer.write_var_int(value as i32),
            IntWire::Int => writer.write_i32(value as i32),
            IntWire::Byte => writer.write_i8(value as i8),
        }
    }

    /// What a value looks like after a write/read cycle through this representation.
    pub fn narrow(self, value: i64) -> i64 {
        match self {
            IntWire::Long => value,
            IntWire::VarInt | IntWire::Int => i64::from(value as i32),
            IntWire::Byte => i64::from(value as i8),
        }
    }
}

/// Whether an optional field is on the wire at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    Present,
    Absent,
}

/// Layout of a player UUID field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UuidWire {
    Required,
    /// Boolean flag followed by the UUID when set.
    Optional,
    Absent,
}

/// How string payload bytes are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringEncoding {
    /// Strict UTF-8.
    Utf8,
    /// Lossy decoding; invalid sequences become U+FFFD.
    Legacy,
}

pub static STRING_ENCODING: VersionRules<StringEncoding> =
    VersionRules::new("string", &[(V1_12, StringEncoding::Utf8)], StringEncoding::Legacy);

pub static KEEP_ALIVE_ID: VersionRules<IntWire> = VersionRules::new(
    "keep_alive.id",
    &[(V1_12, IntWire::Long), (V1_8, IntWire::VarInt)],
    IntWire::Int,
);

pub static ENTITY_ID: VersionRules<IntWire> =
    VersionRules::new("interact.entity_id", &[(V1_8, IntWire::VarInt)], IntWire::Int);

pub static INTERACT_ACTION: VersionRules<IntWire> =
    VersionRules::new("interact.action", &[(V1_8, IntWire::VarInt)], IntWire::Byte);

pub static INTERACT_TARGET: VersionRules<Presence> =
    VersionRules::new("interact.target", &[(V1_8, Presence::Present)], Presence::Absent);

pub static INTERACT_HAND: VersionRules<Presence> =
    VersionRules::new("interact.hand", &[(V1_9, Presence::Present)], Presence::Absent);

pub static INTERACT_SNEAKING: VersionRules<Presence> =
    VersionRules::new("interact.sneaking", &[(V1_16, Presence::Present)], Presence::Absent);

pub static LOGIN_UUID: VersionRules<UuidWire> = VersionRules::new(
    "login_start.player_uuid",
    &[(V1_20_2, UuidWire::Required), (V1_19_3, UuidWire::Optional)],
    UuidWire::Absent,
);

pub static TRANSFER_INTENT: VersionRules<Presence> =
    VersionRules::new("handshake.transfer", &[(V1_20_5, Presence::Present)], Presence::Absent);

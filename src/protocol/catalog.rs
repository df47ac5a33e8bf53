//! # Packet-Type Catalog
//!
//! Maps `(direction, phase, version, opcode)` to a version-independent
//! [`PacketTypeId`], and back from `(id, version)` to the opcode to write.
//!
//! Opcode assignments are rule tables of the same shape as field layouts:
//! newest first, `None` where the packet does not exist. The index built
//! from them is immutable after startup and shared by every thread.
//!
//! An opcode the catalog does not know at a known version is not an error;
//! it resolves to [`Resolution::Passthrough`] so the raw bytes can be
//! forwarded untouched.

use crate::core::rules::VersionRules;
use crate::error::{ProtocolError, Result};
use crate::protocol::version::ProtocolVersion::{self, *};
use bytes::Bytes;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Client to server.
    Serverbound,
    /// Server to client.
    Clientbound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionPhase {
    Handshaking,
    Status,
    Login,
    /// Exists from 1.20.2.
    Configuration,
    Play,
}

/// Logical packet identity, stable across protocol versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketTypeId {
    Handshake,
    StatusPing,
    LoginStart,
    ConfigKeepAliveServerbound,
    ConfigKeepAliveClientbound,
    PlayKeepAliveServerbound,
    PlayKeepAliveClientbound,
    PlayInteractEntity,
}

static HANDSHAKE_OPCODES: VersionRules<Option<i32>> =
    VersionRules::new("handshake", &[], Some(0x00));

static STATUS_PING_OPCODES: VersionRules<Option<i32>> =
    VersionRules::new("status_ping", &[], Some(0x01));

static LOGIN_START_OPCODES: VersionRules<Option<i32>> =
    VersionRules::new("login_start", &[], Some(0x00));

static CONFIG_KEEP_ALIVE_SB_OPCODES: VersionRules<Option<i32>> = VersionRules::new(
    "config_keep_alive_serverbound",
    &[(V1_20_5, Some(0x04)), (V1_20_2, Some(0x03))],
    None,
);

static CONFIG_KEEP_ALIVE_CB_OPCODES: VersionRules<Option<i32>> = VersionRules::new(
    "config_keep_alive_clientbound",
    &[(V1_20_5, Some(0x04)), (V1_20_2, Some(0x03))],
    None,
);

static PLAY_KEEP_ALIVE_SB_OPCODES: VersionRules<Option<i32>> = VersionRules::new(
    "play_keep_alive_serverbound",
    &[
        (V1_20_5, Some(0x18)),
        (V1_20_3, Some(0x15)),
        (V1_20_2, Some(0x14)),
        (V1_19_4, Some(0x12)),
        (V1_19_3, Some(0x11)),
        (V1_19_1, Some(0x12)),
        (V1_19, Some(0x11)),
        (V1_17, Some(0x0F)),
        (V1_16, Some(0x10)),
        (V1_14, Some(0x0F)),
        (V1_13, Some(0x0E)),
        (V1_12_1, Some(0x0B)),
        (V1_12, Some(0x0C)),
        (V1_9, Some(0x0B)),
    ],
    Some(0x00),
);

static PLAY_KEEP_ALIVE_CB_OPCODES: VersionRules<Option<i32>> = VersionRules::new(
    "play_keep_alive_clientbound",
    &[
        (V1_20_5, Some(0x26)),
        (V1_20_2, Some(0x24)),
        (V1_19_4, Some(0x23)),
        (V1_19_3, Some(0x1F)),
        (V1_19_1, Some(0x20)),
        (V1_19, Some(0x1E)),
        (V1_17, Some(0x21)),
        (V1_16_2, Some(0x1F)),
        (V1_16, Some(0x20)),
        (V1_15, Some(0x21)),
        (V1_14, Some(0x20)),
        (V1_13, Some(0x21)),
        (V1_9, Some(0x1F)),
    ],
    Some(0x00),
);

static PLAY_INTERACT_ENTITY_OPCODES: VersionRules<Option<i32>> = VersionRules::new(
    "play_interact_entity",
    &[
        (V1_20_5, Some(0x16)),
        (V1_20_3, Some(0x13)),
        (V1_20_2, Some(0x12)),
        (V1_19_4, Some(0x10)),
        (V1_19_3, Some(0x0F)),
        (V1_19_1, Some(0x10)),
        (V1_19, Some(0x0F)),
        (V1_17, Some(0x0D)),
        (V1_14, Some(0x0E)),
        (V1_13, Some(0x0D)),
        (V1_12_1, Some(0x0A)),
        (V1_12, Some(0x0B)),
        (V1_9, Some(0x0A)),
    ],
    Some(0x02),
);

impl PacketTypeId {
    pub const ALL: &'static [PacketTypeId] = &[
        PacketTypeId::Handshake,
        PacketTypeId::StatusPing,
        PacketTypeId::LoginStart,
        PacketTypeId::ConfigKeepAliveServerbound,
        PacketTypeId::ConfigKeepAliveClientbound,
        PacketTypeId::PlayKeepAliveServerbound,
        PacketTypeId::PlayKeepAliveClientbound,
        PacketTypeId::PlayInteractEntity,
    ];

    pub const fn direction(self) -> Direction {
        match self {
            PacketTypeId::ConfigKeepAliveClientbound | PacketTypeId::PlayKeepAliveClientbound => {
                Direction::Clientbound
            }
            _ => Direction::Serverbound,
        }
    }

    pub const fn phase(self) -> ConnectionPhase {
        match self {
            PacketTypeId::Handshake => ConnectionPhase::Handshaking,
            PacketTypeId::StatusPing => ConnectionPhase::Status,
            PacketTypeId::LoginStart => ConnectionPhase::Login,
            PacketTypeId::ConfigKeepAliveServerbound | PacketTypeId::ConfigKeepAliveClientbound => {
                ConnectionPhase::Configuration
            }
            PacketTypeId::PlayKeepAliveServerbound
            | PacketTypeId::PlayKeepAliveClientbound
            | PacketTypeId::PlayInteractEntity => ConnectionPhase::Play,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PacketTypeId::Handshake => "handshake",
            PacketTypeId::StatusPing => "status_ping",
            PacketTypeId::LoginStart => "login_start",
            PacketTypeId::ConfigKeepAliveServerbound => "config_keep_alive_serverbound",
            PacketTypeId::ConfigKeepAliveClientbound => "config_keep_alive_clientbound",
            PacketTypeId::PlayKeepAliveServerbound => "play_keep_alive_serverbound",
            PacketTypeId::PlayKeepAliveClientbound => "play_keep_alive_clientbound",
            PacketTypeId::PlayInteractEntity => "play_interact_entity",
        }
    }

    /// Opcode table for this packet.
    pub fn opcodes(self) -> &'static VersionRules<Option<i32>> {
        match self {
            PacketTypeId::Handshake => &HANDSHAKE_OPCODES,
            PacketTypeId::StatusPing => &STATUS_PING_OPCODES,
            PacketTypeId::LoginStart => &LOGIN_START_OPCODES,
            PacketTypeId::ConfigKeepAliveServerbound => &CONFIG_KEEP_ALIVE_SB_OPCODES,
            PacketTypeId::ConfigKeepAliveClientbound => &CONFIG_KEEP_ALIVE_CB_OPCODES,
            PacketTypeId::PlayKeepAliveServerbound => &PLAY_KEEP_ALIVE_SB_OPCODES,
            PacketTypeId::PlayKeepAliveClientbound => &PLAY_KEEP_ALIVE_CB_OPCODES,
            PacketTypeId::PlayInteractEntity => &PLAY_INTERACT_ENTITY_OPCODES,
        }
    }
}

impl fmt::Display for PacketTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of resolving an incoming opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Packet(PacketTypeId),
    /// Unknown to the catalog; forward the raw bytes unmodified.
    Passthrough,
}

type OpcodeKey = (Direction, ConnectionPhase, ProtocolVersion, i32);

/// Two packet types claiming the same opcode slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeConflict {
    pub direction: Direction,
    pub phase: ConnectionPhase,
    pub version: ProtocolVersion,
    pub opcode: i32,
    pub kept: PacketTypeId,
    pub rejected: PacketTypeId,
}

/// Immutable opcode index over every packet type and version.
#[derive(Debug)]
pub struct PacketCatalog {
    by_opcode: HashMap<OpcodeKey, PacketTypeId>,
    conflicts: Vec<OpcodeConflict>,
}

impl PacketCatalog {
    pub fn build() -> Self {
        let mut by_opcode: HashMap<OpcodeKey, PacketTypeId> = HashMap::new();
        let mut conflicts = Vec::new();

        for &id in PacketTypeId::ALL {
            for &version in ProtocolVersion::ALL {
                let Some(opcode) = id.opcodes().select(version) else {
                    continue;
                };
                let key = (id.direction(), id.phase(), version, opcode);
                if let Some(&kept) = by_opcode.get(&key) {
                    error!(
                        opcode,
                        %version,
                        kept = kept.name(),
                        rejected = id.name(),
                        "Conflicting opcode assignment in packet catalog"
                    );
                    conflicts.push(OpcodeConflict {
                        direction: key.0,
                        phase: key.1,
                        version,
                        opcode,
                        kept,
                        rejected: id,
                    });
                    continue;
                }
                by_opcode.insert(key, id);
            }
        }

        debug!(entries = by_opcode.len(), "Packet catalog built");
        Self {
            by_opcode,
            conflicts,
        }
    }

    pub fn resolve(
        &self,
        direction: Direction,
        phase: ConnectionPhase,
        version: ProtocolVersion,
        opcode: i32,
    ) -> Resolution {
        self.by_opcode
            .get(&(direction, phase, version, opcode))
            .map_or(Resolution::Passthrough, |id| Resolution::Packet(*id))
    }

    /// Opcode to write for `id` at `version`.
    pub fn opcode(&self, id: PacketTypeId, version: ProtocolVersion) -> Result<i32> {
        id.opcodes()
            .select(version)
            .ok_or(ProtocolError::PacketUnavailable {
                packet: id.name(),
                version,
            })
    }

    pub fn conflicts(&self) -> &[OpcodeConflict] {
        &self.conflicts
    }

    pub fn len(&self) -> usize {
        self.by_opcode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_opcode.is_empty()
    }
}

static CATALOG: Lazy<PacketCatalog> = Lazy::new(PacketCatalog::build);

/// The process-wide catalog, built on first use.
pub fn catalog() -> &'static PacketCatalog {
    &CATALOG
}

/// Per-packet resolution state; moves from `Unresolved` to `Resolved` once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveState {
    Unresolved,
    Resolved(Resolution),
}

/// A raw inbound frame as handed over by the transport.
#[derive(Debug, Clone)]
pub struct IncomingPacket {
    pub direction: Direction,
    pub phase: ConnectionPhase,
    pub opcode: i32,
    pub payload: Bytes,
    state: ResolveState,
}

impl IncomingPacket {
    pub fn new(direction: Direction, phase: ConnectionPhase, opcode: i32, payload: Bytes) -> Self {
        Self {
            direction,
            phase,
            opcode,
            payload,
            state: ResolveState::Unresolved,
        }
    }

    pub fn state(&self) -> ResolveState {
        self.state
    }

    /// Resolve against `catalog`; later calls return the first answer.
    pub fn resolve(&mut self, catalog: &PacketCatalog, version: ProtocolVersion) -> Resolution {
        if let ResolveState::Resolved(resolution) = self.state {
            return resolution;
        }
        let resolution = catalog.resolve(self.direction, self.phase, version, self.opcode);
        self.state = ResolveState::Resolved(resolution);
        resolution
    }
}

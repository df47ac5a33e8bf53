//! # Versioned Protocol
//!
//! Version-aware binary packet codec for a game protocol whose field layouts,
//! opcodes and valid operations change across dozens of revisions.
//!
//! ## Layers
//! - [`core`]: bounds-checked primitives, VarInts, versioned rule tables and
//!   the per-packet reader/writer
//! - [`protocol`]: version registry, capability gate, packet catalog, packet
//!   definitions and the dispatcher
//! - [`reflect`]: field access on host-owned packet objects by type ordinal
//! - [`config`], [`error`], [`utils`]: settings, errors, logging and metrics
//!
//! ## Quick Start
//! ```rust
//! use versioned_protocol::protocol::catalog::{ConnectionPhase, Direction, IncomingPacket};
//! use versioned_protocol::protocol::dispatcher::{Dispatcher, Inbound};
//! use versioned_protocol::protocol::packets::{KeepAlive, Packet};
//! use versioned_protocol::protocol::version::ProtocolVersion;
//!
//! let dispatcher = Dispatcher::default();
//! let version = ProtocolVersion::V1_8;
//!
//! let out = dispatcher
//!     .encode(&Packet::PlayKeepAliveServerbound(KeepAlive::new(300)), version)
//!     .unwrap();
//! assert_eq!(&out.payload[..], &[0xAC, 0x02]);
//!
//! let mut frame = IncomingPacket::new(Direction::Serverbound, ConnectionPhase::Play, out.opcode, out.payload);
//! assert!(matches!(dispatcher.decode(&mut frame, version).unwrap(), Inbound::Decoded(_)));
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod reflect;
pub mod utils;

pub use config::{CodecConfig, CodecSettings, LoggingConfig};
pub use error::{ProtocolError, Result};
pub use protocol::catalog::{ConnectionPhase, Direction, IncomingPacket, PacketTypeId};
pub use protocol::dispatcher::{Dispatcher, Inbound, OutboundFrame, PacketSink};
pub use protocol::packets::Packet;
pub use protocol::version::ProtocolVersion;

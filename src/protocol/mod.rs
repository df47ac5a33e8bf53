//! # Protocol Layer
//!
//! Version registry, capability gate, packet catalog, packet definitions and
//! the dispatcher that ties them together.
//!
//! ## Components
//! - **Version**: ordered [`version::ProtocolVersion`] registry
//! - **Gate**: declarative version ranges for accessor operations
//! - **Catalog**: `(direction, phase, version, opcode)` to packet type, with passthrough
//! - **Packets**: typed packet values and their versioned layouts
//! - **Dispatcher**: decode/encode entry points and sink delivery
//!
//! ## Data Flow
//! ```text
//! IncomingPacket -> catalog resolve -> PacketReader -> Packet -> PacketSink
//! Packet -> catalog opcode -> PacketWriter -> OutboundFrame
//! ```

pub mod catalog;
pub mod dispatcher;
pub mod gate;
pub mod packets;
pub mod types;
pub mod version;

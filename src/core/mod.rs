//! # Core Codec Components
//!
//! Primitive reads and writes, versioned rule tables, and the per-packet
//! reader/writer wrappers.
//!
//! ## Components
//! - **Cursor / Writer**: bounds-checked primitives over one packet payload
//! - **VarInt**: 7-bit group integer encoding
//! - **Rules**: `(minimum version, representation)` tables for versioned fields
//! - **Packet**: `PacketReader` / `PacketWriter` and the `PacketData` trait
//!
//! ## Wire Format
//! ```text
//! VarInt  [1xxxxxxx]* [0xxxxxxx]        least significant group first, max 5 bytes
//! String  [VarInt byte length] [bytes]  UTF-8
//! UUID    [u64 BE most] [u64 BE least]
//! ```
//!
//! The cursor is positioned at the first byte of packet-specific data; outer
//! framing, compression and encryption are handled by the transport.

pub mod cursor;
pub mod packet;
pub mod rules;
pub mod varint;
pub mod writer;

//! # Error Types
//!
//! Error handling for the versioned packet codec.
//!
//! This module defines every failure the codec can surface, from malformed
//! bytes on the wire to callers asking for a field the negotiated protocol
//! version cannot carry.
//!
//! ## Error Categories
//! - **Malformed input**: bad varints, bad string prefixes, frame overruns and
//!   trailing bytes. These abort decoding of the current packet only.
//! - **Capability errors**: a version-gated accessor was invoked outside its
//!   declared range. Recoverable; the caller should consult the range first.
//! - **Resolution errors**: the host object does not have the shape the
//!   reflective wrapper expects. Signals an unsupported host build.
//! - **Configuration / I/O**: loading settings and installing log sinks.
//!
//! ## Example Usage
//! ```rust
//! use versioned_protocol::core::cursor::ByteCursor;
//! use versioned_protocol::error::ProtocolError;
//!
//! let mut cursor = ByteCursor::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]);
//! match cursor.read_var_int() {
//!     Err(ProtocolError::MalformedVarInt) => {}
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use crate::protocol::gate::CapabilityRange;
use crate::protocol::version::ProtocolVersion;
use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Resolution cache errors
    pub const ERR_CACHE_WRITE_LOCK: &str = "Failed to acquire write lock on resolution cache";
    pub const ERR_CACHE_READ_LOCK: &str = "Failed to acquire read lock on resolution cache";

    /// Logging setup
    pub const ERR_LOG_FILE_PATH: &str = "log_file_path must be set when log_to_file is enabled";
}

/// Why a packet frame did not line up with what the decoder consumed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Framing {
    /// A read would have moved past the readable end of the frame.
    #[error("read of {requested} bytes with only {available} remaining")]
    Overrun { requested: usize, available: usize },

    /// Decoding finished but bytes belonging to the frame were left unread.
    #[error("{packet} left {remaining} trailing bytes unread")]
    Trailing {
        packet: &'static str,
        remaining: usize,
    },
}

// ProtocolError is the primary error type for all codec operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed VarInt: more than 5 bytes without termination")]
    MalformedVarInt,

    #[error("Negative length prefix: {0}")]
    NegativeLength(i32),

    #[error("Encoded string buffer is longer than maximum allowed ({length} > {max})")]
    StringTooLarge { length: usize, max: usize },

    #[error("String is longer than maximum allowed ({length} > {max})")]
    StringTooLong { length: usize, max: usize },

    #[error("Malformed string: payload is not valid UTF-8")]
    MalformedString,

    #[error("Frame mismatch: {0}")]
    FrameMismatch(Framing),

    #[error("Unsupported protocol version: {0}")]
    UnsupportedVersion(i32),

    #[error("Unsupported operation {operation} at {version} (supported in {range})")]
    UnsupportedOperation {
        operation: &'static str,
        range: CapabilityRange,
        version: ProtocolVersion,
    },

    #[error("Failed to resolve {field} #{ordinal} on {shape}")]
    FieldResolutionFailure {
        shape: String,
        field: String,
        ordinal: usize,
    },

    #[error("Unknown constant {value} for enum {enum_type}")]
    UnknownEnumConstant { enum_type: String, value: String },

    #[error("Field {field} cannot be represented at {version}")]
    UnrepresentableField {
        field: &'static str,
        version: ProtocolVersion,
    },

    #[error("Packet {packet} does not exist at {version}")]
    PacketUnavailable {
        packet: &'static str,
        version: ProtocolVersion,
    },

    #[error("Packet too large: {0} bytes")]
    OversizedPacket(usize),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(&'static str),
}

impl ProtocolError {
    /// Whether this error came from malformed bytes rather than caller or host misuse.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            ProtocolError::MalformedVarInt
                | ProtocolError::NegativeLength(_)
                | ProtocolError::StringTooLarge { .. }
                | ProtocolError::StringTooLong { .. }
                | ProtocolError::MalformedString
                | ProtocolError::FrameMismatch(_)
                | ProtocolError::UnknownEnumConstant { .. }
                | ProtocolError::OversizedPacket(_)
        )
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_operation_message_carries_context() {
        let err = ProtocolError::UnsupportedOperation {
            operation: "set_hand",
            range: CapabilityRange::since(ProtocolVersion::V1_9),
            version: ProtocolVersion::V1_8,
        };
        let msg = err.to_string();
        assert!(msg.contains("set_hand"));
        assert!(msg.contains("1.8"));
        assert!(msg.contains("1.9"));
    }

    #[test]
    fn test_malformed_input_classification() {
        assert!(ProtocolError::MalformedVarInt.is_malformed_input());
        assert!(ProtocolError::FrameMismatch(Framing::Overrun {
            requested: 8,
            available: 2
        })
        .is_malformed_input());
        assert!(!ProtocolError::UnsupportedVersion(9999).is_malformed_input());
        assert!(!ProtocolError::ConfigError("x".into()).is_malformed_input());
    }
}

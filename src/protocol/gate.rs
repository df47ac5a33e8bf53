//! # Capability Gate
//!
//! Declarative version ranges attached to individual accessor operations.
//!
//! Each gated operation declares a [`Capability`] constant naming the
//! operation and the inclusive range of protocol versions in which it is
//! meaningful. Accessors call [`Capability::check`] before touching any
//! state, so a call outside the range fails with
//! [`ProtocolError::UnsupportedOperation`] and mutates nothing.
//!
//! ```rust
//! use versioned_protocol::protocol::gate::{Capability, CapabilityRange};
//! use versioned_protocol::protocol::version::ProtocolVersion;
//!
//! const SET_HAND: Capability =
//!     Capability::new("set_hand", CapabilityRange::since(ProtocolVersion::V1_9));
//!
//! assert!(SET_HAND.check(ProtocolVersion::V1_12).is_ok());
//! assert!(SET_HAND.check(ProtocolVersion::V1_8).is_err());
//! ```

use crate::error::{ProtocolError, Result};
use crate::protocol::version::ProtocolVersion;
use crate::utils::metrics::global_metrics;
use std::fmt;
use tracing::warn;

/// Inclusive `[min, max]` protocol range; `max = None` means no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityRange {
    min: ProtocolVersion,
    max: Option<ProtocolVersion>,
}

impl CapabilityRange {
    /// Open-ended range starting at `min`.
    pub const fn since(min: ProtocolVersion) -> Self {
        Self { min, max: None }
    }

    /// Bounded range. Panics (at compile time when used in a const) if `min > max`.
    pub const fn between(min: ProtocolVersion, max: ProtocolVersion) -> Self {
        assert!(
            min.protocol_number() <= max.protocol_number(),
            "capability range min must not exceed max"
        );
        Self {
            min,
            max: Some(max),
        }
    }

    pub fn min(&self) -> ProtocolVersion {
        self.min
    }

    pub fn max(&self) -> Option<ProtocolVersion> {
        self.max
    }

    pub fn contains(&self, version: ProtocolVersion) -> bool {
        version >= self.min && self.max.map_or(true, |max| version <= max)
    }
}

impl fmt::Display for CapabilityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}, {}]", self.min, max),
            None => write!(f, "[{}, latest]", self.min),
        }
    }
}

/// A named operation and the versions in which it may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    pub operation: &'static str,
    pub range: CapabilityRange,
}

impl Capability {
    pub const fn new(operation: &'static str, range: CapabilityRange) -> Self {
        Self { operation, range }
    }

    pub fn is_supported(&self, version: ProtocolVersion) -> bool {
        self.range.contains(version)
    }

    /// Fail with `UnsupportedOperation` when `version` is outside the declared range.
    pub fn check(&self, version: ProtocolVersion) -> Result<()> {
        if self.range.contains(version) {
            return Ok(());
        }
        global_metrics().gate_violation();
        warn!(
            operation = self.operation,
            %version,
            range = %self.range,
            "Capability gate rejected operation"
        );
        Err(ProtocolError::UnsupportedOperation {
            operation: self.operation,
            range: self.range,
            version,
        })
    }
}

//! # Protocol Version Registry
//!
//! Ordered enumeration of every protocol revision the codec understands.
//!
//! Variants are declared oldest first, so the derived `Ord` matches release
//! chronology. Components must compare versions through this type rather
//! than through raw protocol numbers.
//!
//! Releases that share a protocol number (for example 1.16.4 and 1.16.5)
//! share a variant; the later release name parses to the same variant.

use crate::error::{ProtocolError, Result};
use std::fmt;
use std::str::FromStr;

/// A protocol revision, ordered by release.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtocolVersion {
    V1_7_2,
    V1_7_10,
    V1_8,
    V1_9,
    V1_9_1,
    V1_9_2,
    V1_9_4,
    V1_10,
    V1_11,
    V1_11_1,
    V1_12,
    V1_12_1,
    V1_12_2,
    V1_13,
    V1_13_1,
    V1_13_2,
    V1_14,
    V1_14_1,
    V1_14_2,
    V1_14_3,
    V1_14_4,
    V1_15,
    V1_15_1,
    V1_15_2,
    V1_16,
    V1_16_1,
    V1_16_2,
    V1_16_3,
    V1_16_4,
    V1_17,
    V1_17_1,
    V1_18,
    V1_18_2,
    V1_19,
    V1_19_1,
    V1_19_3,
    V1_19_4,
    V1_20,
    V1_20_2,
    V1_20_3,
    V1_20_5,
    V1_21,
}

use ProtocolVersion::*;

impl ProtocolVersion {
    /// Every known version, oldest first.
    pub const ALL: &'static [ProtocolVersion] = &[
        V1_7_2, V1_7_10, V1_8, V1_9, V1_9_1, V1_9_2, V1_9_4, V1_10, V1_11, V1_11_1, V1_12,
        V1_12_1, V1_12_2, V1_13, V1_13_1, V1_13_2, V1_14, V1_14_1, V1_14_2, V1_14_3, V1_14_4,
        V1_15, V1_15_1, V1_15_2, V1_16, V1_16_1, V1_16_2, V1_16_3, V1_16_4, V1_17, V1_17_1,
        V1_18, V1_18_2, V1_19, V1_19_1, V1_19_3, V1_19_4, V1_20, V1_20_2, V1_20_3, V1_20_5,
        V1_21,
    ];

    /// Wire protocol number sent in the handshake.
    pub const fn protocol_number(self) -> i32 {
        match self {
            V1_7_2 => 4,
            V1_7_10 => 5,
            V1_8 => 47,
            V1_9 => 107,
            V1_9_1 => 108,
            V1_9_2 => 109,
            V1_9_4 => 110,
            V1_10 => 210,
            V1_11 => 315,
            V1_11_1 => 316,
            V1_12 => 335,
            V1_12_1 => 338,
            V1_12_2 => 340,
            V1_13 => 393,
            V1_13_1 => 401,
            V1_13_2 => 404,
            V1_14 => 477,
            V1_14_1 => 480,
            V1_14_2 => 485,
            V1_14_3 => 490,
            V1_14_4 => 498,
            V1_15 => 573,
            V1_15_1 => 575,
            V1_15_2 => 578,
            V1_16 => 735,
            V1_16_1 => 736,
            V1_16_2 => 751,
            V1_16_3 => 753,
            V1_16_4 => 754,
            V1_17 => 755,
            V1_17_1 => 756,
            V1_18 => 757,
            V1_18_2 => 758,
            V1_19 => 759,
            V1_19_1 => 760,
            V1_19_3 => 761,
            V1_19_4 => 762,
            V1_20 => 763,
            V1_20_2 => 764,
            V1_20_3 => 765,
            V1_20_5 => 766,
            V1_21 => 767,
        }
    }

    /// Release name, e.g. `"1.12.2"`.
    pub const fn release_name(self) -> &'static str {
        match self {
            V1_7_2 => "1.7.2",
            V1_7_10 => "1.7.10",
            V1_8 => "1.8",
            V1_9 => "1.9",
            V1_9_1 => "1.9.1",
            V1_9_2 => "1.9.2",
            V1_9_4 => "1.9.4",
            V1_10 => "1.10",
            V1_11 => "1.11",
            V1_11_1 => "1.11.1",
            V1_12 => "1.12",
            V1_12_1 => "1.12.1",
            V1_12_2 => "1.12.2",
            V1_13 => "1.13",
            V1_13_1 => "1.13.1",
            V1_13_2 => "1.13.2",
            V1_14 => "1.14",
            V1_14_1 => "1.14.1",
            V1_14_2 => "1.14.2",
            V1_14_3 => "1.14.3",
            V1_14_4 => "1.14.4",
            V1_15 => "1.15",
            V1_15_1 => "1.15.1",
            V1_15_2 => "1.15.2",
            V1_16 => "1.16",
            V1_16_1 => "1.16.1",
            V1_16_2 => "1.16.2",
            V1_16_3 => "1.16.3",
            V1_16_4 => "1.16.4",
            V1_17 => "1.17",
            V1_17_1 => "1.17.1",
            V1_18 => "1.18",
            V1_18_2 => "1.18.2",
            V1_19 => "1.19",
            V1_19_1 => "1.19.1",
            V1_19_3 => "1.19.3",
            V1_19_4 => "1.19.4",
            V1_20 => "1.20",
            V1_20_2 => "1.20.2",
            V1_20_3 => "1.20.3",
            V1_20_5 => "1.20.5",
            V1_21 => "1.21",
        }
    }

    /// Look up the version negotiated in a handshake.
    pub fn from_protocol_number(number: i32) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.protocol_number() == number)
            .ok_or(ProtocolError::UnsupportedVersion(number))
    }

    pub fn oldest() -> Self {
        V1_7_2
    }

    pub fn latest() -> Self {
        V1_21
    }

    pub fn is_newer_than(self, other: Self) -> bool {
        self > other
    }

    pub fn is_newer_than_or_equals(self, other: Self) -> bool {
        self >= other
    }

    pub fn is_older_than(self, other: Self) -> bool {
        self < other
    }

    pub fn is_older_than_or_equals(self, other: Self) -> bool {
        self <= other
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.release_name())
    }
}

impl FromStr for ProtocolVersion {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().trim_start_matches('v');
        // Later releases that reuse an earlier protocol number
        let canonical = match name {
            "1.7.6" | "1.7.7" | "1.7.8" | "1.7.9" => "1.7.10",
            "1.8.1" | "1.8.2" | "1.8.3" | "1.8.4" | "1.8.5" | "1.8.6" | "1.8.7" | "1.8.8"
            | "1.8.9" => "1.8",
            "1.10.1" | "1.10.2" => "1.10",
            "1.11.2" => "1.11.1",
            "1.16.5" => "1.16.4",
            "1.18.1" => "1.18",
            "1.19.2" => "1.19.1",
            "1.20.1" => "1.20",
            "1.20.4" => "1.20.3",
            "1.20.6" => "1.20.5",
            "1.21.1" => "1.21",
            other => other,
        };
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.release_name() == canonical)
            .ok_or_else(|| ProtocolError::ConfigError(format!("Unknown protocol version: {s}")))
    }
}

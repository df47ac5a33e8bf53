//! VarInt encoding: 7 data bits per byte, least significant group first,
//! high bit set on every byte except the last.

use crate::error::{Framing, ProtocolError, Result};
use bytes::BufMut;

/// A 32-bit value never needs more than five groups.
pub const MAX_VAR_INT_LEN: usize = 5;

const SEGMENT_BITS: u8 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

/// Number of bytes `value` occupies on the wire.
pub fn var_int_len(value: i32) -> usize {
    let mut v = value as u32;
    let mut len = 1;
    while v >= 0x80 {
        v >>= 7;
        len += 1;
    }
    len
}

/// Append `value` to `buf`. Negative values take the full five bytes.
pub fn encode_var_int(value: i32, buf: &mut impl BufMut) {
    let mut v = value as u32;
    loop {
        if v & !(SEGMENT_BITS as u32) == 0 {
            buf.put_u8(v as u8);
            return;
        }
        buf.put_u8((v as u8 & SEGMENT_BITS) | CONTINUE_BIT);
        v >>= 7;
    }
}

/// Decode a VarInt from the front of `data`, returning the value and the number
/// of bytes it occupied.
pub fn decode_var_int(data: &[u8]) -> Result<(i32, usize)> {
    let mut result = 0u32;
    for (i, shift) in (0..32).step_by(7).enumerate() {
        let byte = *data.get(i).ok_or(ProtocolError::FrameMismatch(Framing::Overrun {
            requested: i + 1,
            available: data.len(),
        }))?;
        result |= u32::from(byte & SEGMENT_BITS) << shift;
        if byte & CONTINUE_BIT == 0 {
            return Ok((result as i32, i + 1));
        }
    }
    Err(ProtocolError::MalformedVarInt)
}

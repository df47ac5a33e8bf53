//! # Byte Cursor
//!
//! Bounds-checked read position over one packet's payload.
//!
//! Every read either consumes exactly the bytes of the value it returns or
//! fails without moving the cursor, so a failed read never leaves the cursor
//! pointing into the middle of a field. Reading past the readable end is a
//! [`Framing::Overrun`], never a panic.
//!
//! Fixed-width integers are big-endian, matching the protocol.

use crate::core::rules::{StringEncoding, STRING_ENCODING};
use crate::core::varint::decode_var_int;
use crate::error::{Framing, ProtocolError, Result};
use crate::protocol::version::ProtocolVersion;
use bytes::Buf;
use uuid::Uuid;

/// Default maximum string length in UTF-16 code units.
pub const DEFAULT_MAX_STRING_LEN: usize = 32767;

/// A read cursor over a borrowed payload.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Unread bytes, without consuming them.
    pub fn peek_remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(ProtocolError::FrameMismatch(Framing::Overrun {
                requested: len,
                available,
            }));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Run `read`, rewinding to the starting position if it fails.
    fn atomic<T>(&mut self, read: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let start = self.pos;
        let result = read(self);
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Single byte, nonzero is `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.take(2)?.get_i16())
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(self.take(2)?.get_u16())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.take(4)?.get_i32())
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.take(8)?.get_i64())
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(self.take(4)?.get_f32())
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(self.take(8)?.get_f64())
    }

    pub fn read_byte_array(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }

    pub fn read_var_int(&mut self) -> Result<i32> {
        let (value, len) = decode_var_int(self.peek_remaining())?;
        self.pos += len;
        Ok(value)
    }

    /// Two big-endian 64-bit halves, most significant first.
    pub fn read_uuid(&mut self) -> Result<Uuid> {
        let mut bytes = self.take(16)?;
        let most = bytes.get_u64();
        let least = bytes.get_u64();
        Ok(Uuid::from_u64_pair(most, least))
    }

    /// VarInt byte-length prefix followed by the string bytes.
    ///
    /// `max_len` is in UTF-16 code units; the byte prefix may not exceed
    /// `max_len * 4`. The decoding rule depends on `version`.
    pub fn read_string(&mut self, version: ProtocolVersion, max_len: usize) -> Result<String> {
        let encoding = STRING_ENCODING.select(version);
        self.atomic(|cursor| {
            let declared = cursor.read_var_int()?;
            let max_bytes = max_len.saturating_mul(4);
            if declared > 0 && declared as usize > max_bytes {
                return Err(ProtocolError::StringTooLarge {
                    length: declared as usize,
                    max: max_bytes,
                });
            }
            if declared < 0 {
                return Err(ProtocolError::NegativeLength(declared));
            }
            let bytes = cursor.take(declared as usize)?;
            let text = match encoding {
                StringEncoding::Utf8 => std::str::from_utf8(bytes)
                    .map_err(|_| ProtocolError::MalformedString)?
                    .to_owned(),
                StringEncoding::Legacy => String::from_utf8_lossy(bytes).into_owned(),
            };
            let length = utf16_len(&text);
            if length > max_len {
                return Err(ProtocolError::StringTooLong {
                    length,
                    max: max_len,
                });
            }
            Ok(text)
        })
    }

    pub fn read_string_default(&mut self, version: ProtocolVersion) -> Result<String> {
        self.read_string(version, DEFAULT_MAX_STRING_LEN)
    }
}

/// Character length as counted by the protocol (UTF-16 code units).
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

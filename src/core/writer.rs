//! Append-only writer, the structural inverse of [`ByteCursor`](crate::core::cursor::ByteCursor).

use crate::core::cursor::{utf16_len, DEFAULT_MAX_STRING_LEN};
use crate::core::varint::encode_var_int;
use crate::error::{ProtocolError, Result};
use crate::protocol::version::ProtocolVersion;
use bytes::{BufMut, BytesMut};
use uuid::Uuid;

/// Writes protocol primitives into a borrowed `BytesMut`.
#[derive(Debug)]
pub struct ByteWriter<'a> {
    buf: &'a mut BytesMut,
}

impl<'a> ByteWriter<'a> {
    pub fn new(buf: &'a mut BytesMut) -> Self {
        Self { buf }
    }

    /// Bytes written into the underlying buffer so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buf.put_i8(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    pub fn write_i16(&mut self, value: i16) {
        self.buf.put_i16(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.put_u16(value);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.put_i32(value);
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.put_i64(value);
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buf.put_f32(value);
    }

    pub fn write_f64(&mut self, value: f64) {
        self.buf.put_f64(value);
    }

    pub fn write_byte_array(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    pub fn write_var_int(&mut self, value: i32) {
        encode_var_int(value, &mut *self.buf);
    }

    pub fn write_uuid(&mut self, uuid: Uuid) {
        let (most, least) = uuid.as_u64_pair();
        self.buf.put_u64(most);
        self.buf.put_u64(least);
    }

    /// Length-checked string; nothing is written if the check fails.
    ///
    /// Both string rules put UTF-8 bytes on the wire, so `version` only
    /// affects how the peer decodes them.
    pub fn write_string(
        &mut self,
        _version: ProtocolVersion,
        text: &str,
        max_len: usize,
    ) -> Result<()> {
        let length = utf16_len(text);
        if length > max_len {
            return Err(ProtocolError::StringTooLong {
                length,
                max: max_len,
            });
        }
        let bytes = text.as_bytes();
        let max_bytes = max_len.saturating_mul(4).min(i32::MAX as usize);
        if bytes.len() > max_bytes {
            return Err(ProtocolError::StringTooLarge {
                length: bytes.len(),
                max: max_bytes,
            });
        }
        self.write_var_int(bytes.len() as i32);
        self.buf.put_slice(bytes);
        Ok(())
    }

    pub fn write_string_default(&mut self, version: ProtocolVersion, text: &str) -> Result<()> {
        self.write_string(version, text, DEFAULT_MAX_STRING_LEN)
    }
}

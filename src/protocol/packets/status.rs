//! Status ping, answered with a pong carrying the same payload.

use crate::core::packet::{PacketData, PacketReader, PacketWriter};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusPing {
    pub payload: i64,
}

impl PacketData for StatusPing {
    fn read_data(reader: &mut PacketReader<'_>) -> Result<Self> {
        Ok(Self {
            payload: reader.read_i64()?,
        })
    }

    fn write_data(&self, writer: &mut PacketWriter<'_>) -> Result<()> {
        writer.write_i64(self.payload);
        Ok(())
    }
}

//! Keep-alive, used in both directions during configuration and play.

use crate::core::packet::{PacketData, PacketReader, PacketWriter};
use crate::core::rules::KEEP_ALIVE_ID;
use crate::error::Result;

/// Keep-alive identifier echoed between client and server.
///
/// The identifier is a long from 1.12, a VarInt from 1.8 and an int before
/// that; narrower representations truncate on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeepAlive {
    pub id: i64,
}

impl KeepAlive {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl PacketData for KeepAlive {
    fn read_data(reader: &mut PacketReader<'_>) -> Result<Self> {
        let id = reader.read_versioned_int(&KEEP_ALIVE_ID)?;
        Ok(Self { id })
    }

    fn write_data(&self, writer: &mut PacketWriter<'_>) -> Result<()> {
        writer.write_versioned_int(&KEEP_ALIVE_ID, self.id);
        Ok(())
    }
}

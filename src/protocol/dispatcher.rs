use crate::config::CodecSettings;
use crate::core::packet::{PacketReader, PacketWriter};
use crate::error::{Framing, ProtocolError, Result};
use crate::protocol::catalog::{catalog, IncomingPacket, PacketCatalog, PacketTypeId, Resolution};
use crate::protocol::packets::Packet;
use crate::protocol::version::ProtocolVersion;
use crate::utils::metrics::{global_metrics, Timer};
use bytes::{Bytes, BytesMut};
use tracing::{debug, instrument, warn};

/// Result of decoding one inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Decoded(Packet),
    /// Opcode unknown at this version; the payload is the original bytes.
    Passthrough { opcode: i32, payload: Bytes },
}

/// An encoded packet ready for the transport to frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundFrame {
    pub opcode: i32,
    pub payload: Bytes,
}

/// What a sink wants done with a delivered packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Forward,
    Cancel,
}

/// Consumer of decoded packets. Subscription and routing live outside the codec.
pub trait PacketSink {
    /// Packet types this sink wants decoded. Others are forwarded undecoded.
    fn accepts(&self, _id: PacketTypeId) -> bool {
        true
    }

    fn on_packet(&mut self, packet: &Packet) -> Disposition;

    fn on_passthrough(&mut self, _opcode: i32, _payload: &Bytes) {}
}

/// Stateless decode/encode entry point over the shared catalog.
///
/// One dispatcher can serve any number of threads; every call works on
/// its own frame and buffer.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    settings: CodecSettings,
    catalog: &'static PacketCatalog,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            settings: CodecSettings::default(),
            catalog: catalog(),
        }
    }
}

impl Dispatcher {
    /// Fails with [`ProtocolError::ConfigError`] when `settings` do not validate.
    pub fn new(settings: CodecSettings) -> Result<Self> {
        let errors = settings.validate();
        if !errors.is_empty() {
            return Err(ProtocolError::ConfigError(format!(
                "Invalid codec settings:\n  - {}",
                errors.join("\n  - ")
            )));
        }
        Ok(Self {
            settings,
            catalog: catalog(),
        })
    }

    pub fn settings(&self) -> &CodecSettings {
        &self.settings
    }

    #[instrument(skip(self, frame), fields(opcode = frame.opcode, len = frame.payload.len()))]
    pub fn decode(&self, frame: &mut IncomingPacket, version: ProtocolVersion) -> Result<Inbound> {
        let _timer = Timer::start("decode");

        if frame.payload.len() > self.settings.max_packet_size {
            global_metrics().decode_failure();
            return Err(ProtocolError::OversizedPacket(frame.payload.len()));
        }

        let id = match frame.resolve(self.catalog, version) {
            Resolution::Packet(id) => id,
            Resolution::Passthrough => {
                global_metrics().passthrough();
                warn!(
                    direction = ?frame.direction,
                    phase = ?frame.phase,
                    %version,
                    "Unknown opcode, forwarding raw payload"
                );
                return Ok(Inbound::Passthrough {
                    opcode: frame.opcode,
                    payload: frame.payload.clone(),
                });
            }
        };

        match self.decode_as(id, &frame.payload, version) {
            Ok(packet) => {
                global_metrics().packet_decoded(frame.payload.len() as u64);
                debug!(packet = id.name(), "Decoded packet");
                Ok(Inbound::Decoded(packet))
            }
            Err(e) => {
                global_metrics().decode_failure();
                debug!(packet = id.name(), error = %e, "Decode failed");
                Err(e)
            }
        }
    }

    fn decode_as(&self, id: PacketTypeId, payload: &[u8], version: ProtocolVersion) -> Result<Packet> {
        let mut reader = PacketReader::new(payload, version, id);
        let packet = Packet::read_as(&mut reader)?;
        match reader.finish() {
            Ok(()) => Ok(packet),
            Err(ProtocolError::FrameMismatch(Framing::Trailing { remaining, .. }))
                if !self.settings.strict_frames =>
            {
                warn!(packet = id.name(), remaining, "Ignoring trailing bytes");
                Ok(packet)
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, packet), fields(packet = packet.type_id().name()))]
    pub fn encode(&self, packet: &Packet, version: ProtocolVersion) -> Result<OutboundFrame> {
        let _timer = Timer::start("encode");
        let id = packet.type_id();
        let opcode = self.catalog.opcode(id, version)?;

        let mut buf = BytesMut::new();
        let mut writer = PacketWriter::new(&mut buf, version, id);
        packet.write_to(&mut writer)?;

        if buf.len() > self.settings.max_packet_size {
            return Err(ProtocolError::OversizedPacket(buf.len()));
        }
        let payload = buf.freeze();
        global_metrics().packet_encoded(payload.len() as u64);
        debug!(opcode, len = payload.len(), "Encoded packet");
        Ok(OutboundFrame { opcode, payload })
    }

    /// Decode `frame` and hand the result to `sink`.
    ///
    /// Packet types the sink does not accept are forwarded without decoding.
    pub fn deliver<S>(
        &self,
        frame: &mut IncomingPacket,
        version: ProtocolVersion,
        sink: &mut S,
    ) -> Result<Disposition>
    where
        S: PacketSink + ?Sized,
    {
        if let Resolution::Packet(id) = frame.resolve(self.catalog, version) {
            if !sink.accepts(id) {
                return Ok(Disposition::Forward);
            }
        }

        match self.decode(frame, version)? {
            Inbound::Decoded(packet) => Ok(sink.on_packet(&packet)),
            Inbound::Passthrough { opcode, payload } => {
                sink.on_passthrough(opcode, &payload);
                Ok(Disposition::Forward)
            }
        }
    }
}

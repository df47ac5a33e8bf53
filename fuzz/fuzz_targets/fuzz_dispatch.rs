#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use versioned_protocol::protocol::catalog::{IncomingPacket, PacketTypeId};
use versioned_protocol::protocol::dispatcher::{Dispatcher, Inbound};
use versioned_protocol::protocol::version::ProtocolVersion;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let version = ProtocolVersion::ALL[data[0] as usize % ProtocolVersion::ALL.len()];
    let id = PacketTypeId::ALL[data[1] as usize % PacketTypeId::ALL.len()];
    let opcode = i32::from(data[2] & 0x3F);
    let payload = Bytes::copy_from_slice(&data[3..]);

    let dispatcher = Dispatcher::default();
    let mut frame = IncomingPacket::new(id.direction(), id.phase(), opcode, payload.clone());
    match dispatcher.decode(&mut frame, version) {
        // Anything that decodes must re-encode at the same version
        Ok(Inbound::Decoded(packet)) => {
            assert!(dispatcher.encode(&packet, version).is_ok());
        }
        Ok(Inbound::Passthrough { payload: forwarded, .. }) => assert_eq!(forwarded, payload),
        Err(_) => {}
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use versioned_protocol::core::cursor::ByteCursor;
use versioned_protocol::protocol::version::ProtocolVersion;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let version = ProtocolVersion::ALL[data[0] as usize % ProtocolVersion::ALL.len()];
    let mut cursor = ByteCursor::new(&data[1..]);

    // Mix every primitive until the input runs out
    while !cursor.is_empty() {
        let before = cursor.position();
        let ok = match cursor.read_u8().unwrap_or(0) % 5 {
            0 => cursor.read_var_int().is_ok(),
            1 => cursor.read_string(version, 64).is_ok(),
            2 => cursor.read_uuid().is_ok(),
            3 => cursor.read_i64().is_ok(),
            _ => cursor.read_bool().is_ok(),
        };
        assert!(cursor.position() > before);
        if !ok {
            break;
        }
    }
});

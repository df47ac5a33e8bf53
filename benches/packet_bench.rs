use bytes::{Bytes, BytesMut};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use versioned_protocol::core::cursor::ByteCursor;
use versioned_protocol::core::writer::ByteWriter;
use versioned_protocol::protocol::catalog::{ConnectionPhase, Direction, IncomingPacket};
use versioned_protocol::protocol::dispatcher::Dispatcher;
use versioned_protocol::protocol::packets::{InteractAction, InteractEntity, KeepAlive, Packet};
use versioned_protocol::protocol::types::{Hand, Vector3f};
use versioned_protocol::protocol::version::ProtocolVersion;

#[allow(clippy::unwrap_used)]
fn bench_packet_encode_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("packet_encode_decode");
    let dispatcher = Dispatcher::default();

    let packets = [
        (
            "keep_alive",
            Packet::PlayKeepAliveServerbound(KeepAlive { id: 123_456_789 }),
        ),
        (
            "interact_at",
            Packet::PlayInteractEntity(InteractEntity {
                entity_id: 42,
                action: InteractAction::InteractAt {
                    target: Vector3f::new(0.5, 1.5, -0.25),
                    hand: Hand::OffHand,
                },
                sneaking: true,
            }),
        ),
    ];

    for version in [ProtocolVersion::V1_8, ProtocolVersion::V1_12, ProtocolVersion::V1_20_5] {
        for (name, packet) in &packets {
            let Ok(out) = dispatcher.encode(packet, version) else {
                continue;
            };
            group.throughput(Throughput::Bytes(out.payload.len() as u64));

            group.bench_function(format!("encode_{name}_{version}"), |b| {
                b.iter(|| dispatcher.encode(black_box(packet), version).unwrap())
            });

            let (direction, phase) = (Direction::Serverbound, ConnectionPhase::Play);
            group.bench_function(format!("decode_{name}_{version}"), |b| {
                b.iter(|| {
                    let mut frame =
                        IncomingPacket::new(direction, phase, out.opcode, out.payload.clone());
                    dispatcher.decode(&mut frame, version).unwrap()
                })
            });
        }
    }

    group.finish();
}

#[allow(clippy::unwrap_used)]
fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("strings");
    let text = "a server address.example.org".repeat(8);
    let mut encoded = BytesMut::new();
    ByteWriter::new(&mut encoded)
        .write_string(ProtocolVersion::V1_20_5, &text, 255)
        .unwrap();
    let encoded: Bytes = encoded.freeze();

    group.throughput(Throughput::Bytes(encoded.len() as u64));
    group.bench_function("read_utf8", |b| {
        b.iter(|| {
            ByteCursor::new(black_box(&encoded))
                .read_string(ProtocolVersion::V1_20_5, 255)
                .unwrap()
        })
    });
    group.bench_function("read_legacy", |b| {
        b.iter(|| {
            ByteCursor::new(black_box(&encoded))
                .read_string(ProtocolVersion::V1_8, 255)
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_packet_encode_decode, bench_strings);
criterion_main!(benches);

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use tokio::task::JoinSet;
use versioned_protocol::protocol::catalog::{catalog, IncomingPacket, PacketTypeId};
use versioned_protocol::protocol::dispatcher::{Dispatcher, Inbound};
use versioned_protocol::protocol::packets::{InteractAction, InteractEntity, KeepAlive, Packet};
use versioned_protocol::protocol::types::Hand;
use versioned_protocol::protocol::version::ProtocolVersion;
use versioned_protocol::reflect::cache::resolution_cache;
use versioned_protocol::reflect::{
    ClassShape, DynamicObject, EnumType, FieldDecl, FieldType, HostEntity, HostObject, HostRuntime,
    HostValue, ReflectiveWrapper, WrappedUseEntity,
};

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_encode_decode_across_versions() {
    let iterations = 2_000usize;
    let dispatcher = Arc::new(Dispatcher::default());

    let mut tasks = JoinSet::new();
    for &version in ProtocolVersion::ALL {
        let dispatcher = Arc::clone(&dispatcher);
        tasks.spawn(async move {
            for i in 0..iterations {
                let packet = if i % 2 == 0 {
                    Packet::PlayKeepAliveServerbound(KeepAlive { id: i as i64 })
                } else {
                    Packet::PlayInteractEntity(InteractEntity {
                        entity_id: i as i32,
                        action: InteractAction::Attack,
                        sneaking: false,
                    })
                };
                let id: PacketTypeId = packet.type_id();
                let out = dispatcher.encode(&packet, version).unwrap();
                let mut frame = IncomingPacket::new(id.direction(), id.phase(), out.opcode, out.payload);
                let decoded = dispatcher.decode(&mut frame, version).unwrap();
                assert_eq!(decoded, Inbound::Decoded(packet));
            }
        });
    }

    while let Some(res) = tasks.join_next().await {
        res.unwrap();
    }
    assert!(catalog().conflicts().is_empty());
}

struct Nobody;

impl HostEntity for Nobody {
    fn entity_id(&self) -> i32 {
        -1
    }
}

struct Runtime;

impl HostRuntime for Runtime {
    type Entity = Nobody;

    fn find_enum(&self, name: &str) -> Option<EnumType> {
        match name {
            "EnumEntityUseAction" => Some(EnumType::new(name, ["INTERACT", "ATTACK", "INTERACT_AT"])),
            "EnumHand" => Some(EnumType::new(name, ["MAIN_HAND", "OFF_HAND"])),
            _ => None,
        }
    }

    fn entity_by_id(&self, _id: i32) -> Option<Nobody> {
        None
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_first_use_of_resolution_cache() {
    let shape = Arc::new(ClassShape::new(
        "concurrency::UseEntity",
        vec![
            FieldDecl::new("a", FieldType::Int),
            FieldDecl::new("b", FieldType::Enum("EnumEntityUseAction".into())),
            FieldDecl::new("c", FieldType::Vector),
            FieldDecl::new("d", FieldType::Enum("EnumHand".into())),
            FieldDecl::new("e", FieldType::Int),
        ],
    ));
    let runtime = Arc::new(Runtime);

    let mut tasks = JoinSet::new();
    for worker in 0..32i32 {
        let shape = Arc::clone(&shape);
        let runtime = Arc::clone(&runtime);
        tasks.spawn(async move {
            for i in 0..100 {
                let mut obj = DynamicObject::new(Arc::clone(&shape));
                obj.set(0, HostValue::Int(worker * 1000 + i)).unwrap();
                {
                    let mut wrapped =
                        WrappedUseEntity::new(&mut obj, runtime.as_ref(), ProtocolVersion::V1_16);
                    assert_eq!(wrapped.entity_id().unwrap(), worker * 1000 + i);
                    wrapped.set_hand(Hand::OffHand).unwrap();
                    assert_eq!(wrapped.hand().unwrap(), Hand::OffHand);
                }

                let mut wrapper = ReflectiveWrapper::new(&mut obj, ProtocolVersion::V1_16);
                wrapper.write_int(1, worker).unwrap();
                assert_eq!(wrapper.read_int(1).unwrap(), worker);
                assert_eq!(wrapper.resolution_count(), 1);
            }
        });
    }

    while let Some(res) = tasks.join_next().await {
        res.unwrap();
    }
    assert!(resolution_cache().field_count() >= 3);
}

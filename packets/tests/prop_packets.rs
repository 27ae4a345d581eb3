use bytestream::ByteWriter;
use codec::{BlockPosition, Codec, FieldValue, Message, Vec3f};
use packets::{builders, registry, world, NetworkNbt, PacketId};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_known_ids_never_panic(
        index in 0..PacketId::ALL.len(),
        body in prop::collection::vec(any::<u8>(), 0..96),
    ) {
        let nbt = NetworkNbt::new();
        let codec = Codec::new(registry().unwrap()).with_tag_grammar(&nbt);
        let mut writer = ByteWriter::new();
        writer.write_var_u32(PacketId::ALL[index].raw());
        writer.write_bytes(&body);
        let _ = codec.decode(writer.as_slice());
    }

    #[test]
    fn prop_update_block_roundtrip(
        x in any::<i32>(),
        y in -64i64..=i64::from(u32::MAX - 64),
        z in any::<i32>(),
        runtime_id in any::<u32>(),
    ) {
        let codec = Codec::new(registry().unwrap());
        let message = builders::update_block(BlockPosition::new(x, y, z), runtime_id);
        let bytes = codec.encode(&message).unwrap();
        prop_assert_eq!(codec.decode(&bytes).unwrap(), message);
    }

    #[test]
    fn prop_chat_roundtrip(source in "[ -~]{0,16}", text in "\\PC{0,64}") {
        let codec = Codec::new(registry().unwrap());
        let message = builders::chat(&source, &text);
        let bytes = codec.encode(&message).unwrap();
        prop_assert_eq!(codec.decode(&bytes).unwrap(), message);
    }

    #[test]
    fn prop_level_event_roundtrip(event in any::<i32>(), data in any::<i32>(), x in -1.0e6f32..1.0e6) {
        let codec = Codec::new(registry().unwrap());
        let message = Message::new(
            &world::LEVEL_EVENT,
            vec![
                FieldValue::SInt(i64::from(event)),
                FieldValue::Vec3(Vec3f::new(x, 0.0, -x)),
                FieldValue::SInt(i64::from(data)),
            ],
        );
        let bytes = codec.encode(&message).unwrap();
        prop_assert_eq!(codec.decode(&bytes).unwrap(), message);
    }
}

#![no_main]

use codec::{Codec, CodecLimits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(registry) = packets::registry() else {
        return;
    };
    let nbt = packets::NetworkNbt::with_max_depth(32);
    let codec = Codec::new(registry)
        .with_limits(CodecLimits::for_testing())
        .with_tag_grammar(&nbt);
    let limits = wire::Limits::for_testing();

    // Whole datagrams, with and without a compression byte.
    for compression in [false, true] {
        if let Ok(batch) = wire::decode_batch(data, compression, &limits) {
            if batch.is_compressed() {
                continue;
            }
            if let Ok(frames) = wire::split_frames(batch.payload, &limits) {
                let _ = codec.decode_frames(frames);
            }
        }
    }

    // Bare frames: anything that decodes must survive a re-encode. Bytes may
    // differ since non-canonical varints and booleans are normalized.
    if let Ok(message) = codec.decode(data) {
        let encoded = codec.encode(&message).expect("decoded message re-encodes");
        if !message.fields().iter().any(has_nan) {
            assert_eq!(codec.decode(&encoded).ok(), Some(message));
        }
    }
});

fn has_nan(value: &codec::FieldValue) -> bool {
    use codec::FieldValue;
    match value {
        FieldValue::F32(v) => v.is_nan(),
        FieldValue::F64(v) => v.is_nan(),
        FieldValue::Vec2(v) => v.x.is_nan() || v.y.is_nan(),
        FieldValue::Vec3(v) => v.x.is_nan() || v.y.is_nan() || v.z.is_nan(),
        FieldValue::Array(items) | FieldValue::Struct(items) => items.iter().any(has_nan),
        FieldValue::Variant(variant) => variant.fields.iter().any(has_nan),
        _ => false,
    }
}

#![no_main]

use bytestream::{ByteReader, Endianness};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 8;
        idx += 1;

        let before = reader.position();
        let ok = match op {
            0 => reader.read_u8().is_ok(),
            1 => reader.read_u32(Endianness::Big).is_ok(),
            2 => reader.read_var_u32().is_ok(),
            3 => reader.read_var_u64().is_ok(),
            4 => reader.read_zigzag32().is_ok(),
            5 => reader.read_zigzag64().is_ok(),
            6 => reader.read_var_string().is_ok(),
            _ => reader.read_string32(Endianness::Little).is_ok(),
        };
        if !ok {
            assert_eq!(reader.position(), before, "failed read moved the cursor");
        }
    }
});

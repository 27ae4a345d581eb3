use bytestream::{varint, ByteReader, ByteWriter, Endianness, StreamError};

#[test]
fn boundary_integers_roundtrip() {
    let mut writer = ByteWriter::new();
    writer.write_var_u32(0);
    writer.write_var_u32(u32::MAX);
    writer.write_var_u64(u64::MAX);
    writer.write_zigzag32(i32::MIN);
    writer.write_zigzag32(i32::MAX);
    writer.write_zigzag32(-1);
    writer.write_zigzag64(i64::MIN);
    writer.write_zigzag64(i64::MAX);
    writer.write_i64(i64::MIN, Endianness::Big);
    writer.write_u64(u64::MAX, Endianness::Little);
    let bytes = writer.finish();

    let mut reader = ByteReader::new(&bytes);
    assert_eq!(reader.read_var_u32().unwrap(), 0);
    assert_eq!(reader.read_var_u32().unwrap(), u32::MAX);
    assert_eq!(reader.read_var_u64().unwrap(), u64::MAX);
    assert_eq!(reader.read_zigzag32().unwrap(), i32::MIN);
    assert_eq!(reader.read_zigzag32().unwrap(), i32::MAX);
    assert_eq!(reader.read_zigzag32().unwrap(), -1);
    assert_eq!(reader.read_zigzag64().unwrap(), i64::MIN);
    assert_eq!(reader.read_zigzag64().unwrap(), i64::MAX);
    assert_eq!(reader.read_i64(Endianness::Big).unwrap(), i64::MIN);
    assert_eq!(reader.read_u64(Endianness::Little).unwrap(), u64::MAX);
    assert!(reader.is_empty());
}

#[test]
fn max_var_u32_needs_every_group() {
    let mut writer = ByteWriter::new();
    writer.write_var_u32(u32::MAX);
    let bytes = writer.finish();
    assert_eq!(bytes.len(), varint::MAX_VAR_U32_BYTES);

    let mut reader = ByteReader::new(&bytes[..4]);
    assert!(matches!(
        reader.read_var_u32(),
        Err(StreamError::EndOfBuffer { .. })
    ));
}

#[test]
fn unicode_strings_roundtrip() {
    let mut writer = ByteWriter::new();
    writer.write_var_string("§aGrüße ✓").unwrap();
    writer.write_string32("", Endianness::Big).unwrap();
    let bytes = writer.finish();

    let mut reader = ByteReader::new(&bytes);
    assert_eq!(reader.read_var_string().unwrap(), "§aGrüße ✓");
    assert_eq!(reader.read_string32(Endianness::Big).unwrap(), "");
}

#[test]
fn var_bytes_roundtrip() {
    let mut writer = ByteWriter::new();
    writer.write_var_bytes(&[9, 8, 7]).unwrap();
    let bytes = writer.finish();
    assert_eq!(bytes, vec![3, 9, 8, 7]);

    let mut reader = ByteReader::new(&bytes);
    assert_eq!(reader.read_var_bytes().unwrap(), &[9, 8, 7]);
}

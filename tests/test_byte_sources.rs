use bytefield::reader::{BufferedByteSource, ByteReader, ByteSource, InMemoryByteSource};
use std::fs;
use std::io::Cursor;
use tempdir::TempDir;

/// A small resource-table-like record: magic, count, name, delta time, payload.
fn record() -> Vec<u8> {
    let mut bytes = b"RSRC".to_vec();
    bytes.extend_from_slice(&2u16.to_be_bytes());
    bytes.extend_from_slice(b"intro\0");
    bytes.extend_from_slice(&[0x81, 0x48]);
    bytes.extend_from_slice(&[0xAA, 0xBB, 0xCC]);
    bytes
}

fn decode_record<S: ByteSource + ?Sized>(source: &mut S) {
    let mut reader = ByteReader::new(source);
    assert_eq!(reader.read_bytes(4), b"RSRC");
    assert_eq!(reader.read_u16_be().unwrap(), 2);
    assert_eq!(reader.read_null_terminated_string(None), "intro");
    assert_eq!(reader.read_var_int().unwrap(), 200);
    assert_eq!(reader.read_bytes(16), vec![0xAA, 0xBB, 0xCC]);
    assert!(reader.is_eof());
    assert_eq!(reader.read_u32_le().unwrap(), 0);
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_all_sources_decode_alike() {
    init_logger();
    let dir = TempDir::new("bytefield").unwrap();
    let path = dir.path().join("record.bin");
    fs::write(&path, record()).unwrap();

    let mut in_memory = InMemoryByteSource::from_file(&path).unwrap();
    decode_record(&mut in_memory);

    let mut buffered = BufferedByteSource::from_file(&path).unwrap();
    decode_record(&mut buffered);

    let bytes = record();
    let mut cursor = Cursor::new(&bytes[..]);
    decode_record(&mut cursor);
}

#[test]
fn test_caller_keeps_cursor_between_readers() {
    init_logger();
    let mut source = InMemoryByteSource::from_vec(record());
    {
        let mut reader = ByteReader::new(&mut source);
        reader.read_bytes(4);
    }
    assert_eq!(source.position(), 4);

    let mut reader = ByteReader::new(&mut source);
    assert_eq!(reader.read_u16_be().unwrap(), 2);
    reader.set_position(0);
    assert_eq!(reader.read_null_terminated_string(Some(4)), "RSRC");
}

#[test]
fn test_buffered_source_seeks_back() {
    init_logger();
    let dir = TempDir::new("bytefield").unwrap();
    let path = dir.path().join("seek.bin");
    fs::write(&path, record()).unwrap();

    let mut source = BufferedByteSource::from_file(&path).unwrap();
    assert_eq!(source.length(), record().len() as u64);

    let mut reader = ByteReader::new(&mut source);
    reader.set_position(12);
    assert_eq!(reader.read_var_int().unwrap(), 200);
    reader.set_position(4);
    assert_eq!(reader.read_u16_be().unwrap(), 2);
    assert_eq!(reader.remaining(), record().len() as u64 - 6);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new("bytefield").unwrap();
    assert!(BufferedByteSource::from_file(dir.path().join("nope.bin")).is_err());
    assert!(InMemoryByteSource::from_file(dir.path().join("nope.bin")).is_err());
}

use flate2::write::{DeflateEncoder, GzEncoder};
use flate2::Compression;
use std::io::{Read, Write};
use unflate::stream::{DeflateDecoder, GzipDecoder};

#[test]
fn deflate_reader_round_trip() {
    let original = b"streamed through the io adapter ".repeat(1000);
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(6));
    encoder.write_all(&original).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut decoder = DeflateDecoder::new(compressed.as_slice());
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn gzip_reader_serves_small_reads() {
    let original = b"chunked reads".to_vec();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(6));
    encoder.write_all(&original).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut decoder = GzipDecoder::new(compressed.as_slice());
    let mut decoded = Vec::new();
    let mut chunk = [0u8; 3];
    loop {
        let n = decoder.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        decoded.extend_from_slice(&chunk[..n]);
    }
    assert_eq!(decoded, original);
}

#[test]
fn gzip_reader_surfaces_decode_errors() {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(6));
    encoder.write_all(b"about to be corrupted").unwrap();
    let mut compressed = encoder.finish().unwrap();
    let crc_at = compressed.len() - 8;
    compressed[crc_at] ^= 0x01;

    let mut decoder = GzipDecoder::new(compressed.as_slice());
    let mut decoded = Vec::new();
    assert!(decoder.read_to_end(&mut decoded).is_err());
}

#[test]
fn empty_source_reports_truncation() {
    let mut decoder = DeflateDecoder::new([].as_slice());
    let mut decoded = Vec::new();
    assert!(decoder.read_to_end(&mut decoded).is_err());
}

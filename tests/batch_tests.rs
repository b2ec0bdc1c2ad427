mod common;

use common::Lcg;
use flate2::write::{DeflateEncoder, GzEncoder};
use flate2::Compression;
use std::io::Write;
use unflate::batch::BatchDecompressor;
use unflate::error::Error;

fn gzip_of(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(6));
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn gunzip_batch_round_trips() {
    let mut rng = Lcg::new(0xBA7C_4000);
    let originals: Vec<Vec<u8>> = (0..16)
        .map(|i| rng.bytes(1000 * (i + 1)))
        .collect();
    let members: Vec<Vec<u8>> = originals.iter().map(|d| gzip_of(d)).collect();
    let inputs: Vec<&[u8]> = members.iter().map(|m| m.as_slice()).collect();

    let batch = BatchDecompressor::new();
    let results = batch.gunzip_batch(&inputs);
    assert_eq!(results.len(), originals.len());
    for (result, original) in results.iter().zip(&originals) {
        assert_eq!(result.as_ref().unwrap(), original);
    }
}

#[test]
fn one_bad_member_does_not_poison_the_batch() {
    let good = gzip_of(b"fine");
    let mut bad = gzip_of(b"broken");
    let crc_at = bad.len() - 8;
    bad[crc_at] ^= 0x01;

    let inputs: Vec<&[u8]> = vec![&good, &bad, &good];
    let results = BatchDecompressor::new().gunzip_batch(&inputs);
    assert_eq!(results[0].as_ref().unwrap(), b"fine");
    assert_eq!(results[1], Err(Error::ChecksumMismatch));
    assert_eq!(results[2].as_ref().unwrap(), b"fine");
}

#[test]
fn inflate_batch_with_output_limit() {
    let big: Vec<u8> = vec![0u8; 100_000];
    let small = b"small".to_vec();
    let deflated: Vec<Vec<u8>> = [big.as_slice(), small.as_slice()]
        .iter()
        .map(|data| {
            let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(6));
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        })
        .collect();
    let inputs: Vec<&[u8]> = deflated.iter().map(|d| d.as_slice()).collect();

    let batch = BatchDecompressor::with_output_limit(10_000);
    let results = batch.inflate_batch(&inputs);
    assert_eq!(results[0], Err(Error::OutputLimitExceeded));
    assert_eq!(results[1].as_ref().unwrap(), b"small");
}

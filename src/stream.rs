//! `std::io::Read` adapters over the one-shot decoders.
//!
//! The core decodes a complete in-memory stream, so these adapters
//! buffer their source on first read, decode once, and then serve the
//! result. Decode failures surface as `io::Error` from that first read.

use crate::decompress;
use crate::error::Error;
use std::cmp::min;
use std::io::{self, Read};

pub struct DeflateDecoder<R: Read> {
    inner: Inner<R>,
}

pub struct GzipDecoder<R: Read> {
    inner: Inner<R>,
}

impl<R: Read> DeflateDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: Inner::new(reader, decompress::inflate),
        }
    }
}

impl<R: Read> GzipDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: Inner::new(reader, decompress::inflate_gzip),
        }
    }
}

impl<R: Read> Read for DeflateDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read> Read for GzipDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

struct Inner<R: Read> {
    source: Option<R>,
    decode: fn(&[u8]) -> Result<Vec<u8>, Error>,
    decoded: Vec<u8>,
    pos: usize,
}

impl<R: Read> Inner<R> {
    fn new(source: R, decode: fn(&[u8]) -> Result<Vec<u8>, Error>) -> Self {
        Self {
            source: Some(source),
            decode,
            decoded: Vec::new(),
            pos: 0,
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(mut source) = self.source.take() {
            let mut compressed = Vec::new();
            source.read_to_end(&mut compressed)?;
            self.decoded = (self.decode)(&compressed).map_err(io::Error::from)?;
        }
        let count = min(buf.len(), self.decoded.len() - self.pos);
        buf[..count].copy_from_slice(&self.decoded[self.pos..self.pos + count]);
        self.pos += count;
        Ok(count)
    }
}

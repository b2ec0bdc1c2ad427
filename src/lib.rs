#![forbid(unsafe_code)]

pub mod adler32;
pub mod api;
pub mod batch;
pub mod bitstream;
pub mod common;
pub mod crc32;
pub mod decompress;
pub mod error;
pub mod huffman;
pub mod stream;

pub use adler32::adler32;
pub use api::Decompressor;
pub use crc32::crc32;
pub use decompress::{inflate, inflate_gzip, inflate_zlib};
pub use error::Error;

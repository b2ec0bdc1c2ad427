use crate::decompress;
use std::io;

/// Decoding front end with guard rails against decompression bombs.
///
/// The ratio limit rejects outputs implausibly larger than their input
/// (DEFLATE tops out near 1032:1; the default allows 2000:1 plus slack),
/// and an optional absolute cap bounds the allocation outright. Both are
/// enforced by the output buffer during decoding, so a forged gzip ISIZE
/// cannot talk us into allocating past them.
pub struct Decompressor {
    max_memory_limit: usize,
    limit_ratio: usize,
}

impl Decompressor {
    pub fn new() -> Self {
        Self {
            max_memory_limit: usize::MAX,
            limit_ratio: 2000,
        }
    }

    pub fn set_max_memory_limit(&mut self, limit: usize) {
        self.max_memory_limit = limit;
    }

    pub fn set_limit_ratio(&mut self, ratio: usize) {
        self.limit_ratio = ratio;
    }

    fn output_budget(&self, input_len: usize) -> usize {
        input_len
            .saturating_mul(self.limit_ratio)
            .saturating_add(4096)
            .min(self.max_memory_limit)
    }

    pub fn decompress_deflate(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        decompress::inflate_limited(data, self.output_budget(data.len())).map_err(Into::into)
    }

    pub fn decompress_zlib(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        decompress::inflate_zlib_limited(data, self.output_budget(data.len())).map_err(Into::into)
    }

    pub fn decompress_gzip(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        // The trailer states the decoded size; refusing oversized members
        // here gives a clearer error than tripping the cap mid-decode.
        if let Some(expected_size) = decompress::gzip_decoded_size_hint(data) {
            let ratio_limit = data
                .len()
                .saturating_mul(self.limit_ratio)
                .saturating_add(4096);
            if expected_size > ratio_limit {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!(
                        "Expected size {} exceeds safety limit for input size {}",
                        expected_size,
                        data.len()
                    ),
                ));
            }
            if expected_size > self.max_memory_limit {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!(
                        "Expected size {} exceeds maximum memory limit {}",
                        expected_size, self.max_memory_limit
                    ),
                ));
            }
        }
        decompress::inflate_gzip_limited(data, self.output_budget(data.len())).map_err(Into::into)
    }
}

impl Default for Decompressor {
    fn default() -> Self {
        Self::new()
    }
}

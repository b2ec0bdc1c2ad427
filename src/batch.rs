use crate::decompress;
use crate::error::Error;
use rayon::prelude::*;

/// Decodes independent inputs across the rayon thread pool. Decoders
/// share only the immutable fixed coders, so no coordination is needed.
pub struct BatchDecompressor {
    max_output_len: usize,
}

impl BatchDecompressor {
    pub fn new() -> Self {
        Self {
            max_output_len: usize::MAX,
        }
    }

    /// Caps the decoded size of each individual input.
    pub fn with_output_limit(max_output_len: usize) -> Self {
        Self { max_output_len }
    }

    pub fn inflate_batch(&self, inputs: &[&[u8]]) -> Vec<Result<Vec<u8>, Error>> {
        inputs
            .par_iter()
            .map(|&input| decompress::inflate_limited(input, self.max_output_len))
            .collect()
    }

    pub fn gunzip_batch(&self, inputs: &[&[u8]]) -> Vec<Result<Vec<u8>, Error>> {
        inputs
            .par_iter()
            .map(|&input| decompress::inflate_gzip_limited(input, self.max_output_len))
            .collect()
    }
}

impl Default for BatchDecompressor {
    fn default() -> Self {
        Self::new()
    }
}

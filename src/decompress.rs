//! DEFLATE block decoding and the gzip/zlib container wrappers.

use crate::adler32::adler32;
use crate::bitstream::BitReader;
use crate::common::*;
use crate::crc32::crc32;
use crate::error::Error;
use crate::huffman::HuffmanTree;
use log::trace;
use std::sync::OnceLock;

// Base values and extra-bit counts for the length alphabet
// (litlen symbols 257..=285; symbol 285 is the fixed value 258).
const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115, 131,
    163, 195, 227, 258,
];
const LENGTH_EXTRA_BITS: [u32; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

// Base values and extra-bit counts for distance symbols 0..=29.
const OFFSET_BASE: [u16; 30] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];
const OFFSET_EXTRA_BITS: [u32; 30] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13,
];

// Order in which the dynamic header stores code-length-code lengths
// (RFC 1951 §3.2.7).
const PRECODE_LENS_PERMUTATION: [usize; DEFLATE_NUM_PRECODE_SYMS] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Decoded output. The entire stream is retained so the most recent
/// 32 KiB is always addressable for back-references.
struct OutputBuffer {
    data: Vec<u8>,
    limit: usize,
}

impl OutputBuffer {
    fn with_limit(limit: usize) -> Self {
        Self {
            data: Vec::new(),
            limit,
        }
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn check_budget(&self, additional: usize) -> Result<(), Error> {
        if self.limit.saturating_sub(self.data.len()) < additional {
            return Err(Error::OutputLimitExceeded);
        }
        Ok(())
    }

    /// Keeps at least one max-length match of headroom so a copy never
    /// reallocates mid-match; grows by doubling with a 32 KiB floor.
    fn ensure_headroom(&mut self) {
        if self.data.capacity() - self.data.len() < DEFLATE_MAX_MATCH_LEN {
            let growth = self.data.capacity().max(OUTPUT_MIN_GROWTH);
            self.data.reserve(growth);
        }
    }

    fn push(&mut self, byte: u8) -> Result<(), Error> {
        self.check_budget(1)?;
        self.ensure_headroom();
        self.data.push(byte);
        Ok(())
    }

    fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.check_budget(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Copies `length` bytes starting `offset` back from the cursor. The
    /// caller has already validated `1 <= offset <= len`.
    fn copy_match(&mut self, offset: usize, length: usize) -> Result<(), Error> {
        debug_assert!(offset >= 1 && offset <= self.data.len());
        debug_assert!((DEFLATE_MIN_MATCH_LEN..=DEFLATE_MAX_MATCH_LEN).contains(&length));
        self.check_budget(length)?;
        self.ensure_headroom();
        let start = self.data.len() - offset;
        if offset >= length {
            self.data.extend_from_within(start..start + length);
        } else {
            // Overlapping match: the source runs into bytes this copy is
            // itself producing (run-length extension), so the copy must
            // stay byte-sequential.
            for i in 0..length {
                let byte = self.data[start + i];
                self.data.push(byte);
            }
        }
        Ok(())
    }

    fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

/// Decodes a raw DEFLATE stream into a freshly allocated buffer.
pub fn inflate(input: &[u8]) -> Result<Vec<u8>, Error> {
    inflate_limited(input, usize::MAX)
}

/// Like [`inflate`], but fails with `OutputLimitExceeded` once the output
/// would pass `max_output_len` bytes.
pub fn inflate_limited(input: &[u8], max_output_len: usize) -> Result<Vec<u8>, Error> {
    let mut reader = BitReader::new(input);
    let mut output = OutputBuffer::with_limit(max_output_len);
    decode_blocks(&mut reader, &mut output)?;
    Ok(output.into_vec())
}

fn decode_blocks(reader: &mut BitReader, output: &mut OutputBuffer) -> Result<(), Error> {
    loop {
        let is_final = reader.get_bit()? != 0;
        let block_type = reader.get_bits(2)?;
        trace!("block: final={} type={}", is_final, block_type);

        match block_type {
            DEFLATE_BLOCKTYPE_STORED => copy_stored_block(reader, output)?,
            DEFLATE_BLOCKTYPE_FIXED_HUFFMAN => {
                decode_huffman_block(reader, fixed_litlen_tree(), fixed_offset_tree(), output)?
            }
            DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN => {
                let (litlen_tree, offset_tree) = read_dynamic_header(reader)?;
                decode_huffman_block(reader, &litlen_tree, &offset_tree, output)?
            }
            _ => return Err(Error::ReservedBlockType),
        }

        if is_final {
            return Ok(());
        }
    }
}

/// Stored block (RFC 1951 §3.2.4): realign to a byte boundary, read
/// LEN/NLEN straight from the input bytes, copy LEN bytes through.
fn copy_stored_block(reader: &mut BitReader, output: &mut OutputBuffer) -> Result<(), Error> {
    reader.align_to_byte();
    let header = reader.take_bytes(4)?;
    let len = u16::from_le_bytes([header[0], header[1]]);
    let nlen = u16::from_le_bytes([header[2], header[3]]);
    if nlen != !len {
        return Err(Error::MalformedHeader);
    }
    let bytes = reader.take_bytes(len as usize)?;
    output.extend_from_slice(bytes)
}

/// Parses the dynamic-block header (RFC 1951 §3.2.7) and builds the
/// literal/length and distance decoders it describes.
fn read_dynamic_header(reader: &mut BitReader) -> Result<(HuffmanTree, HuffmanTree), Error> {
    let num_litlen_syms = 257 + reader.get_bits(5)? as usize;
    let num_offset_syms = 1 + reader.get_bits(5)? as usize;
    let num_explicit_precode_lens = 4 + reader.get_bits(4)? as usize;
    // Five raw bits can encode counts past the alphabet maxima (286 / 32).
    if num_litlen_syms > DEFLATE_NUM_LITLEN_SYMS - 2 || num_offset_syms > DEFLATE_NUM_OFFSET_SYMS {
        return Err(Error::MalformedHeader);
    }
    trace!(
        "dynamic header: hlit={} hdist={} hclen={}",
        num_litlen_syms,
        num_offset_syms,
        num_explicit_precode_lens
    );

    let mut precode_lens = [0u8; DEFLATE_NUM_PRECODE_SYMS];
    for i in 0..num_explicit_precode_lens {
        precode_lens[PRECODE_LENS_PERMUTATION[i]] = reader.get_bits(3)? as u8;
    }
    let precode_tree = HuffmanTree::from_lengths(&precode_lens, PRECODE_TABLEBITS)?;

    // Expand the run-length-coded lengths for both alphabets in one pass.
    let total_syms = num_litlen_syms + num_offset_syms;
    let mut lens = [0u8; DEFLATE_NUM_LITLEN_SYMS + DEFLATE_NUM_OFFSET_SYMS];
    let mut i = 0;
    while i < total_syms {
        let presym = precode_tree.decode_symbol(reader)?;
        match presym {
            0..=15 => {
                lens[i] = presym as u8;
                i += 1;
            }
            16 => {
                if i == 0 {
                    return Err(Error::MalformedCodeLengths);
                }
                let count = 3 + reader.get_bits(2)? as usize;
                if count > total_syms - i {
                    return Err(Error::MalformedCodeLengths);
                }
                let prev = lens[i - 1];
                for _ in 0..count {
                    lens[i] = prev;
                    i += 1;
                }
            }
            17 => {
                let count = 3 + reader.get_bits(3)? as usize;
                if count > total_syms - i {
                    return Err(Error::MalformedCodeLengths);
                }
                i += count;
            }
            18 => {
                let count = 11 + reader.get_bits(7)? as usize;
                if count > total_syms - i {
                    return Err(Error::MalformedCodeLengths);
                }
                i += count;
            }
            // The code-length alphabet has exactly 19 symbols.
            _ => return Err(Error::MalformedCodeLengths),
        }
    }

    let litlen_tree = HuffmanTree::from_lengths(&lens[..num_litlen_syms], LITLEN_TABLEBITS)?;
    let offset_tree =
        HuffmanTree::from_lengths(&lens[num_litlen_syms..total_syms], OFFSET_TABLEBITS)?;
    Ok((litlen_tree, offset_tree))
}

/// The literal/match loop shared by fixed and dynamic blocks.
fn decode_huffman_block(
    reader: &mut BitReader,
    litlen_tree: &HuffmanTree,
    offset_tree: &HuffmanTree,
    output: &mut OutputBuffer,
) -> Result<(), Error> {
    loop {
        let sym = litlen_tree.decode_symbol(reader)?;
        if sym < DEFLATE_END_OF_BLOCK {
            output.push(sym as u8)?;
        } else if sym == DEFLATE_END_OF_BLOCK {
            return Ok(());
        } else {
            if sym > DEFLATE_LAST_LEN_SYM {
                return Err(Error::MalformedSymbol);
            }
            let len_idx = (sym - DEFLATE_FIRST_LEN_SYM) as usize;
            let mut length = LENGTH_BASE[len_idx] as usize;
            let extra = LENGTH_EXTRA_BITS[len_idx];
            if extra > 0 {
                length += reader.get_bits(extra)? as usize;
            }

            let offset_sym = offset_tree.decode_symbol(reader)?;
            if offset_sym >= DEFLATE_FIRST_RESERVED_OFFSET_SYM {
                return Err(Error::MalformedSymbol);
            }
            let mut offset = OFFSET_BASE[offset_sym as usize] as usize;
            let extra = OFFSET_EXTRA_BITS[offset_sym as usize];
            if extra > 0 {
                offset += reader.get_bits(extra)? as usize;
            }

            if offset > output.len() {
                return Err(Error::InvalidDistance);
            }
            output.copy_match(offset, length)?;
        }
    }
}

/// The fixed-Huffman literal/length decoder (RFC 1951 §3.2.6), built on
/// first use and shared for the life of the process.
pub fn fixed_litlen_tree() -> &'static HuffmanTree {
    static TREE: OnceLock<HuffmanTree> = OnceLock::new();
    TREE.get_or_init(|| {
        let mut lens = [0u8; DEFLATE_NUM_LITLEN_SYMS];
        let mut i = 0;
        while i < 144 {
            lens[i] = 8;
            i += 1;
        }
        while i < 256 {
            lens[i] = 9;
            i += 1;
        }
        while i < 280 {
            lens[i] = 7;
            i += 1;
        }
        while i < DEFLATE_NUM_LITLEN_SYMS {
            lens[i] = 8;
            i += 1;
        }
        HuffmanTree::from_lengths(&lens, LITLEN_TABLEBITS)
            .expect("fixed literal/length code is well formed")
    })
}

/// The fixed distance decoder: all 32 symbols are 5-bit codes.
pub fn fixed_offset_tree() -> &'static HuffmanTree {
    static TREE: OnceLock<HuffmanTree> = OnceLock::new();
    TREE.get_or_init(|| {
        let lens = [5u8; DEFLATE_NUM_OFFSET_SYMS];
        HuffmanTree::from_lengths(&lens, FIXED_OFFSET_TABLEBITS)
            .expect("fixed distance code is well formed")
    })
}

/// Decodes a gzip member (RFC 1952) and verifies its CRC-32 and ISIZE
/// trailer against the produced output.
pub fn inflate_gzip(input: &[u8]) -> Result<Vec<u8>, Error> {
    inflate_gzip_limited(input, usize::MAX)
}

pub fn inflate_gzip_limited(input: &[u8], max_output_len: usize) -> Result<Vec<u8>, Error> {
    let payload = strip_gzip_header(input)?;
    let output = inflate_limited(payload, max_output_len)?;

    let trailer = &input[input.len() - GZIP_FOOTER_SIZE..];
    let stored_crc = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    let stored_isize = u32::from_le_bytes([trailer[4], trailer[5], trailer[6], trailer[7]]);

    if crc32(0, &output) != stored_crc {
        return Err(Error::ChecksumMismatch);
    }
    // ISIZE is the uncompressed length mod 2^32.
    if output.len() as u32 != stored_isize {
        return Err(Error::LengthMismatch);
    }
    Ok(output)
}

fn strip_gzip_header(input: &[u8]) -> Result<&[u8], Error> {
    if input.len() < GZIP_MIN_OVERHEAD {
        return Err(Error::TruncatedInput);
    }
    if input[0] != GZIP_ID1 || input[1] != GZIP_ID2 {
        return Err(Error::MalformedContainer("bad gzip magic"));
    }
    if input[2] != GZIP_CM_DEFLATE {
        return Err(Error::MalformedContainer("unsupported compression method"));
    }
    let flg = input[3];
    if flg & GZIP_FRESERVED != 0 {
        return Err(Error::MalformedContainer("reserved flag bits set"));
    }

    // MTIME, XFL and OS carry no information we act on.
    let mut idx = GZIP_MIN_HEADER_SIZE;

    if flg & GZIP_FEXTRA != 0 {
        if input.len() - idx < 2 {
            return Err(Error::TruncatedInput);
        }
        let xlen = u16::from_le_bytes([input[idx], input[idx + 1]]) as usize;
        idx += 2 + xlen;
    }
    if flg & GZIP_FNAME != 0 {
        idx = skip_zero_terminated(input, idx)?;
    }
    if flg & GZIP_FCOMMENT != 0 {
        idx = skip_zero_terminated(input, idx)?;
    }
    if flg & GZIP_FHCRC != 0 {
        // Header CRC16 is skipped, not verified.
        idx += 2;
    }

    if idx > input.len() || input.len() - idx < GZIP_FOOTER_SIZE {
        return Err(Error::TruncatedInput);
    }
    Ok(&input[idx..input.len() - GZIP_FOOTER_SIZE])
}

fn skip_zero_terminated(input: &[u8], mut idx: usize) -> Result<usize, Error> {
    while idx < input.len() {
        if input[idx] == 0 {
            return Ok(idx + 1);
        }
        idx += 1;
    }
    Err(Error::TruncatedInput)
}

/// Reads the ISIZE field from a gzip trailer without decoding anything.
/// Callers use it to budget the output allocation up front.
pub fn gzip_decoded_size_hint(input: &[u8]) -> Option<usize> {
    if input.len() < GZIP_MIN_OVERHEAD || input[0] != GZIP_ID1 || input[1] != GZIP_ID2 {
        return None;
    }
    let trailer = &input[input.len() - 4..];
    Some(u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]) as usize)
}

/// Decodes a zlib stream (RFC 1950) and verifies its Adler-32 trailer.
pub fn inflate_zlib(input: &[u8]) -> Result<Vec<u8>, Error> {
    inflate_zlib_limited(input, usize::MAX)
}

pub fn inflate_zlib_limited(input: &[u8], max_output_len: usize) -> Result<Vec<u8>, Error> {
    if input.len() < ZLIB_MIN_OVERHEAD {
        return Err(Error::TruncatedInput);
    }
    let cmf = input[0];
    let flg = input[1];
    if u16::from_be_bytes([cmf, flg]) % 31 != 0 {
        return Err(Error::MalformedContainer("zlib header check failed"));
    }
    if cmf & 0x0F != ZLIB_CM_DEFLATE {
        return Err(Error::MalformedContainer("unsupported compression method"));
    }
    if cmf >> 4 > ZLIB_CINFO_32K_WINDOW {
        return Err(Error::MalformedContainer("window size too large"));
    }
    if flg & 0x20 != 0 {
        return Err(Error::MalformedContainer("preset dictionary not supported"));
    }

    let payload = &input[ZLIB_MIN_HEADER_SIZE..input.len() - ZLIB_FOOTER_SIZE];
    let output = inflate_limited(payload, max_output_len)?;

    let trailer = &input[input.len() - ZLIB_FOOTER_SIZE..];
    let stored_adler = u32::from_be_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    if adler32(1, &output) != stored_adler {
        return Err(Error::ChecksumMismatch);
    }
    Ok(output)
}

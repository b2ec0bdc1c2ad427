pub const DEFLATE_BLOCKTYPE_STORED: u32 = 0;
pub const DEFLATE_BLOCKTYPE_FIXED_HUFFMAN: u32 = 1;
pub const DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN: u32 = 2;

pub const DEFLATE_MIN_MATCH_LEN: usize = 3;
pub const DEFLATE_MAX_MATCH_LEN: usize = 258;
pub const DEFLATE_MAX_MATCH_OFFSET: usize = 32768;

pub const DEFLATE_NUM_PRECODE_SYMS: usize = 19;
pub const DEFLATE_NUM_LITLEN_SYMS: usize = 288;
pub const DEFLATE_NUM_OFFSET_SYMS: usize = 32;

pub const DEFLATE_MAX_NUM_SYMS: usize = 288;
pub const DEFLATE_MAX_CODEWORD_LEN: u8 = 15;

pub const DEFLATE_END_OF_BLOCK: u16 = 256;
pub const DEFLATE_FIRST_LEN_SYM: u16 = 257;
pub const DEFLATE_LAST_LEN_SYM: u16 = 285;
pub const DEFLATE_FIRST_RESERVED_OFFSET_SYM: u16 = 30;

// Lookup-table widths per alphabet. A codeword no longer than the width
// resolves in a single table probe; longer codewords finish by descending
// the tree from the node the probe lands on.
pub const PRECODE_TABLEBITS: u32 = 7;
pub const LITLEN_TABLEBITS: u32 = 9;
pub const OFFSET_TABLEBITS: u32 = 6;
pub const FIXED_OFFSET_TABLEBITS: u32 = 5;

// Output buffer growth: keep at least one max-length match of headroom so
// a copy never reallocates mid-match, and grow in 32 KiB-or-doubling steps.
pub const OUTPUT_MIN_GROWTH: usize = 32 * 1024;

pub const ZLIB_MIN_HEADER_SIZE: usize = 2;
pub const ZLIB_FOOTER_SIZE: usize = 4;
pub const ZLIB_MIN_OVERHEAD: usize = ZLIB_MIN_HEADER_SIZE + ZLIB_FOOTER_SIZE;

pub const ZLIB_CM_DEFLATE: u8 = 8;
pub const ZLIB_CINFO_32K_WINDOW: u8 = 7;

pub const GZIP_MIN_HEADER_SIZE: usize = 10;
pub const GZIP_FOOTER_SIZE: usize = 8;
pub const GZIP_MIN_OVERHEAD: usize = GZIP_MIN_HEADER_SIZE + GZIP_FOOTER_SIZE;

pub const GZIP_ID1: u8 = 0x1F;
pub const GZIP_ID2: u8 = 0x8B;
pub const GZIP_CM_DEFLATE: u8 = 8;

pub const GZIP_FTEXT: u8 = 0x01;
pub const GZIP_FHCRC: u8 = 0x02;
pub const GZIP_FEXTRA: u8 = 0x04;
pub const GZIP_FNAME: u8 = 0x08;
pub const GZIP_FCOMMENT: u8 = 0x10;
pub const GZIP_FRESERVED: u8 = 0xE0;

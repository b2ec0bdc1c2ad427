use thiserror::Error;

/// Everything that can go wrong while decoding.
///
/// The first six variants are format errors in the DEFLATE stream itself;
/// the container variants cover gzip/zlib framing and trailer checks.
/// None of these indicate a bug in the decoder: a caller handing us
/// arbitrary bytes should expect any of them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("malformed block header")]
    MalformedHeader,
    #[error("malformed code lengths")]
    MalformedCodeLengths,
    #[error("malformed symbol in compressed data")]
    MalformedSymbol,
    #[error("match distance exceeds produced output")]
    InvalidDistance,
    #[error("unexpected end of input")]
    TruncatedInput,
    #[error("reserved block type")]
    ReservedBlockType,
    #[error("malformed container: {0}")]
    MalformedContainer(&'static str),
    #[error("stored checksum does not match decoded data")]
    ChecksumMismatch,
    #[error("stored length does not match decoded data")]
    LengthMismatch,
    #[error("output size limit exceeded")]
    OutputLimitExceeded,
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        let kind = match e {
            Error::TruncatedInput => std::io::ErrorKind::UnexpectedEof,
            Error::OutputLimitExceeded => std::io::ErrorKind::InvalidInput,
            _ => std::io::ErrorKind::InvalidData,
        };
        std::io::Error::new(kind, e)
    }
}

//! Error types for decompression operations.

use thiserror::Error;

/// Result type alias for decompression operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Decompression error types.
///
/// Every variant ends the current decode session; there is no partial
/// output once one of these surfaces.
#[derive(Debug, Error)]
pub enum Error {
    /// The named input could not be opened for reading.
    #[error("cannot open {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Unexpected end of input stream.
    #[error("unexpected EOF after {bytes_read} bytes")]
    UnexpectedEof { bytes_read: usize },

    /// Stored block LEN is not the one's complement of NLEN.
    #[error("stored block length mismatch: LEN=0x{len:04x}, NLEN=0x{nlen:04x}")]
    StoredLengthMismatch { len: u16, nlen: u16 },

    /// Reserved block type (BTYPE = 11).
    #[error("invalid block type {btype}")]
    InvalidBlockType { btype: u8 },

    /// Code lengths do not describe a usable canonical Huffman code.
    #[error("invalid huffman tree: {reason}")]
    InvalidHuffmanTree { reason: String },

    /// Decoded symbol outside its alphabet, or no codeword matched.
    #[error("invalid {alphabet} symbol {symbol}")]
    InvalidSymbol { symbol: u32, alphabet: &'static str },

    /// Back-reference reaches before the start of the output.
    #[error("back-reference distance {distance} exceeds {available} decoded bytes")]
    InvalidBackReference { distance: usize, available: usize },

    /// Output sink stopped accepting bytes.
    #[error("short write: wrote {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    /// Decoded output grew past the configured limit.
    #[error("output exceeds limit of {limit} bytes")]
    OutputLimitExceeded { limit: usize },

    /// Memory allocation failed.
    #[error("allocation failed: could not allocate {requested_bytes} bytes")]
    AllocationFailed { requested_bytes: usize },

    /// Buffer index out of range.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Buffer too small for output.
    #[error("buffer too small: need {required} bytes, got {provided}")]
    BufferTooSmall { required: usize, provided: usize },

    /// I/O error from underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a source-unavailable error for a path.
    pub fn source_unavailable(path: impl Into<String>, source: std::io::Error) -> Self {
        Error::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(bytes_read: usize) -> Self {
        Error::UnexpectedEof { bytes_read }
    }

    /// Create a stored block length mismatch error.
    pub fn stored_length_mismatch(len: u16, nlen: u16) -> Self {
        Error::StoredLengthMismatch { len, nlen }
    }

    /// Create an invalid Huffman tree error.
    pub fn invalid_tree(reason: impl Into<String>) -> Self {
        Error::InvalidHuffmanTree {
            reason: reason.into(),
        }
    }

    /// Create an invalid symbol error.
    pub fn invalid_symbol(symbol: u32, alphabet: &'static str) -> Self {
        Error::InvalidSymbol { symbol, alphabet }
    }

    /// Create an invalid back-reference error.
    pub fn invalid_back_reference(distance: usize, available: usize) -> Self {
        Error::InvalidBackReference {
            distance,
            available,
        }
    }

    /// Create a short write error.
    pub fn short_write(written: usize, expected: usize) -> Self {
        Error::ShortWrite { written, expected }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(required: usize, provided: usize) -> Self {
        Error::BufferTooSmall { required, provided }
    }

    /// Whether the error was caused by malformed compressed data, as
    /// opposed to the source, the sink, or resource limits.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::StoredLengthMismatch { .. }
                | Error::InvalidBlockType { .. }
                | Error::InvalidHuffmanTree { .. }
                | Error::InvalidSymbol { .. }
                | Error::InvalidBackReference { .. }
        )
    }

    /// Get error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Error::SourceUnavailable { .. } => "source_unavailable",
            Error::UnexpectedEof { .. } => "unexpected_eof",
            Error::StoredLengthMismatch { .. } => "stored_length_mismatch",
            Error::InvalidBlockType { .. } => "invalid_block_type",
            Error::InvalidHuffmanTree { .. } => "invalid_huffman_tree",
            Error::InvalidSymbol { .. } => "invalid_symbol",
            Error::InvalidBackReference { .. } => "invalid_back_reference",
            Error::ShortWrite { .. } => "short_write",
            Error::OutputLimitExceeded { .. } => "output_limit_exceeded",
            Error::AllocationFailed { .. } => "allocation_failed",
            Error::IndexOutOfBounds { .. } => "index_out_of_bounds",
            Error::BufferTooSmall { .. } => "buffer_too_small",
            Error::Io(_) => "io_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_fields() {
        let err = Error::stored_length_mismatch(0x0004, 0xFFFA);
        assert_eq!(
            err.to_string(),
            "stored block length mismatch: LEN=0x0004, NLEN=0xfffa"
        );

        let err = Error::invalid_back_reference(5, 2);
        assert_eq!(
            err.to_string(),
            "back-reference distance 5 exceeds 2 decoded bytes"
        );
    }

    #[test]
    fn test_format_errors() {
        assert!(Error::InvalidBlockType { btype: 3 }.is_format_error());
        assert!(Error::invalid_tree("overflow").is_format_error());
        assert!(!Error::unexpected_eof(10).is_format_error());
        assert!(!Error::short_write(1, 2).is_format_error());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::other("disk on fire");
        let err: Error = io.into();
        assert_eq!(err.category(), "io_error");
    }
}

//! Bit-granular reader over a byte source.
//!
//! Bits within a byte are delivered least-significant first, and a
//! multi-bit read assembles them from the low-order bit of the result
//! upward, which is the packing RFC 1951 uses for every field except
//! Huffman codewords.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use sluice_core::config::DEFAULT_READ_BUFFER_SIZE;
use sluice_core::{Error, Result};

/// Widest field [`BitReader::read_bits`] accepts.
pub const MAX_READ_BITS: u32 = 31;

/// Bit reader for DEFLATE streams.
///
/// Reads the source one byte at a time and never ahead of the bit being
/// requested, so bytes after the end of a DEFLATE stream stay in the source.
#[derive(Debug)]
pub struct BitReader<R> {
    source: R,
    current: u8,
    /// Next bit of `current` to deliver; 0 means a fresh byte is needed.
    offset: u8,
    bytes_read: usize,
}

impl BitReader<BufReader<File>> {
    /// Open a file by path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_capacity(path, DEFAULT_READ_BUFFER_SIZE)
    }

    /// Open a file by path with a specific read buffer size.
    pub fn open_with_capacity(path: impl AsRef<Path>, capacity: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::source_unavailable(path.display().to_string(), e))?;
        Ok(Self::attach(BufReader::with_capacity(capacity.max(1), file)))
    }
}

impl<R: Read> BitReader<R> {
    /// Attach to an already-open source.
    pub fn attach(source: R) -> Self {
        Self {
            source,
            current: 0,
            offset: 0,
            bytes_read: 0,
        }
    }

    fn next_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        match self.source.read_exact(&mut byte) {
            Ok(()) => {
                self.bytes_read += 1;
                Ok(byte[0])
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                Err(Error::unexpected_eof(self.bytes_read))
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<u32> {
        if self.offset == 0 {
            self.current = self.next_byte()?;
        }
        let bit = (self.current >> self.offset) & 1;
        self.offset = (self.offset + 1) % 8;
        Ok(bit as u32)
    }

    /// Read `n` bits; bit 0 of the result is the first bit read.
    pub fn read_bits(&mut self, n: u32) -> Result<u32> {
        debug_assert!(n <= MAX_READ_BITS, "read_bits({n}) exceeds {MAX_READ_BITS}");
        let mut value = 0u32;
        for i in 0..n {
            value |= self.read_bit()? << i;
        }
        Ok(value)
    }

    /// Discard the unread bits of a partially consumed byte.
    pub fn align(&mut self) {
        self.offset = 0;
    }

    /// Read a whole byte, discarding any partially consumed one.
    pub fn read_u8_aligned(&mut self) -> Result<u8> {
        self.align();
        self.next_byte()
    }

    /// Read a little-endian u16, discarding any partially consumed byte.
    pub fn read_u16_le_aligned(&mut self) -> Result<u16> {
        self.align();
        let lo = self.next_byte()? as u16;
        let hi = self.next_byte()? as u16;
        Ok(lo | (hi << 8))
    }

    /// Bytes pulled from the source so far.
    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    /// Whether a byte is partially consumed.
    pub fn is_aligned(&self) -> bool {
        self.offset == 0
    }

    /// Release the reader and close the source.
    pub fn close(self) {
        drop(self.source);
    }

    /// Release the reader and hand back the still-open source.
    pub fn into_inner(self) -> R {
        self.source
    }
}

//! Core type definitions for DEFLATE decoding.

use crate::error::{Error, Result};

/// Encoding of a single DEFLATE block, from its 2-bit BTYPE field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// BTYPE 00: raw bytes behind a LEN/NLEN header.
    Stored,
    /// BTYPE 01: the RFC 1951 fixed literal/length and distance codes.
    FixedHuffman,
    /// BTYPE 10: codes transmitted in the block header.
    DynamicHuffman,
}

impl BlockType {
    /// Decode a BTYPE field. `11` is reserved and rejected.
    pub fn from_bits(btype: u32) -> Result<Self> {
        match btype {
            0 => Ok(BlockType::Stored),
            1 => Ok(BlockType::FixedHuffman),
            2 => Ok(BlockType::DynamicHuffman),
            other => Err(Error::InvalidBlockType {
                btype: other as u8,
            }),
        }
    }

    /// Get block type name as string.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Stored => "stored",
            BlockType::FixedHuffman => "fixed",
            BlockType::DynamicHuffman => "dynamic",
        }
    }
}

impl core::fmt::Display for BlockType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of decoding one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    /// More blocks follow.
    Continue,
    /// The final block decoded successfully.
    Done,
}

impl BlockOutcome {
    /// Outcome for a block with the given BFINAL flag.
    pub fn from_final(is_final: bool) -> Self {
        if is_final {
            BlockOutcome::Done
        } else {
            BlockOutcome::Continue
        }
    }
}

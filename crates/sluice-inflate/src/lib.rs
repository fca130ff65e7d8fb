//! # Sluice Inflate
//!
//! Raw DEFLATE (RFC 1951) decompression.
//!
//! The decoder reads its input one bit at a time through [`BitReader`],
//! decodes canonical Huffman codes with [`HuffmanTree`], and resolves
//! back-references against the [`OutputBuffer`] it is filling. Stored,
//! fixed-Huffman, and dynamic-Huffman blocks are supported; zlib and gzip
//! framing are not.
//!
//! ## Example
//!
//! ```no_run
//! use std::fs::File;
//!
//! let input = File::open("data.deflate")?;
//! let output = sluice_inflate::inflate(input)?;
//! println!("{} bytes", output.len());
//! # Ok::<(), sluice_inflate::Error>(())
//! ```

pub mod bit_reader;
pub mod block;
pub mod buffer;
pub mod codec;
pub mod huffman;
pub mod inflate;

#[cfg(test)]
mod testing;

pub use bit_reader::BitReader;
pub use block::{inflate_block, BlockHeader};
pub use buffer::OutputBuffer;
pub use codec::InflateDecompressor;
pub use huffman::HuffmanTree;
pub use inflate::{inflate, inflate_file, inflate_to_stream, Inflated, Inflater};

pub use sluice_core::{
    BlockOutcome, BlockType, Decompressor, Error, InflateConfig, InflateStats, Result,
};

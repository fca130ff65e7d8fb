//! Statistics for decode sessions.

use crate::types::BlockType;

/// Statistics from a decompression operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InflateStats {
    /// Stored blocks decoded.
    pub stored_blocks: usize,

    /// Fixed-Huffman blocks decoded.
    pub fixed_blocks: usize,

    /// Dynamic-Huffman blocks decoded.
    pub dynamic_blocks: usize,

    /// Compressed bytes consumed from the source.
    pub compressed_size: usize,

    /// Decompressed bytes produced.
    pub decompressed_size: usize,

    /// Time taken in microseconds.
    pub time_us: u64,
}

impl InflateStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one decoded block.
    pub fn record_block(&mut self, block_type: BlockType) {
        match block_type {
            BlockType::Stored => self.stored_blocks += 1,
            BlockType::FixedHuffman => self.fixed_blocks += 1,
            BlockType::DynamicHuffman => self.dynamic_blocks += 1,
        }
    }

    /// Total blocks decoded.
    pub fn total_blocks(&self) -> usize {
        self.stored_blocks + self.fixed_blocks + self.dynamic_blocks
    }

    /// Expansion ratio (decompressed / compressed).
    pub fn ratio(&self) -> f64 {
        if self.compressed_size == 0 {
            return 1.0;
        }
        self.decompressed_size as f64 / self.compressed_size as f64
    }

    /// Get throughput of decoded output in MB/s.
    pub fn throughput_mbs(&self) -> f64 {
        if self.time_us == 0 {
            return 0.0;
        }
        self.decompressed_size as f64 / self.time_us as f64
    }

    /// Merge stats from another session.
    pub fn merge(&mut self, other: &InflateStats) {
        self.stored_blocks += other.stored_blocks;
        self.fixed_blocks += other.fixed_blocks;
        self.dynamic_blocks += other.dynamic_blocks;
        self.compressed_size += other.compressed_size;
        self.decompressed_size += other.decompressed_size;
        self.time_us += other.time_us;
    }
}

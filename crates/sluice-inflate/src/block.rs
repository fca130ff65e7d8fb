//! Per-block DEFLATE decoding (RFC 1951 section 3.2).

use std::io::Read;

use sluice_core::{BlockOutcome, BlockType, Error, InflateStats, Result};
use tracing::{debug, trace};

use crate::bit_reader::BitReader;
use crate::buffer::OutputBuffer;
use crate::huffman::{
    fixed_distance_tree, fixed_literal_tree, HuffmanTree, CODE_LENGTH_ALPHABET,
    DISTANCE_ALPHABET, LITERAL_ALPHABET,
};

/// Order of code length codes in the dynamic header.
pub const CL_CODE_ORDER: [usize; 19] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Extra bits for length codes 257-285.
pub const LENGTH_EXTRA_BITS: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

/// Base lengths for length codes 257-285.
pub const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115, 131,
    163, 195, 227, 258,
];

/// End-of-block literal/length symbol.
pub const END_OF_BLOCK: u16 = 256;

/// Highest valid distance symbol.
pub const MAX_DISTANCE_SYMBOL: u16 = 29;

/// BFINAL and BTYPE of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub is_final: bool,
    pub block_type: BlockType,
}

impl BlockHeader {
    /// Read the 3-bit block header.
    pub fn read<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        let is_final = reader.read_bit()? == 1;
        let block_type = BlockType::from_bits(reader.read_bits(2)?)?;
        Ok(Self {
            is_final,
            block_type,
        })
    }
}

/// Decode one block into `output`.
pub fn inflate_block<R: Read>(
    reader: &mut BitReader<R>,
    output: &mut OutputBuffer,
    stats: &mut InflateStats,
) -> Result<BlockOutcome> {
    let header = BlockHeader::read(reader)?;

    match header.block_type {
        BlockType::Stored => inflate_stored(reader, output)?,
        BlockType::FixedHuffman => inflate_fixed(reader, output)?,
        BlockType::DynamicHuffman => inflate_dynamic(reader, output)?,
    }

    debug!(
        index = stats.total_blocks(),
        block_type = %header.block_type,
        is_final = header.is_final,
        output_len = output.len(),
        "block decoded"
    );
    stats.record_block(header.block_type);

    Ok(BlockOutcome::from_final(header.is_final))
}

/// Inflate a stored (uncompressed) block.
fn inflate_stored<R: Read>(reader: &mut BitReader<R>, output: &mut OutputBuffer) -> Result<()> {
    let len = reader.read_u16_le_aligned()?;
    let nlen = reader.read_u16_le_aligned()?;

    if (len ^ nlen) != 0xFFFF {
        return Err(Error::stored_length_mismatch(len, nlen));
    }

    for _ in 0..len {
        output.push(reader.read_u8_aligned()?)?;
    }

    Ok(())
}

/// Inflate a block with fixed Huffman codes.
fn inflate_fixed<R: Read>(reader: &mut BitReader<R>, output: &mut OutputBuffer) -> Result<()> {
    inflate_symbols(reader, output, fixed_literal_tree(), fixed_distance_tree())
}

/// Inflate a block with dynamic Huffman codes.
fn inflate_dynamic<R: Read>(reader: &mut BitReader<R>, output: &mut OutputBuffer) -> Result<()> {
    let (literal_tree, distance_tree) = read_dynamic_trees(reader)?;
    inflate_symbols(reader, output, &literal_tree, &distance_tree)
}

/// Read the code descriptions at the start of a dynamic block.
///
/// Returns the literal/length and distance trees, both finalized.
pub fn read_dynamic_trees<R: Read>(
    reader: &mut BitReader<R>,
) -> Result<(HuffmanTree, HuffmanTree)> {
    let hlit = reader.read_bits(5)? as usize;
    let hdist = reader.read_bits(5)? as usize;
    let hclen = reader.read_bits(4)? as usize;
    trace!(hlit, hdist, hclen, "dynamic block header");

    let mut cl_lengths = [0u8; 19];
    for &symbol in &CL_CODE_ORDER[..hclen + 4] {
        cl_lengths[symbol] = reader.read_bits(3)? as u8;
    }
    let cl_tree = HuffmanTree::from_lengths(CODE_LENGTH_ALPHABET, &cl_lengths)?;

    let literal_count = hlit + 257;
    let total = literal_count + hdist + 1;
    let mut lengths = vec![0u8; total];
    let mut previous: Option<u8> = None;
    let mut i = 0;

    while i < total {
        let (value, run) = match cl_tree.decode(reader)? {
            sym @ 0..=15 => {
                previous = Some(sym as u8);
                (sym as u8, 1)
            }
            16 => {
                // Repeat previous 3-6 times
                let value = previous
                    .ok_or_else(|| Error::invalid_tree("repeat code with no previous length"))?;
                (value, reader.read_bits(2)? as usize + 3)
            }
            17 => {
                // Repeat 0 for 3-10 times
                previous = Some(0);
                (0, reader.read_bits(3)? as usize + 3)
            }
            18 => {
                // Repeat 0 for 11-138 times
                previous = Some(0);
                (0, reader.read_bits(7)? as usize + 11)
            }
            other => {
                return Err(Error::invalid_tree(format!(
                    "invalid code length symbol {other}"
                )))
            }
        };

        let end = (i + run).min(total);
        lengths[i..end].fill(value);
        i = end;
    }

    let literal_tree = HuffmanTree::from_lengths(LITERAL_ALPHABET, &lengths[..literal_count])?;
    let distance_tree = HuffmanTree::from_lengths(DISTANCE_ALPHABET, &lengths[literal_count..])?;
    Ok((literal_tree, distance_tree))
}

/// Extra bits and base distance for a distance symbol (0-29).
#[inline]
pub fn distance_code(symbol: u16) -> (u32, usize) {
    let symbol = symbol as u32;
    if symbol < 2 {
        (0, symbol as usize + 1)
    } else {
        let extra = symbol / 2 - 1;
        (extra, (((2 + symbol % 2) << extra) + 1) as usize)
    }
}

/// Decode literals and back-references until end of block.
fn inflate_symbols<R: Read>(
    reader: &mut BitReader<R>,
    output: &mut OutputBuffer,
    literal_tree: &HuffmanTree,
    distance_tree: &HuffmanTree,
) -> Result<()> {
    loop {
        match literal_tree.decode(reader)? {
            sym @ 0..=255 => output.push(sym as u8)?,
            END_OF_BLOCK => return Ok(()),
            sym @ 257..=285 => {
                let index = (sym - 257) as usize;
                let extra = LENGTH_EXTRA_BITS[index] as u32;
                let length = LENGTH_BASE[index] as usize + reader.read_bits(extra)? as usize;

                let dist_sym = distance_tree.decode(reader)?;
                if dist_sym > MAX_DISTANCE_SYMBOL {
                    return Err(Error::invalid_symbol(dist_sym as u32, DISTANCE_ALPHABET));
                }
                let (dist_extra, dist_base) = distance_code(dist_sym);
                let distance = dist_base + reader.read_bits(dist_extra)? as usize;

                output.copy_back(distance, length)?;
            }
            other => return Err(Error::invalid_symbol(other as u32, LITERAL_ALPHABET)),
        }
    }
}

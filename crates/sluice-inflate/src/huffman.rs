//! Canonical Huffman codes for DEFLATE decoding.
//!
//! A canonical code is fully described by how many symbols use each code
//! length: codewords of one length are consecutive integers handed out in
//! ascending symbol order, and each length starts at twice the first free
//! codeword of the length before it (RFC 1951 section 3.2.2).

use std::io::Read;
use std::sync::LazyLock;

use sluice_core::{Error, Result};

use crate::bit_reader::BitReader;

/// Maximum bits in a Huffman code.
pub const MAX_CODE_LENGTH: usize = 15;

/// Alphabet names used in error messages.
pub const LITERAL_ALPHABET: &str = "literal/length";
pub const DISTANCE_ALPHABET: &str = "distance";
pub const CODE_LENGTH_ALPHABET: &str = "code length";

/// Fixed Huffman literal/length code lengths (RFC 1951 section 3.2.6).
pub const FIXED_LIT_LENGTHS: [u8; 288] = {
    let mut lengths = [0u8; 288];
    let mut i = 0;
    while i < 144 {
        lengths[i] = 8;
        i += 1;
    }
    while i < 256 {
        lengths[i] = 9;
        i += 1;
    }
    while i < 280 {
        lengths[i] = 7;
        i += 1;
    }
    while i < 288 {
        lengths[i] = 8;
        i += 1;
    }
    lengths
};

/// Fixed Huffman distance code lengths.
pub const FIXED_DIST_LENGTHS: [u8; 32] = [5; 32];

static FIXED_LITERAL_TREE: LazyLock<HuffmanTree> =
    LazyLock::new(|| HuffmanTree::fixed(LITERAL_ALPHABET, &FIXED_LIT_LENGTHS));

static FIXED_DISTANCE_TREE: LazyLock<HuffmanTree> =
    LazyLock::new(|| HuffmanTree::fixed(DISTANCE_ALPHABET, &FIXED_DIST_LENGTHS));

/// Shared literal/length tree for fixed-Huffman blocks.
pub fn fixed_literal_tree() -> &'static HuffmanTree {
    &FIXED_LITERAL_TREE
}

/// Shared distance tree for fixed-Huffman blocks.
pub fn fixed_distance_tree() -> &'static HuffmanTree {
    &FIXED_DISTANCE_TREE
}

/// Canonical Huffman tree stored as per-length symbol lists.
///
/// Built by registering symbols with [`add_symbol`] and then calling
/// [`finalize`] once; decoding before finalization finds no codewords.
///
/// [`add_symbol`]: HuffmanTree::add_symbol
/// [`finalize`]: HuffmanTree::finalize
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    alphabet: &'static str,
    /// First codeword of each length.
    min_codeword: [u32; MAX_CODE_LENGTH + 1],
    /// Symbols of each length, in registration order.
    symbols: [Vec<u16>; MAX_CODE_LENGTH + 1],
}

impl HuffmanTree {
    /// Create an empty tree for the named alphabet.
    pub fn new(alphabet: &'static str) -> Self {
        Self {
            alphabet,
            min_codeword: [0; MAX_CODE_LENGTH + 1],
            symbols: Default::default(),
        }
    }

    /// Build and finalize a tree from one code length per symbol.
    pub fn from_lengths(alphabet: &'static str, lengths: &[u8]) -> Result<Self> {
        let mut tree = Self::new(alphabet);
        for (symbol, &length) in lengths.iter().enumerate() {
            tree.add_symbol(symbol as u16, length)?;
        }
        tree.finalize()?;
        Ok(tree)
    }

    fn fixed(alphabet: &'static str, lengths: &[u8]) -> Self {
        let mut tree = Self::new(alphabet);
        for (symbol, &length) in lengths.iter().enumerate() {
            tree.symbols[length as usize].push(symbol as u16);
        }
        let overflow = tree.assign_codewords();
        debug_assert!(overflow.is_none(), "fixed {alphabet} code overflows");
        tree
    }

    /// Register `symbol` with a codeword of `length` bits.
    ///
    /// Length 0 marks an unused symbol and is ignored. Symbols of equal
    /// length must arrive in ascending order.
    pub fn add_symbol(&mut self, symbol: u16, length: u8) -> Result<()> {
        let length = length as usize;
        if length == 0 {
            return Ok(());
        }
        if length > MAX_CODE_LENGTH {
            return Err(Error::invalid_tree(format!(
                "{} code length {length} exceeds {MAX_CODE_LENGTH}",
                self.alphabet
            )));
        }
        self.symbols[length].push(symbol);
        Ok(())
    }

    /// Compute the first codeword of every length from the symbol counts.
    ///
    /// Fails if some length needs more codewords than its bits can hold.
    pub fn finalize(&mut self) -> Result<()> {
        match self.assign_codewords() {
            None => Ok(()),
            Some(length) => Err(Error::invalid_tree(format!(
                "{} code oversubscribed at length {length}",
                self.alphabet
            ))),
        }
    }

    /// Returns the first length whose codewords overflow, if any.
    fn assign_codewords(&mut self) -> Option<usize> {
        let mut next = 0u32;
        for length in 1..=MAX_CODE_LENGTH {
            next <<= 1;
            self.min_codeword[length] = next;
            next += self.symbols[length].len() as u32;
            if next > 1 << length {
                return Some(length);
            }
        }
        None
    }

    /// Decode one symbol, reading the codeword most-significant bit first.
    pub fn decode<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u16> {
        if self.is_empty() {
            return Err(Error::invalid_symbol(0, self.alphabet));
        }

        let mut fetched = 0u32;
        for length in 1..=MAX_CODE_LENGTH {
            fetched = (fetched << 1) | reader.read_bit()?;

            let symbols = &self.symbols[length];
            let min = self.min_codeword[length];
            if !symbols.is_empty() && fetched >= min && fetched - min < symbols.len() as u32 {
                return Ok(symbols[(fetched - min) as usize]);
            }
        }

        Err(Error::invalid_symbol(fetched, self.alphabet))
    }

    /// Alphabet this tree decodes.
    pub fn alphabet(&self) -> &'static str {
        self.alphabet
    }

    /// Number of symbols with a codeword of `length` bits.
    pub fn num_symbols(&self, length: usize) -> usize {
        self.symbols.get(length).map_or(0, Vec::len)
    }

    /// First codeword of `length` bits.
    pub fn min_codeword(&self, length: usize) -> u32 {
        self.min_codeword.get(length).copied().unwrap_or(0)
    }

    /// Whether no symbol has a codeword.
    pub fn is_empty(&self) -> bool {
        self.symbols.iter().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::BitWriter;

    fn decode_all(tree: &HuffmanTree, data: &[u8], count: usize) -> Vec<u16> {
        let mut reader = BitReader::attach(data);
        (0..count).map(|_| tree.decode(&mut reader).unwrap()).collect()
    }

    #[test]
    fn test_rfc_example() {
        // RFC 1951 3.2.2: lengths (3, 3, 3, 3, 3, 2, 4, 4) for A..H.
        let tree = HuffmanTree::from_lengths("test", &[3, 3, 3, 3, 3, 2, 4, 4]).unwrap();
        assert_eq!(tree.min_codeword(2), 0b00);
        assert_eq!(tree.min_codeword(3), 0b010);
        assert_eq!(tree.min_codeword(4), 0b1110);

        let mut writer = BitWriter::new();
        writer.write_code(0b00, 2); // F
        writer.write_code(0b010, 3); // A
        writer.write_code(0b110, 3); // E
        writer.write_code(0b1111, 4); // H
        writer.write_code(0b1110, 4); // G
        let data = writer.finish();

        assert_eq!(decode_all(&tree, &data, 5), vec![5, 0, 4, 7, 6]);
    }

    #[test]
    fn test_oversubscribed_rejected() {
        let mut tree = HuffmanTree::new("test");
        for symbol in 0..3 {
            tree.add_symbol(symbol, 1).unwrap();
        }
        assert_eq!(tree.num_symbols(1), 3);
        assert!(matches!(
            tree.finalize(),
            Err(Error::InvalidHuffmanTree { .. })
        ));
    }

    #[test]
    fn test_zero_length_ignored() {
        let tree = HuffmanTree::from_lengths("test", &[0, 1, 0, 1]).unwrap();
        assert_eq!(tree.num_symbols(1), 2);
        assert_eq!(decode_all(&tree, &[0b10], 2), vec![1, 3]);
    }

    #[test]
    fn test_length_over_limit() {
        let mut tree = HuffmanTree::new("test");
        assert!(tree.add_symbol(0, 16).is_err());
    }

    #[test]
    fn test_incomplete_code_unmatched() {
        let tree = HuffmanTree::from_lengths("test", &[1]).unwrap();
        assert_eq!(decode_all(&tree, &[0x00], 1), vec![0]);

        let mut reader = BitReader::attach(&[0xFFu8, 0xFF][..]);
        assert!(matches!(
            tree.decode(&mut reader),
            Err(Error::InvalidSymbol { alphabet: "test", .. })
        ));
    }

    #[test]
    fn test_empty_tree() {
        let tree = HuffmanTree::from_lengths(DISTANCE_ALPHABET, &[0; 30]).unwrap();
        assert!(tree.is_empty());

        let mut reader = BitReader::attach(&[0u8][..]);
        assert!(matches!(
            tree.decode(&mut reader),
            Err(Error::InvalidSymbol { .. })
        ));
    }

    #[test]
    fn test_fixed_literal_tree() {
        let tree = fixed_literal_tree();
        assert_eq!(tree.num_symbols(7), 24);
        assert_eq!(tree.num_symbols(8), 152);
        assert_eq!(tree.num_symbols(9), 112);
        assert_eq!(tree.min_codeword(8), 48);
        assert_eq!(tree.min_codeword(9), 400);

        let mut writer = BitWriter::new();
        writer.write_code(0b0011_0000, 8); // 0
        writer.write_code(0b1011_1111, 8); // 143
        writer.write_code(0b1_1001_0000, 9); // 144
        writer.write_code(0b000_0000, 7); // 256
        writer.write_code(0b1100_0111, 8); // 287
        let data = writer.finish();

        assert_eq!(decode_all(tree, &data, 5), vec![0, 143, 144, 256, 287]);
    }

    #[test]
    fn test_fixed_distance_tree() {
        let tree = fixed_distance_tree();
        assert_eq!(tree.num_symbols(5), 32);

        let mut writer = BitWriter::new();
        writer.write_code(3, 5);
        writer.write_code(29, 5);
        let data = writer.finish();
        assert_eq!(decode_all(tree, &data, 2), vec![3, 29]);
    }
}

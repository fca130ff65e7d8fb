//! Hand-assembly of DEFLATE bitstreams for unit tests.

/// Bit writer producing the packing [`crate::bit_reader::BitReader`] reads.
pub struct BitWriter {
    data: Vec<u8>,
    bit_buf: u64,
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            bit_buf: 0,
            bit_count: 0,
        }
    }

    /// Write `n` bits of `value`, low bit first.
    pub fn write_bits(&mut self, value: u32, n: u8) {
        self.bit_buf |= (value as u64) << self.bit_count;
        self.bit_count += n;

        while self.bit_count >= 8 {
            self.data.push(self.bit_buf as u8);
            self.bit_buf >>= 8;
            self.bit_count -= 8;
        }
    }

    /// Write a Huffman codeword, high bit first.
    pub fn write_code(&mut self, code: u32, len: u8) {
        for i in (0..len).rev() {
            self.write_bits((code >> i) & 1, 1);
        }
    }

    /// Write a block header.
    pub fn write_header(&mut self, is_final: bool, btype: u32) {
        self.write_bits(is_final as u32, 1);
        self.write_bits(btype, 2);
    }

    /// Pad to a byte boundary with zeros.
    pub fn align(&mut self) {
        if self.bit_count > 0 {
            self.data.push(self.bit_buf as u8);
            self.bit_buf = 0;
            self.bit_count = 0;
        }
    }

    /// Write raw bytes after aligning.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.align();
        self.data.extend_from_slice(bytes);
    }

    /// Flush remaining bits (pad with zeros).
    pub fn finish(mut self) -> Vec<u8> {
        self.align();
        self.data
    }
}

//! One-shot decompressor over in-memory input.

use sluice_core::{Decompressor, Error, InflateConfig, Result};

use crate::inflate::Inflater;

/// Raw DEFLATE decompressor.
#[derive(Debug, Clone, Default)]
pub struct InflateDecompressor {
    inflater: Inflater,
}

impl InflateDecompressor {
    /// Create a new DEFLATE decompressor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a decoder configuration.
    pub fn with_config(config: InflateConfig) -> Self {
        Self {
            inflater: Inflater::with_config(config),
        }
    }
}

impl Decompressor for InflateDecompressor {
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.inflater.inflate(input).map(Vec::from)
    }

    fn decompress_with_size(&self, input: &[u8], output_size: usize) -> Result<Vec<u8>> {
        let config = self
            .inflater
            .config()
            .clone()
            .with_initial_capacity(output_size);
        let output = Inflater::with_config(config).inflate(input)?;

        if output.len() > output_size {
            return Err(Error::buffer_too_small(output.len(), output_size));
        }
        Ok(output.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORED_HELLO: [u8; 10] = [0x01, 5, 0, 250, 255, b'H', b'e', b'l', b'l', b'o'];

    #[test]
    fn test_decompress() {
        let decompressor = InflateDecompressor::new();
        assert_eq!(decompressor.decompress(&STORED_HELLO).unwrap(), b"Hello");
    }

    #[test]
    fn test_decompress_to() {
        let decompressor = InflateDecompressor::new();

        let mut output = [0u8; 8];
        let written = decompressor.decompress_to(&STORED_HELLO, &mut output).unwrap();
        assert_eq!(&output[..written], b"Hello");

        let mut small = [0u8; 4];
        assert!(matches!(
            decompressor.decompress_to(&STORED_HELLO, &mut small),
            Err(Error::BufferTooSmall {
                required: 5,
                provided: 4
            })
        ));
    }

    #[test]
    fn test_decompress_with_size() {
        let decompressor = InflateDecompressor::new();
        assert_eq!(
            decompressor.decompress_with_size(&STORED_HELLO, 5).unwrap(),
            b"Hello"
        );
        assert!(decompressor.decompress_with_size(&STORED_HELLO, 2).is_err());
    }

    #[test]
    fn test_with_config_limit() {
        let decompressor =
            InflateDecompressor::with_config(InflateConfig::new().with_max_output_size(1));
        assert!(matches!(
            decompressor.decompress(&STORED_HELLO),
            Err(Error::OutputLimitExceeded { limit: 1 })
        ));
    }

    #[test]
    fn test_decompress_flate2_output() {
        let input = b"Hello, World! This is a test of DEFLATE compression.";

        let compressed: Vec<u8> = {
            let mut c = flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
            std::io::Write::write_all(&mut c, input).unwrap();
            c.finish().unwrap()
        };

        let decompressor = InflateDecompressor::new();
        assert_eq!(decompressor.decompress(&compressed).unwrap(), input);
    }
}

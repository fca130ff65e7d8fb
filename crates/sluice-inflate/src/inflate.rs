//! DEFLATE decompression (inflate).
//!
//! Drives the block decoder until the final block, producing the whole
//! output or an error. A failed session never yields partial output.

use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::time::Instant;

use sluice_core::{BlockOutcome, Error, InflateConfig, InflateStats, Result};
use tracing::debug;

use crate::bit_reader::BitReader;
use crate::block::inflate_block;
use crate::buffer::OutputBuffer;

/// Output of a successful decode session.
#[derive(Debug, Clone)]
pub struct Inflated {
    pub output: OutputBuffer,
    pub stats: InflateStats,
}

/// Configured DEFLATE decoder.
#[derive(Debug, Clone, Default)]
pub struct Inflater {
    config: InflateConfig,
}

impl Inflater {
    /// Create a decoder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with the given configuration.
    pub fn with_config(config: InflateConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &InflateConfig {
        &self.config
    }

    fn new_output(&self) -> Result<OutputBuffer> {
        let output = OutputBuffer::with_capacity(self.config.effective_initial_capacity())?;
        Ok(match self.config.max_output_size {
            Some(limit) => output.with_limit(limit),
            None => output,
        })
    }

    /// Decode a full stream from an attached reader.
    ///
    /// The reader is left positioned just past the final block.
    pub fn inflate_reader<R: Read>(&self, reader: &mut BitReader<R>) -> Result<Inflated> {
        let start = Instant::now();
        let start_bytes = reader.bytes_read();
        let mut output = self.new_output()?;
        let mut stats = InflateStats::new();

        loop {
            match inflate_block(reader, &mut output, &mut stats) {
                Ok(BlockOutcome::Continue) => {}
                Ok(BlockOutcome::Done) => break,
                Err(e) => {
                    debug!(
                        category = e.category(),
                        blocks = stats.total_blocks(),
                        output_len = output.len(),
                        error = %e,
                        "inflate failed"
                    );
                    return Err(e);
                }
            }
        }

        stats.compressed_size = reader.bytes_read() - start_bytes;
        stats.decompressed_size = output.len();
        stats.time_us = start.elapsed().as_micros() as u64;

        debug!(
            blocks = stats.total_blocks(),
            compressed = stats.compressed_size,
            decompressed = stats.decompressed_size,
            "inflate complete"
        );

        Ok(Inflated { output, stats })
    }

    /// Decode a full stream from an open source.
    pub fn inflate<R: Read>(&self, input: R) -> Result<OutputBuffer> {
        let mut reader = BitReader::attach(input);
        let inflated = self.inflate_reader(&mut reader)?;
        Ok(inflated.output)
    }

    /// Open a file and decode its contents.
    pub fn inflate_file(&self, path: impl AsRef<Path>) -> Result<OutputBuffer> {
        let mut reader = BitReader::open_with_capacity(path, self.config.read_buffer_size)?;
        let inflated = self.inflate_reader(&mut reader)?;
        reader.close();
        Ok(inflated.output)
    }

    /// Decode a full stream and write it to `output`.
    ///
    /// Returns the number of bytes written.
    pub fn inflate_to_stream<R: Read, W: Write>(&self, input: R, output: W) -> Result<usize> {
        let buffer = self.inflate(input)?;
        write_output(output, buffer.as_slice())
    }
}

/// Write all of `data`, treating a zero-length write as a short write.
fn write_output<W: Write>(mut sink: W, data: &[u8]) -> Result<usize> {
    let mut written = 0;
    while written < data.len() {
        match sink.write(&data[written..]) {
            Ok(0) => return Err(Error::short_write(written, data.len())),
            Ok(n) => written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(Error::Io(e)),
        }
    }
    sink.flush()?;
    Ok(written)
}

/// Inflate (decompress) a DEFLATE stream.
pub fn inflate<R: Read>(input: R) -> Result<OutputBuffer> {
    Inflater::new().inflate(input)
}

/// Inflate a DEFLATE stream and write the result to `output`.
pub fn inflate_to_stream<R: Read, W: Write>(input: R, output: W) -> Result<usize> {
    Inflater::new().inflate_to_stream(input, output)
}

/// Inflate the DEFLATE stream stored in a file.
pub fn inflate_file(path: impl AsRef<Path>) -> Result<OutputBuffer> {
    Inflater::new().inflate_file(path)
}

//! Growable output buffer that doubles as the LZ77 window.

use sluice_core::{Error, Result};

/// Capacity given to an empty buffer on its first growth.
pub const MIN_CAPACITY: usize = 1;

/// Decoded output.
///
/// Grows by doubling so appends are amortized O(1). Back-references read
/// from earlier positions of the same buffer through [`copy_back`].
///
/// [`copy_back`]: OutputBuffer::copy_back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    data: Vec<u8>,
    limit: Option<usize>,
}

impl OutputBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| Error::AllocationFailed {
                requested_bytes: capacity,
            })?;
        Ok(Self { data, limit: None })
    }

    /// Create a buffer holding `len` copies of `fill`.
    pub fn filled(len: usize, fill: u8) -> Result<Self> {
        let mut buffer = Self::with_capacity(len)?;
        buffer.data.resize(len, fill);
        Ok(buffer)
    }

    /// Refuse to grow past `limit` bytes.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Configured size limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Make room for `additional` more bytes.
    fn reserve(&mut self, additional: usize) -> Result<()> {
        let required = self
            .data
            .len()
            .checked_add(additional)
            .ok_or(Error::AllocationFailed {
                requested_bytes: usize::MAX,
            })?;

        if let Some(limit) = self.limit {
            if required > limit {
                return Err(Error::OutputLimitExceeded { limit });
            }
        }

        if required <= self.data.capacity() {
            return Ok(());
        }

        let mut capacity = self.data.capacity().max(MIN_CAPACITY);
        while capacity < required {
            capacity = capacity.checked_mul(2).unwrap_or(required);
        }

        self.data
            .try_reserve_exact(capacity - self.data.len())
            .map_err(|_| Error::AllocationFailed {
                requested_bytes: capacity,
            })
    }

    /// Append one byte.
    #[inline]
    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.reserve(1)?;
        self.data.push(byte);
        Ok(())
    }

    /// Remove and return the last byte.
    pub fn pop(&mut self) -> Option<u8> {
        self.data.pop()
    }

    /// Byte at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.data.get(index).copied()
    }

    /// Last byte, if any.
    pub fn last(&self) -> Option<u8> {
        self.data.last().copied()
    }

    /// Overwrite the byte at `index`.
    pub fn set(&mut self, index: usize, byte: u8) -> Result<()> {
        let len = self.data.len();
        match self.data.get_mut(index) {
            Some(slot) => {
                *slot = byte;
                Ok(())
            }
            None => Err(Error::IndexOutOfBounds { index, len }),
        }
    }

    /// Insert a byte at `index`, shifting later bytes right.
    ///
    /// `index` may equal the length, which appends.
    pub fn insert(&mut self, index: usize, byte: u8) -> Result<()> {
        if index > self.data.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.data.len(),
            });
        }
        self.reserve(1)?;
        self.data.insert(index, byte);
        Ok(())
    }

    /// Remove the byte at `index`, shifting later bytes left.
    pub fn remove(&mut self, index: usize) -> Result<u8> {
        if index >= self.data.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.data.len(),
            });
        }
        Ok(self.data.remove(index))
    }

    /// Append `length` bytes copied from `distance` bytes back.
    ///
    /// Bytes are appended one at a time, so when `distance < length` the
    /// copy reads bytes it has just written and the pattern repeats.
    pub fn copy_back(&mut self, distance: usize, length: usize) -> Result<()> {
        if distance == 0 || distance > self.data.len() {
            return Err(Error::invalid_back_reference(distance, self.data.len()));
        }
        self.reserve(length)?;

        for _ in 0..length {
            let byte = self.data[self.data.len() - distance];
            self.data.push(byte);
        }
        Ok(())
    }

    /// Drop all contents, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Allocated capacity.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Read-only view of the contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Take the contents as a vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl AsRef<[u8]> for OutputBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<OutputBuffer> for Vec<u8> {
    fn from(buffer: OutputBuffer) -> Self {
        buffer.data
    }
}

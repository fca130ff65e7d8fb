//! Decoder configuration.

/// Default read buffer size when the decoder opens a file itself (64 KB).
pub const DEFAULT_READ_BUFFER_SIZE: usize = 64 * 1024;

/// Configuration for a decode session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InflateConfig {
    /// Bytes to reserve in the output buffer up front (default: 0).
    pub initial_capacity: usize,

    /// Upper bound on decoded output (default: unlimited).
    pub max_output_size: Option<usize>,

    /// Buffer size for inputs opened by path (default: 64 KB).
    pub read_buffer_size: usize,
}

impl Default for InflateConfig {
    fn default() -> Self {
        InflateConfig {
            initial_capacity: 0,
            max_output_size: None,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl InflateConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve output capacity before decoding starts.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Reject streams that decode to more than `limit` bytes.
    pub fn with_max_output_size(mut self, limit: usize) -> Self {
        self.max_output_size = Some(limit);
        self
    }

    /// Set the read buffer size used for file inputs. Zero is raised to one.
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.max(1);
        self
    }

    /// Initial capacity clamped to the output limit, if any.
    pub fn effective_initial_capacity(&self) -> usize {
        match self.max_output_size {
            Some(limit) => self.initial_capacity.min(limit),
            None => self.initial_capacity,
        }
    }
}

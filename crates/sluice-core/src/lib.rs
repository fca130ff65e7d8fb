//! # Sluice Core
//!
//! Shared types for the sluice DEFLATE decoder: the error enum every
//! operation returns, session configuration, decode statistics, and the
//! one-shot [`Decompressor`] trait.

pub mod config;
pub mod error;
pub mod stats;
pub mod traits;
pub mod types;

pub use config::InflateConfig;
pub use error::{Error, Result};
pub use stats::InflateStats;
pub use traits::Decompressor;
pub use types::{BlockOutcome, BlockType};

//! # evodrive IO
//!
//! Persistence layer for training runs.
//!
//! This crate provides:
//! - Structured error handling for storage operations
//! - The per-generation best-weights store (one text file per generation)
//! - JSON-lines logging of generation summaries

/// Error types and result aliases for I/O operations
pub mod error;
/// Generation summary history in JSON-lines form
pub mod history;
/// Best-genome weight files
pub mod weights;

pub use error::{IoError, Result};
pub use history::{read_history, GenerationLogger};
pub use weights::WeightStore;

//! Fixed-order character-level Markov text generation.
//!
//! This crate provides:
//! - Per-context frequency tables turned into discrete distributions
//! - A sliding-window trainer over a text corpus
//! - Weighted random sampling to extend a seed text one character at a time
//! - Seeded and entropy-seeded random sources for reproducible or varied output
//!
//! File handling is kept internal; callers hand over a path, a reader,
//! or an in-memory string.

/// Markov model, frequency tables and generation parameters.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (corpus loading).
///
/// Not exposed
pub(crate) mod io;

pub use error::{ModelError, Result};

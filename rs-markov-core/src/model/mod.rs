//! Top-level module for the character-level Markov model.
//!
//! This module provides:
//! - Fixed-length lookup keys (`Context`)
//! - Per-context character statistics (`FrequencyTable`, `CharacterStat`)
//! - The trainable, sampleable model (`MarkovModel`)
//! - Validated generation parameters (`GenerationInput`)

/// Fixed-length character sequence used as a lookup key.
pub mod context;

/// Per-context character counts and their probability distribution.
///
/// Accumulates counts during training, normalizes them once afterwards,
/// and maps a uniform draw onto a character.
pub mod frequency_table;

/// Fixed-order Markov model (`window_length >= 1`).
///
/// Handles corpus ingestion, probability normalization,
/// next-character sampling and text generation.
pub mod markov_model;

/// Generation parameters such as the seed text, the target length
/// and the defensive step bound.
pub mod generation_input;

pub use context::Context;
pub use frequency_table::{CharacterStat, FrequencyTable, FALLBACK_CHAR};
pub use generation_input::{GenerationInput, DEFAULT_MAX_STEPS};
pub use markov_model::MarkovModel;

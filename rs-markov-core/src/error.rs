use thiserror::Error;

/// Errors surfaced by model construction, configuration and training.
///
/// Degenerate inputs (short corpus, short seed text, unseen context) are
/// not errors: they have defined pass-through behaviors.
#[derive(Error, Debug)]
pub enum ModelError {
	#[error("Window length must be >= 1, got {0}")]
	InvalidWindowLength(usize),

	#[error("Maximum generation steps must be >= 1")]
	InvalidMaxSteps,

	#[error("Failed to read corpus: {0}")]
	Io(#[from] std::io::Error),
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

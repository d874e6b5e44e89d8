use crate::error::{ModelError, Result};

/// Default upper bound on the number of characters appended by a single
/// generation call.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Input parameters for generating text from a [`MarkovModel`].
///
/// # Responsibilities
/// - Carry the seed text and the minimum desired output length
/// - Carry the step bound that guarantees generation terminates
///
/// # Invariants
/// - `max_steps` is always >= 1
///
/// [`MarkovModel`]: crate::model::MarkovModel
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationInput {
	/// Text to start with. Its last `window_length` characters form the
	/// first lookup context, and it is returned verbatim as the prefix.
	pub seed_text: String,

	/// Minimum desired output length, in characters.
	///
	/// The output may be longer (generation continues up to a trailing
	/// space) or shorter (unseen context, step bound).
	pub target_length: usize,

	/// Maximum number of characters appended before giving up.
	max_steps: usize,
}

impl GenerationInput {
	/// Creates a new `GenerationInput` with the default step bound.
	pub fn new(seed_text: impl Into<String>, target_length: usize) -> Self {
		Self {
			seed_text: seed_text.into(),
			target_length,
			max_steps: DEFAULT_MAX_STEPS,
		}
	}

	/// Returns the current step bound.
	pub fn max_steps(&self) -> usize {
		self.max_steps
	}

	/// Sets the step bound.
	///
	/// # Errors
	/// Returns an error if `max_steps` is 0.
	pub fn set_max_steps(&mut self, max_steps: usize) -> Result<()> {
		if max_steps == 0 {
			return Err(ModelError::InvalidMaxSteps);
		}
		self.max_steps = max_steps;
		Ok(())
	}
}

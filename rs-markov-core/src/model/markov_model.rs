use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::io::Read;
use std::path::Path;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::context::Context;
use super::frequency_table::FrequencyTable;
use super::generation_input::GenerationInput;
use crate::error::{ModelError, Result};
use crate::io::{read_file, read_text};

/// Represents a fixed-order Markov model over characters.
///
/// The `MarkovModel` stores a frequency table for every context of
/// `window_length` characters seen during training, and extends text
/// by sampling the character that follows the current context.
///
/// # Responsibilities
/// - Build the model from a corpus with a sliding window
/// - Normalize every table once the whole corpus has been scanned
/// - Sample the next character for a context
/// - Generate text from a seed
///
/// # Invariants
/// - `window_length` is always >= 1
/// - Every key in `contexts` has exactly `window_length` characters
/// - Every table is non-empty and finalized once training returns
///
/// The random source is owned by the model. Two models built with the
/// same seed and trained on the same corpus generate identical text.
#[derive(Clone, Debug)]
pub struct MarkovModel {
	/// Number of characters in a context
	window_length: usize, // must be >= 1

	/// Mapping from a context to the characters that followed it
	contexts: HashMap<Context, FrequencyTable>,

	rng: StdRng,
}

impl MarkovModel {
	/// Creates a model whose random source is seeded from system entropy.
	///
	/// Generating from it several times produces different texts.
	///
	/// # Errors
	/// Returns an error if `window_length` is 0.
	pub fn new(window_length: usize) -> Result<Self> {
		Self::with_rng(window_length, StdRng::from_os_rng())
	}

	/// Creates a model with a deterministic random source.
	///
	/// Same seed, same corpus and same generation input give the same
	/// output, byte for byte.
	///
	/// # Errors
	/// Returns an error if `window_length` is 0.
	pub fn with_seed(window_length: usize, seed: u64) -> Result<Self> {
		Self::with_rng(window_length, StdRng::seed_from_u64(seed))
	}

	fn with_rng(window_length: usize, rng: StdRng) -> Result<Self> {
		if window_length == 0 {
			return Err(ModelError::InvalidWindowLength(window_length));
		}
		Ok(Self { window_length, contexts: HashMap::new(), rng })
	}

	pub fn window_length(&self) -> usize {
		self.window_length
	}

	/// Number of distinct contexts learned.
	pub fn len(&self) -> usize {
		self.contexts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.contexts.is_empty()
	}

	/// Returns the frequency table of a context, if it was seen in training.
	pub fn table(&self, context: &Context) -> Option<&FrequencyTable> {
		self.contexts.get(context)
	}

	/// Iterates every learned context with its table, in no particular order.
	pub fn contexts(&self) -> impl Iterator<Item = (&Context, &FrequencyTable)> {
		self.contexts.iter()
	}

	/// Trains the model from a readable stream.
	///
	/// The whole stream is read into memory, then scanned by
	/// [`train_text`](Self::train_text).
	///
	/// # Errors
	/// Returns an error if the stream cannot be read or is not valid UTF-8.
	/// The model is left untouched in that case.
	pub fn train<R: Read>(&mut self, reader: R) -> Result<()> {
		let corpus = read_text(reader)?;
		self.train_text(&corpus);
		Ok(())
	}

	/// Trains the model from a text file.
	///
	/// # Errors
	/// Returns an error if the file cannot be read or is not valid UTF-8.
	pub fn train_file<P: AsRef<Path>>(&mut self, filepath: P) -> Result<()> {
		let corpus = read_file(filepath)?;
		self.train_text(&corpus);
		Ok(())
	}

	/// Trains the model from an in-memory corpus.
	///
	/// The window starts on the first `window_length` characters; every
	/// following character is counted against the current window, which
	/// then slides forward by one. Tables are finalized once the scan is
	/// complete.
	///
	/// # Notes
	/// - A corpus of `window_length` characters or fewer adds nothing.
	/// - Training again keeps accumulating counts and re-normalizes
	///   every table.
	pub fn train_text(&mut self, corpus: &str) {
		let mut chars = corpus.chars();
		let mut window: VecDeque<char> = chars.by_ref().take(self.window_length).collect();
		if window.len() < self.window_length {
			debug!("Corpus shorter than window ({} < {}), nothing learned", window.len(), self.window_length);
			return;
		}

		let mut transitions = 0usize;
		for c in chars {
			self.contexts
				.entry(Context::from_window(&window))
				.or_default()
				.update(c);
			window.pop_front();
			window.push_back(c);
			transitions += 1;
		}

		for table in self.contexts.values_mut() {
			table.finalize();
		}

		debug!(
			"Trained window {} on {} transitions: {} contexts",
			self.window_length,
			transitions,
			self.contexts.len()
		);
	}

	/// Samples the character following `context`.
	///
	/// Draws a uniform value in `[0, 1)` from the model's random source and
	/// maps it onto the context's cumulative distribution.
	///
	/// Returns `None` if the context was never seen in training; no random
	/// value is drawn in that case.
	pub fn sample_next(&mut self, context: &Context) -> Option<char> {
		let table = self.contexts.get(context)?;
		let r: f64 = self.rng.random();
		Some(table.sample(r))
	}

	/// Generates text starting from `seed_text`, with the default step bound.
	///
	/// See [`generate_with`](Self::generate_with).
	pub fn generate(&mut self, seed_text: &str, target_length: usize) -> String {
		self.generate_with(&GenerationInput::new(seed_text, target_length))
	}

	/// Generates text from the learned probabilities.
	///
	/// # Behavior
	/// - If the seed text is shorter than `window_length`, it is returned
	///   unchanged.
	/// - Otherwise characters are appended while the text is shorter than
	///   `target_length` or does not end with a space.
	/// - Generation stops early when the current context was never seen,
	///   or after `max_steps` appended characters.
	///
	/// The returned text always starts with the seed text verbatim.
	pub fn generate_with(&mut self, input: &GenerationInput) -> String {
		let mut text = input.seed_text.clone();
		let Some(context) = Context::from_suffix(&text, self.window_length) else {
			return text;
		};

		let mut window: VecDeque<char> = context.as_chars().iter().copied().collect();
		let mut length = text.chars().count();
		let mut last = text.chars().last();
		let mut steps = 0usize;

		while length < input.target_length || last != Some(' ') {
			if steps >= input.max_steps() {
				warn!("Generation stopped after {} steps without reaching a trailing space", steps);
				break;
			}
			let Some(c) = self.sample_next(&Context::from_window(&window)) else {
				trace!("Unseen context {:?}, stopping", window.iter().collect::<String>());
				break;
			};
			text.push(c);
			window.pop_front();
			window.push_back(c);
			length += 1;
			last = Some(c);
			steps += 1;
		}

		trace!("Generated {} characters from a {} character seed", steps, length - steps);
		text
	}
}

impl fmt::Display for MarkovModel {
	/// One line per context, `context : (entries)`, sorted by context.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut keys: Vec<&Context> = self.contexts.keys().collect();
		keys.sort();
		for key in keys {
			writeln!(f, "{} : {}", key, self.contexts[key])?;
		}
		Ok(())
	}
}

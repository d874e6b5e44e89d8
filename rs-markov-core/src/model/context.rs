use std::collections::VecDeque;
use std::fmt;

/// A fixed-length sequence of characters used as a lookup key.
///
/// Two contexts are equal iff their character sequences are equal.
/// The length is counted in `char`s, so multi-byte text is handled
/// the same way as ASCII.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Context(Box<[char]>);

impl Context {
	/// Builds a context from any sequence of characters.
	pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
		Self(chars.into_iter().collect())
	}

	/// Builds a context from the current content of a sliding window.
	pub(crate) fn from_window(window: &VecDeque<char>) -> Self {
		Self::from_chars(window.iter().copied())
	}

	/// Builds a context from the last `len` characters of `text`.
	///
	/// Returns `None` if `text` holds fewer than `len` characters.
	pub fn from_suffix(text: &str, len: usize) -> Option<Self> {
		let count = text.chars().count();
		if count < len {
			return None;
		}
		Some(Self::from_chars(text.chars().skip(count - len)))
	}

	/// Number of characters in the context.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn as_chars(&self) -> &[char] {
		&self.0
	}
}

impl From<&str> for Context {
	fn from(value: &str) -> Self {
		Self::from_chars(value.chars())
	}
}

impl fmt::Display for Context {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for c in self.0.iter() {
			write!(f, "{c}")?;
		}
		Ok(())
	}
}

use std::fmt;

use serde::Serialize;

/// Character returned by [`FrequencyTable::sample`] when no cumulative
/// probability exceeds the draw (floating-point rounding near 1.0).
pub const FALLBACK_CHAR: char = ' ';

/// Statistics of one character observed after a given context.
///
/// `p` and `cp` are only meaningful once the owning table has been
/// finalized; before that they are `0.0`.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CharacterStat {
	character: char,
	count: usize,
	p: f64,
	cp: f64,
}

impl CharacterStat {
	fn new(character: char) -> Self {
		Self { character, count: 1, p: 0.0, cp: 0.0 }
	}

	pub fn character(&self) -> char {
		self.character
	}

	/// Number of times this character followed the context.
	pub fn count(&self) -> usize {
		self.count
	}

	/// Probability of this character within its context.
	pub fn p(&self) -> f64 {
		self.p
	}

	/// Cumulative probability up to and including this entry.
	pub fn cp(&self) -> f64 {
		self.cp
	}
}

impl fmt::Display for CharacterStat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({} {} {} {})", self.character, self.count, self.p, self.cp)
	}
}

/// Frequency table attached to a single context.
///
/// Conceptually, this is a node in a Markov chain: its entries are the
/// outgoing edges, weighted by how often each was observed.
///
/// ## Responsibilities:
/// - Accumulate character occurrences during training
/// - Turn counts into probabilities and cumulative probabilities
/// - Map a uniform draw in `[0, 1)` onto a character
///
/// ## Invariants
/// - Each character appears at most once
/// - Entries keep their first-seen order
/// - Each count is strictly positive
/// - After `finalize`, `p` sums to 1.0 and `cp` is non-decreasing
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct FrequencyTable {
	entries: Vec<CharacterStat>,
}

impl FrequencyTable {
	/// Creates a new empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `character` after this context.
	///
	/// - If the character already exists, its count is increased.
	/// - Otherwise, a new entry is appended with a count of 1.
	pub fn update(&mut self, character: char) {
		match self.entries.iter_mut().find(|stat| stat.character == character) {
			Some(stat) => stat.count += 1,
			None => self.entries.push(CharacterStat::new(character)),
		}
	}

	/// Computes `p` and `cp` for every entry from the current counts.
	///
	/// `p` is recomputed from counts on each call, so calling it again
	/// without new updates yields the same values. An empty table is
	/// left untouched.
	pub fn finalize(&mut self) {
		let total = self.total();
		if total == 0 {
			return;
		}

		let mut cumulative = 0.0;
		for stat in &mut self.entries {
			stat.p = stat.count as f64 / total as f64;
			cumulative += stat.p;
			stat.cp = cumulative;
		}
	}

	/// Returns the character of the first entry whose `cp` strictly
	/// exceeds `r`.
	///
	/// This method performs an O(n) scan in stored order. If no entry
	/// qualifies, [`FALLBACK_CHAR`] is returned.
	pub fn sample(&self, r: f64) -> char {
		self.entries
			.iter()
			.find(|stat| stat.cp > r)
			.map_or(FALLBACK_CHAR, |stat| stat.character)
	}

	/// Sum of all counts in the table.
	pub fn total(&self) -> usize {
		self.entries.iter().map(|stat| stat.count).sum()
	}

	/// Iterates the entries in first-seen order.
	pub fn entries(&self) -> impl Iterator<Item = &CharacterStat> {
		self.entries.iter()
	}

	/// Returns the entry for `character`, if it was observed.
	pub fn get(&self, character: char) -> Option<&CharacterStat> {
		self.entries.iter().find(|stat| stat.character == character)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl fmt::Display for FrequencyTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "(")?;
		for (i, stat) in self.entries.iter().enumerate() {
			if i > 0 {
				write!(f, " ")?;
			}
			write!(f, "{stat}")?;
		}
		write!(f, ")")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn table_from(text: &str) -> FrequencyTable {
		let mut table = FrequencyTable::new();
		for c in text.chars() {
			table.update(c);
		}
		table
	}

	#[test]
	fn test_update_keeps_first_seen_order() {
		let table = table_from("committee");
		let order: String = table.entries().map(|stat| stat.character()).collect();
		assert_eq!(order, "comite");
		assert_eq!(table.get('m').unwrap().count(), 2);
		assert_eq!(table.get('t').unwrap().count(), 2);
		assert_eq!(table.get('e').unwrap().count(), 2);
		assert_eq!(table.total(), 9);
	}

	#[test]
	fn test_finalize_probabilities() {
		let mut table = table_from("aab");
		table.finalize();

		let a = table.get('a').unwrap();
		let b = table.get('b').unwrap();
		assert!((a.p() - 2.0 / 3.0).abs() < 1e-12);
		assert!((a.cp() - 2.0 / 3.0).abs() < 1e-12);
		assert!((b.p() - 1.0 / 3.0).abs() < 1e-12);
		assert!((b.cp() - 1.0).abs() < 1e-12);
	}

	#[test]
	fn test_finalize_is_idempotent() {
		let mut table = table_from("the quick brown fox");
		table.finalize();
		let once = table.clone();
		table.finalize();
		assert_eq!(table, once);
	}

	#[test]
	fn test_finalize_empty_table_is_noop() {
		let mut table = FrequencyTable::new();
		table.finalize();
		assert!(table.is_empty());
	}

	#[test]
	fn test_sample_picks_first_cp_above_draw() {
		let mut table = table_from("aab");
		table.finalize();

		assert_eq!(table.sample(0.0), 'a');
		assert_eq!(table.sample(0.5), 'a');
		assert_eq!(table.sample(0.7), 'b');
		assert_eq!(table.sample(0.999_999), 'b');
	}

	#[test]
	fn test_sample_falls_back_when_no_cp_exceeds_draw() {
		let mut table = table_from("xy");
		table.finalize();
		assert_eq!(table.sample(1.0), FALLBACK_CHAR);

		// Not finalized: every cp is still 0.0
		let raw = table_from("xy");
		assert_eq!(raw.sample(0.0), FALLBACK_CHAR);
	}

	#[test]
	fn test_display() {
		let mut table = table_from("ab");
		table.finalize();
		assert_eq!(table.to_string(), "((a 1 0.5 0.5) (b 1 0.5 1))");
	}
}

//! Property-based tests for the character-level Markov model
//!
//! Properties covered:
//! 1. Probabilities of every context sum to 1.0
//! 2. Cumulative probabilities are non-decreasing and end at 1.0
//! 3. Context keys all have the configured window length
//! 4. Same seed, same corpus, same input give the same text
//! 5. Degenerate corpora and seed texts pass through

use proptest::prelude::*;
use rs_markov_core::model::{Context, FrequencyTable, GenerationInput, MarkovModel};

const TOLERANCE: f64 = 1e-9;

proptest! {
	#![proptest_config(ProptestConfig::with_cases(100))]

	#[test]
	fn prop_probabilities_sum_to_one(corpus in "[a-d ]{0,80}", window_length in 1usize..5) {
		let mut model = MarkovModel::with_seed(window_length, 7).unwrap();
		model.train_text(&corpus);

		for (context, table) in model.contexts() {
			let sum: f64 = table.entries().map(|stat| stat.p()).sum();
			prop_assert!((sum - 1.0).abs() < TOLERANCE, "context {:?} sums to {}", context, sum);
		}
	}

	#[test]
	fn prop_cumulative_is_monotone(corpus in "[a-d ]{0,80}", window_length in 1usize..5) {
		let mut model = MarkovModel::with_seed(window_length, 7).unwrap();
		model.train_text(&corpus);

		for (_, table) in model.contexts() {
			let cps: Vec<f64> = table.entries().map(|stat| stat.cp()).collect();
			prop_assert!(cps.windows(2).all(|pair| pair[0] <= pair[1]));
			prop_assert!((cps[cps.len() - 1] - 1.0).abs() < TOLERANCE);
		}
	}

	#[test]
	fn prop_keys_have_window_length(corpus in "\\PC{0,60}", window_length in 1usize..5) {
		let mut model = MarkovModel::with_seed(window_length, 7).unwrap();
		model.train_text(&corpus);

		for (context, _) in model.contexts() {
			prop_assert_eq!(context.len(), window_length);
		}
	}

	#[test]
	fn prop_counts_match_corpus(corpus in "[a-d ]{0,80}", window_length in 1usize..5) {
		let mut model = MarkovModel::with_seed(window_length, 7).unwrap();
		model.train_text(&corpus);

		let total: usize = model.contexts().map(|(_, table)| table.total()).sum();
		prop_assert_eq!(total, corpus.chars().count().saturating_sub(window_length));
	}

	#[test]
	fn prop_short_corpus_gives_empty_model(window_length in 1usize..8, len in 0usize..8) {
		let corpus: String = "xyzxyzxy".chars().take(len.min(window_length)).collect();
		let mut model = MarkovModel::with_seed(window_length, 7).unwrap();
		model.train_text(&corpus);
		prop_assert!(model.is_empty());
	}

	#[test]
	fn prop_same_seed_same_text(
		corpus in "[a-d ]{10,80}",
		seed in any::<u64>(),
		target_length in 0usize..60,
	) {
		let mut first = MarkovModel::with_seed(2, seed).unwrap();
		let mut second = MarkovModel::with_seed(2, seed).unwrap();
		first.train_text(&corpus);
		second.train_text(&corpus);

		let seed_text: String = corpus.chars().take(2).collect();
		let mut input = GenerationInput::new(seed_text, target_length);
		input.set_max_steps(500).unwrap();
		prop_assert_eq!(first.generate_with(&input), second.generate_with(&input));
	}

	#[test]
	fn prop_short_seed_text_unchanged(seed_text in "[a-d]{0,3}", target_length in 0usize..100) {
		let mut model = MarkovModel::with_seed(4, 7).unwrap();
		model.train_text("abcd abcd dcba dcba ");
		prop_assert_eq!(model.generate(&seed_text, target_length), seed_text);
	}

	#[test]
	fn prop_output_starts_with_seed_and_respects_bound(
		corpus in "[a-d ]{10,80}",
		max_steps in 1usize..50,
	) {
		let mut model = MarkovModel::with_seed(1, 3).unwrap();
		model.train_text(&corpus);

		let seed_text: String = corpus.chars().take(3).collect();
		let mut input = GenerationInput::new(seed_text.clone(), 1_000);
		input.set_max_steps(max_steps).unwrap();
		let text = model.generate_with(&input);

		prop_assert!(text.starts_with(&seed_text));
		prop_assert!(text.chars().count() <= seed_text.chars().count() + max_steps);
	}

	#[test]
	fn prop_finalize_is_idempotent(text in "[a-z]{1,40}") {
		let mut table = FrequencyTable::new();
		for c in text.chars() {
			table.update(c);
		}
		table.finalize();
		let once = table.clone();
		table.finalize();
		prop_assert_eq!(table, once);
	}
}

#[test]
fn test_abc_example() {
	let mut model = MarkovModel::with_seed(3, 2024).unwrap();
	model.train_text("abcabcabcabc");

	let abc = model.table(&Context::from("abc")).unwrap();
	assert_eq!(abc.get('a').unwrap().p(), 1.0);

	let mut input = GenerationInput::new("abc", 5);
	input.set_max_steps(100).unwrap();
	let text = model.generate_with(&input);
	assert!(text.starts_with("abcab"));
	assert_eq!(text.chars().count(), 103);
}

#[test]
fn test_unseen_seed_example() {
	let mut model = MarkovModel::with_seed(3, 2024).unwrap();
	model.train_text("abcabcabcabc");
	assert_eq!(model.generate("xyz", 10), "xyz");
}

#[test]
fn test_entropy_seeded_model_generates() {
	let mut model = MarkovModel::new(1).unwrap();
	model.train_text("a a a ");
	assert_eq!(model.generate("a", 3), "a a ");
}

#[test]
fn test_train_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("corpus.txt");
	std::fs::write(&path, "to be or not to be ").unwrap();

	let mut model = MarkovModel::with_seed(2, 1).unwrap();
	model.train_file(&path).unwrap();
	assert_eq!(model.table(&Context::from("to")).unwrap().get(' ').unwrap().count(), 2);

	let mut missing = MarkovModel::with_seed(2, 1).unwrap();
	assert!(missing.train_file(dir.path().join("nope.txt")).is_err());
	assert!(missing.is_empty());
}

#[test]
fn test_stats_serialize_for_diagnostics() {
	let mut model = MarkovModel::with_seed(1, 1).unwrap();
	model.train_text("ab");
	let table = model.table(&Context::from("a")).unwrap();
	let json = serde_json::to_value(table.entries().collect::<Vec<_>>()).unwrap();
	assert_eq!(json, serde_json::json!([{"character": "b", "count": 1, "p": 1.0, "cp": 1.0}]));
}

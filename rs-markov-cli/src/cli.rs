//! CLI argument parsing for rs-markov

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "rs-markov")]
#[command(version)]
#[command(about = "Generate text from a fixed-order character Markov model", long_about = None)]
pub struct Cli {
    /// Number of characters in a context
    #[arg(value_name = "WINDOW_LENGTH")]
    pub window_length: usize,

    /// Text to start generating from (its last WINDOW_LENGTH characters are the first context)
    #[arg(value_name = "SEED_TEXT")]
    pub seed_text: String,

    /// Minimum length of the generated text, seed included
    #[arg(value_name = "TARGET_LENGTH")]
    pub target_length: usize,

    /// Training corpus
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Fixed seed for the random source (omit for a different text on each run)
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Maximum number of characters appended before generation gives up
    #[arg(long = "max-steps", value_name = "N")]
    pub max_steps: Option<usize>,

    /// Print the trained model (context : character/count/p/cp) before the generated text
    #[arg(long = "dump")]
    pub dump: bool,
}

use std::process::ExitCode;

use clap::Parser;
use log::info;
use rs_markov_core::model::{GenerationInput, MarkovModel};

mod cli;

use cli::Cli;

fn run(args: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // A fixed seed gives the same text on every run, good for debugging.
    // Without one the random source is seeded from system entropy.
    let mut model = match args.seed {
        Some(seed) => MarkovModel::with_seed(args.window_length, seed)?,
        None => MarkovModel::new(args.window_length)?,
    };

    model.train_file(&args.corpus)?;
    info!("Loaded {} contexts from {}", model.len(), args.corpus.display());

    if args.dump {
        print!("{model}");
    }

    let mut input = GenerationInput::new(args.seed_text, args.target_length);
    if let Some(max_steps) = args.max_steps {
        input.set_max_steps(max_steps)?;
    }

    println!("{}", model.generate_with(&input));

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

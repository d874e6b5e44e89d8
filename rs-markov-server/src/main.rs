use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{error, info};
use serde::{Deserialize, Serialize};

use rs_markov_core::ModelError;
use rs_markov_core::model::{CharacterStat, GenerationInput, MarkovModel, DEFAULT_MAX_STEPS};

/// Extension of corpus files in the corpus directory
const CORPUS_EXTENSION: &str = "txt";

/// Command-line configuration of the server
#[derive(Parser, Debug)]
#[command(name = "rs-markov-server")]
#[command(about = "Serve text generation from a character Markov model", long_about = None)]
struct Config {
	/// Directory holding the `<name>.txt` corpora that `/v1/train` may load
	#[arg(long, default_value = "./data")]
	corpus_dir: PathBuf,

	/// Corpus name (inside the corpus directory) to train on at startup
	#[arg(long)]
	corpus: Option<String>,

	/// Number of characters in a context
	#[arg(long, default_value_t = 3)]
	window_length: usize,

	/// Fixed seed for the random source
	#[arg(long)]
	seed: Option<u64>,

	/// Highest `max_steps` a generation request may ask for
	#[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
	max_steps_limit: usize,

	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	#[arg(long, default_value_t = 5000)]
	port: u16,
}

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	seed_text: String,
	target_length: usize,
	max_steps: Option<usize>,
}

/// Query parameters for the `/v1/train` endpoint
#[derive(Deserialize)]
struct TrainParams {
	name: String,
	window_length: usize,
	seed: Option<u64>,
}

/// One context of the model in the `/v1/contexts` response
#[derive(Serialize)]
struct ContextEntry<'a> {
	context: String,
	stats: Vec<&'a CharacterStat>,
}

/// The model is behind a single lock: generation advances its random
/// source, so requests are served one at a time.
struct SharedData {
	model: MarkovModel,
}

/// Read-only server settings shared by the handlers
struct Settings {
	corpus_dir: PathBuf,
	max_steps_limit: usize,
}

/// Creates an untrained model, seeded if a seed is given.
fn new_model(window_length: usize, seed: Option<u64>) -> Result<MarkovModel, ModelError> {
	match seed {
		Some(seed) => MarkovModel::with_seed(window_length, seed),
		None => MarkovModel::new(window_length),
	}
}

/// Builds and trains a fresh model.
fn build_model(path: &Path, window_length: usize, seed: Option<u64>) -> Result<MarkovModel, ModelError> {
	let mut model = new_model(window_length, seed)?;
	model.train_file(path)?;
	Ok(model)
}

/// Resolves a corpus name to `<corpus_dir>/<name>.txt`.
///
/// The name must be a single plain path component: absolute paths,
/// separators, `.` and `..` are rejected.
fn resolve_corpus(corpus_dir: &Path, name: &str) -> Result<PathBuf, String> {
	let mut components = Path::new(name).components();
	match (components.next(), components.next()) {
		(Some(Component::Normal(_)), None) => {}
		_ => return Err(format!("Invalid corpus name: {name:?}")),
	}
	Ok(corpus_dir.join(format!("{name}.{CORPUS_EXTENSION}")))
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates text from `seed_text` until at least `target_length`
/// characters and a trailing space, an unseen context, or `max_steps`.
/// `max_steps` defaults to, and may not exceed, the server limit.
#[get("/v1/generate")]
async fn get_generated(
	data: web::Data<Mutex<SharedData>>,
	settings: web::Data<Settings>,
	query: web::Query<GenerateParams>,
) -> impl Responder {
	let max_steps = query.max_steps.unwrap_or(settings.max_steps_limit);
	if max_steps > settings.max_steps_limit {
		return HttpResponse::BadRequest()
			.body(format!("max_steps must be <= {}", settings.max_steps_limit));
	}

	let mut input = GenerationInput::new(query.seed_text.clone(), query.target_length);
	if let Err(e) = input.set_max_steps(max_steps) {
		return HttpResponse::BadRequest().body(e.to_string());
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	HttpResponse::Ok().body(shared_data.model.generate_with(&input))
}

/// HTTP GET endpoint `/v1/model`
///
/// Plain-text rendering of every context and its statistics.
#[get("/v1/model")]
async fn get_model(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.model.to_string())
}

/// HTTP GET endpoint `/v1/contexts`
///
/// JSON rendering of the model, sorted by context.
#[get("/v1/contexts")]
async fn get_contexts(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let mut entries: Vec<ContextEntry> = shared_data
		.model
		.contexts()
		.map(|(context, table)| ContextEntry {
			context: context.to_string(),
			stats: table.entries().collect(),
		})
		.collect();
	entries.sort_by(|a, b| a.context.cmp(&b.context));

	HttpResponse::Ok().json(entries)
}

/// HTTP PUT endpoint `/v1/train`
///
/// Trains a new model from a named corpus of the corpus directory on the
/// blocking pool, then swaps it in. A failed load leaves the current
/// model in place.
#[put("/v1/train")]
async fn put_train(
	data: web::Data<Mutex<SharedData>>,
	settings: web::Data<Settings>,
	query: web::Query<TrainParams>,
) -> impl Responder {
	let path = match resolve_corpus(&settings.corpus_dir, &query.name) {
		Ok(p) => p,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let (window_length, seed) = (query.window_length, query.seed);
	let build_path = path.clone();
	let model = match web::block(move || build_model(&build_path, window_length, seed)).await {
		Ok(Ok(m)) => m,
		Ok(Err(e @ ModelError::InvalidWindowLength(_))) => {
			return HttpResponse::BadRequest().body(e.to_string());
		}
		Ok(Err(e)) => {
			error!("Failed to train from {}: {e}", path.display());
			return HttpResponse::InternalServerError().body(format!("Failed to train model: {e}"));
		}
		Err(_) => return HttpResponse::InternalServerError().body("Training task failed"),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let contexts = model.len();
	shared_data.model = model;
	info!("Model rebuilt from {}: {contexts} contexts", path.display());

	HttpResponse::Ok().body(format!("Model trained: {contexts} contexts"))
}

/// Main entry point for the server.
///
/// Trains the startup model (if a corpus is given), wraps it in a `Mutex`,
/// and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();
	let config = Config::parse();
	let invalid_input = |e: String| std::io::Error::new(std::io::ErrorKind::InvalidInput, e);

	let model = match &config.corpus {
		Some(name) => {
			let path = resolve_corpus(&config.corpus_dir, name).map_err(invalid_input)?;
			build_model(&path, config.window_length, config.seed)
		}
		None => new_model(config.window_length, config.seed),
	}
	.map_err(|e| invalid_input(e.to_string()))?;
	info!("Serving a model of {} contexts on {}:{}", model.len(), config.host, config.port);

	let shared_model = web::Data::new(Mutex::new(SharedData { model }));
	let settings = web::Data::new(Settings {
		corpus_dir: config.corpus_dir,
		max_steps_limit: config.max_steps_limit,
	});

	HttpServer::new(move || {
		App::new()
			.app_data(shared_model.clone())
			.app_data(settings.clone())
			.service(get_generated)
			.service(get_model)
			.service(get_contexts)
			.service(put_train)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}

mod config;

use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use mrkv_core::{join, GenerateInput, Markov, MarkovError};

use crate::config::ServerConfig;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	length: Option<usize>,
	start: Option<String> // -> random start if missing
}

struct SharedData {
	markov: Markov,
	config: ServerConfig
}

impl GenerateParams {
	/// Builds the random walk input, falling back to the configured length.
	///
	/// The length is clamped to `config.max_length` since the walk runs
	/// with the session locked.
	fn input(&self, config: &ServerConfig) -> GenerateInput {
		let length = self.length.unwrap_or(config.default_length).min(config.max_length);
		let input = GenerateInput::new(length);
		match &self.start {
			Some(s) if !s.trim().is_empty() => input.starting_at(s.trim()),
			_ => input,
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Walks the graph and returns the joined text as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let input = query.input(&shared_data.config);
	match shared_data.markov.generate_with(&input) {
		Ok(chain) => HttpResponse::Ok().body(join(&chain)),
		Err(e @ MarkovError::UnknownToken(_)) => HttpResponse::BadRequest().body(e.to_string()),
		Err(e @ MarkovError::EmptyGraph) => HttpResponse::Conflict().body(e.to_string()),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP PUT endpoint `/v1/feed`
///
/// Feeds the request body into the graph as one token stream.
#[put("/v1/feed")]
async fn put_feed(data: web::Data<Mutex<SharedData>>, body: web::Bytes) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let tokens = shared_data.markov.feed(body.as_ref());
	HttpResponse::Ok().body(tokens.to_string())
}

/// HTTP PUT endpoint `/v1/save`
///
/// Writes the graph to the configured store on the blocking thread pool.
#[put("/v1/save")]
async fn put_save(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let result = web::block(move || {
		let shared_data = data.lock().map_err(|_| "Model lock failed".to_owned())?;
		shared_data
			.markov
			.save_to_store(&shared_data.config.store)
			.map_err(|e| format!("Failed to save graph: {e}"))
	})
	.await;

	match result {
		Ok(Ok(())) => HttpResponse::Ok().body("Graph saved successfully"),
		Ok(Err(e)) => HttpResponse::InternalServerError().body(e),
		Err(_) => HttpResponse::InternalServerError().body("Save task failed"),
	}
}

/// HTTP PUT endpoint `/v1/load`
///
/// Reads the configured store on the blocking thread pool. The session is
/// only locked to read the settings and to swap in the loaded graph; the
/// current graph is kept if loading fails.
#[put("/v1/load")]
async fn put_load(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let result = web::block(move || {
		let (store, seed) = {
			let shared_data = data.lock().map_err(|_| "Model lock failed".to_owned())?;
			(shared_data.config.store.clone(), shared_data.config.seed)
		};

		let markov = Markov::from_store(&store, seed).map_err(|e| format!("Failed to load graph: {e}"))?;
		let mut shared_data = data.lock().map_err(|_| "Model lock failed".to_owned())?;
		shared_data.markov = markov;
		Ok::<(), String>(())
	})
	.await;

	match result {
		Ok(Ok(())) => HttpResponse::Ok().body("Graph loaded successfully"),
		Ok(Err(e)) => HttpResponse::InternalServerError().body(e),
		Err(_) => HttpResponse::InternalServerError().body("Load task failed"),
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let graph = shared_data.markov.graph();
	HttpResponse::Ok().body(format!("nodes: {}\nedges: {}", graph.len(), graph.edge_count()))
}

fn init_tracing() {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// Starts with the configured store if it exists, otherwise with an empty graph.
fn initial_session(config: &ServerConfig) -> Markov {
	if !config.store.exists() {
		return Markov::new(config.seed);
	}
	match Markov::from_store(&config.store, config.seed) {
		Ok(markov) => markov,
		Err(e) => {
			tracing::warn!("Starting with an empty graph: {e}");
			Markov::new(config.seed)
		}
	}
}

/// Main entry point for the server.
///
/// Loads the configuration and the initial graph, wraps the session in a
/// `Mutex` (a `Markov` session is not synchronized), and starts an
/// Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	init_tracing();

	let config = ServerConfig::load();
	let bind = (config.host.clone(), config.port);
	let shared_data = SharedData {
		markov: initial_session(&config),
		config,
	};
	let shared_model = web::Data::new(Mutex::new(shared_data));

	tracing::info!("Listening on {}:{}", bind.0, bind.1);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET", "PUT"]))
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(put_feed)
			.service(put_save)
			.service(put_load)
			.service(get_stats)
	})
		.bind(bind)?
		.run()
		.await
}

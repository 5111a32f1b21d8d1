//! TruthGuard Server
//!
//! HTTP surface for the TruthGuard classifier. `POST /predict` scores text
//! (given directly or fetched from a URL); `POST /scrape` returns the text a
//! URL resolves to.

pub mod cli;
pub mod config;
pub mod fetch;
pub mod routes;
pub mod service;
pub mod state;
pub mod telemetry;

pub use cli::Cli;
pub use config::{CorsConfig, ServerConfig};
pub use fetch::{extract_main_text, FetchConfig, HttpFetcher, TextFetcher};
pub use routes::create_router;
pub use service::InferenceService;
pub use state::AppState;

//! SFC HTTP API.
//!
//! Exposes the significant financing component analysis over HTTP.
//!
//! ## Endpoints
//!
//! - `POST /api/analyze`: analyze a contract; returns the results plus base64
//!   report and journal CSV payloads
//! - `GET /health`: liveness and version
//!
//! ## Usage
//!
//! ```bash
//! # Start server on default port
//! sfc-api-server
//!
//! # Custom host, port and defaults file
//! sfc-api-server --host 0.0.0.0 --port 3000 --config server.toml
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use server::{create_router, run_server};
pub use state::AppState;

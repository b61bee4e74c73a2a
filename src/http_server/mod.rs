//! # HTTP Server Module
//!
//! Axum server exposing one resource's records.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/` and `/{id}/` - Record CRUD

pub mod config;
pub mod errors;
pub mod extract;
pub mod middleware;
pub mod observability_routes;
pub mod record_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use record_routes::RecordState;
pub use server::HttpServer;

//! record-service - schema-validated CRUD over an in-memory record collection
//!
//! - `schema`: declarative field descriptors and the generic validator
//! - `store`: the in-memory record store and seed loading
//! - `http_server`: axum routes mapping HTTP onto validator and store
//! - `observability`: structured JSON logging
//! - `cli`: configuration and process entry points

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod schema;
pub mod store;

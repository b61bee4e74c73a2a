//! # HTTP Server
//!
//! Combines the record routes and health check into one Axum server.

use std::io;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::observability::{log_event_with_fields, Event};

use super::config::HttpServerConfig;
use super::middleware::log_requests;
use super::observability_routes::health_routes;
use super::record_routes::{record_routes, RecordState};

/// HTTP server for one resource
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving the given record state
    pub fn new(config: HttpServerConfig, state: Arc<RecordState>) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router
    pub fn build_router(config: &HttpServerConfig, state: Arc<RecordState>) -> Router {
        Router::new()
            .merge(health_routes(state.clone()))
            .merge(record_routes(state))
            .layer(axum::middleware::from_fn(log_requests))
            .layer(config.cors_layer())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> io::Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr()?).await?;
        let bound = listener.local_addr()?.to_string();
        log_event_with_fields(Event::ServerListening, &[("addr", bound.as_str())]);

        axum::serve(listener, self.router).await
    }
}

//! HTTP Server Configuration
//!
//! Bind address and CORS policy for the record service. Read from the
//! `server` section of the config file; any key may be omitted.

use std::io;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Interface to listen on (default: loopback only)
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Browser origins allowed to call the API. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port` as written in the config
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parsed listen address. Hostnames are not resolved; `host` must be an IP.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let addr = self.socket_addr();
        addr.parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid socket address '{}': {}", addr, e),
            )
        })
    }

    /// CORS layer for the configured origins. Origins that are not valid
    /// header values are skipped.
    pub fn cors_layer(&self) -> CorsLayer {
        let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
        if self.cors_origins.is_empty() {
            return base.allow_origin(Any);
        }

        let origins: Vec<_> = self
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        base.allow_origin(AllowOrigin::list(origins))
    }
}

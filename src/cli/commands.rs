//! CLI command implementations
//!
//! Boot sequence shared by `serve` and `check`:
//! 1. Load the config file (if any) and apply flag overrides
//! 2. Resolve the resource schema (built-in or from file)
//! 3. Load and validate the seed file into a store
//!
//! Any failure aborts before the server binds.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http_server::{HttpServer, HttpServerConfig, RecordState};
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::schema::{Schema, SchemaLoader};
use crate::store::{load_seed, IdPolicy, RecordStore};

use super::args::{Command, SourceArgs};
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: HttpServerConfig,

    /// Built-in resource name (default: "users", or the custom schema's name)
    #[serde(default)]
    pub resource: Option<String>,

    /// Custom schema file
    #[serde(default)]
    pub schema_path: Option<PathBuf>,

    /// Seed data file (required, here or via --seed)
    #[serde(default)]
    pub seed_path: Option<PathBuf>,

    /// Id assignment policy (default: monotonic)
    #[serde(default)]
    pub id_policy: IdPolicy,
}

const DEFAULT_RESOURCE: &str = "users";

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config '{}': {}", path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Builds the effective config: file (if given) with flags layered on top.
    pub fn resolve(source: &SourceArgs) -> CliResult<Self> {
        let mut config = match &source.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(resource) = &source.resource {
            config.resource = Some(resource.clone());
        }
        if let Some(schema) = &source.schema {
            config.schema_path = Some(schema.clone());
        }
        if let Some(seed) = &source.seed {
            config.seed_path = Some(seed.clone());
        }
        if let Some(policy) = source.id_policy {
            config.id_policy = policy;
        }

        Ok(config)
    }
}

/// Run the CLI with process arguments
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { source, host, port } => serve(&source, host, port),
        Command::Check { source } => check(&source),
        Command::Schema { resource, schema } => print_schema(resource, schema),
    }
}

/// Resolves the schema named by the config.
pub fn resolve_schema(resource: Option<&str>, schema_path: Option<&Path>) -> CliResult<Schema> {
    let mut loader = SchemaLoader::with_builtins();

    let name = match (schema_path, resource) {
        (Some(path), Some(name)) => {
            loader.load_file(path)?;
            name.to_string()
        }
        (Some(path), None) => loader.load_file(path)?,
        (None, Some(name)) => name.to_string(),
        (None, None) => DEFAULT_RESOURCE.to_string(),
    };

    Ok(loader.resolve(&name)?)
}

/// Loads schema and seed into a ready-to-serve state.
pub fn boot(config: &Config) -> CliResult<Arc<RecordState>> {
    let schema = resolve_schema(config.resource.as_deref(), config.schema_path.as_deref())?;
    let field_count = schema.fields.len().to_string();
    log_event_with_fields(
        Event::SchemaLoaded,
        &[("resource", schema.name.as_str()), ("fields", field_count.as_str())],
    );

    let seed_path = config
        .seed_path
        .as_deref()
        .ok_or_else(|| CliError::config_error("No seed file given (set seed_path or --seed)"))?;

    let records = load_seed(seed_path, &schema)?;
    let store = RecordStore::from_records(records, config.id_policy)?;

    let count = store.len().to_string();
    let seed = seed_path.display().to_string();
    log_event_with_fields(
        Event::SeedLoaded,
        &[("path", seed.as_str()), ("records", count.as_str())],
    );

    Ok(Arc::new(RecordState::new(schema, store)))
}

/// Boot and serve HTTP until stopped
pub fn serve(source: &SourceArgs, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let mut config = Config::resolve(source)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("addr", config.server.socket_addr().as_str())],
    );

    let state = boot(&config)?;
    let server = HttpServer::new(config.server.clone(), state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::io_error(format!("HTTP server failed: {}", e)))
    })
}

/// Validate the seed against the schema and print a summary
pub fn check(source: &SourceArgs) -> CliResult<()> {
    let config = Config::resolve(source)?;
    let state = boot(&config)?;

    let records = state.store.list();
    let summary = json!({
        "resource": state.schema.name,
        "records": records.len(),
        "first_id": records.first().map(|r| r.id),
        "last_id": records.last().map(|r| r.id),
        "id_policy": state.store.policy(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Print the effective schema
pub fn print_schema(resource: Option<String>, schema_path: Option<PathBuf>) -> CliResult<()> {
    let schema = resolve_schema(resource.as_deref(), schema_path.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

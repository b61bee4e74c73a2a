//! CLI argument definitions using clap
//!
//! Commands:
//! - record-service serve  [source flags] [--host <h>] [--port <p>]
//! - record-service check  [source flags]
//! - record-service schema [--resource <name>] [--schema <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::store::IdPolicy;

/// record-service - schema-validated CRUD over an in-memory collection
#[derive(Parser, Debug)]
#[command(name = "record-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the records and their schema come from. Flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Built-in resource to serve (users, cars)
    #[arg(long)]
    pub resource: Option<String>,

    /// Path to a custom schema JSON file
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Path to the JSON seed file
    #[arg(long)]
    pub seed: Option<PathBuf>,

    /// Id assignment policy for new records
    #[arg(long, value_enum)]
    pub id_policy: Option<IdPolicy>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the seed data and serve it over HTTP
    Serve {
        #[command(flatten)]
        source: SourceArgs,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate the seed data against the schema and exit
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the effective schema as JSON and exit
    Schema {
        /// Built-in resource name
        #[arg(long)]
        resource: Option<String>,

        /// Path to a custom schema JSON file
        #[arg(long)]
        schema: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "record-service",
            "serve",
            "--resource",
            "cars",
            "--seed",
            "data/cars.json",
            "--port",
            "8080",
            "--id-policy",
            "count-plus-one",
        ])
        .unwrap();

        match cli.command {
            Command::Serve { source, port, host } => {
                assert_eq!(source.resource.as_deref(), Some("cars"));
                assert_eq!(source.seed, Some(PathBuf::from("data/cars.json")));
                assert_eq!(source.id_policy, Some(IdPolicy::CountPlusOne));
                assert_eq!(port, Some(8080));
                assert!(host.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_with_config() {
        let cli = Cli::try_parse_from(["record-service", "check", "--config", "svc.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Check { source } if source.config == Some(PathBuf::from("svc.json"))
        ));
    }

    #[test]
    fn test_rejects_unknown_id_policy() {
        let result = Cli::try_parse_from(["record-service", "check", "--id-policy", "random"]);
        assert!(result.is_err());
    }
}

//! record-service CLI entry point
//!
//! Parses arguments, dispatches to the CLI module, and exits non-zero on
//! failure. All boot logic lives in `cli`.

use record_service::cli;
use record_service::observability::{log_event_with_fields, Event};

fn main() {
    if let Err(e) = cli::run() {
        log_event_with_fields(
            Event::BootFailed,
            &[("code", e.code_str()), ("message", e.message())],
        );
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

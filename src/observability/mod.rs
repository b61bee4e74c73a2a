//! Observability
//!
//! Structured JSON logging of typed lifecycle and request events.
//!
//! # Usage
//!
//! ```ignore
//! use record_service::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::log(Severity::Warn, "CUSTOM", &[("key", "value")]);
//! log_event_with_fields(Event::SeedLoaded, &[("records", "1000")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

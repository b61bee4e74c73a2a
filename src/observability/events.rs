//! Observable events
//!
//! Events are explicit and typed; the log line's `event` key is the
//! SCREAMING_SNAKE_CASE name returned by `as_str`.

use std::fmt;

use super::logger::Severity;

/// Observable events in the service lifecycle and request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Startup aborted (FATAL)
    BootFailed,
    /// Configuration loaded
    ConfigLoaded,
    /// Resource schema resolved
    SchemaLoaded,
    /// Seed data loaded into the store
    SeedLoaded,
    /// HTTP listener bound and serving
    ServerListening,

    // Request path
    /// An HTTP request finished
    RequestCompleted,
    /// A request body failed validation
    ValidationRejected,
    /// Record created
    RecordCreated,
    /// Record replaced
    RecordUpdated,
    /// Record removed
    RecordDeleted,
    /// Store refused an operation that passed validation
    StoreFailed,
}

impl Event {
    /// Returns the event name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::BootFailed => "BOOT_FAILED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::SeedLoaded => "SEED_LOADED",
            Event::ServerListening => "SERVER_LISTENING",
            Event::RequestCompleted => "REQUEST_COMPLETED",
            Event::ValidationRejected => "VALIDATION_REJECTED",
            Event::RecordCreated => "RECORD_CREATED",
            Event::RecordUpdated => "RECORD_UPDATED",
            Event::RecordDeleted => "RECORD_DELETED",
            Event::StoreFailed => "STORE_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::BootFailed => Severity::Fatal,
            Event::ValidationRejected => Severity::Warn,
            Event::StoreFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::SeedLoaded.as_str(), "SEED_LOADED");
        assert_eq!(Event::RecordDeleted.to_string(), "RECORD_DELETED");
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::BootFailed.severity(), Severity::Fatal);
        assert_eq!(Event::ValidationRejected.severity(), Severity::Warn);
        assert_eq!(Event::StoreFailed.severity(), Severity::Error);
        assert_eq!(Event::RecordCreated.severity(), Severity::Info);
        assert_eq!(Event::BootStart.severity(), Severity::Info);
    }
}

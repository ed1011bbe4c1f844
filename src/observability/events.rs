//! Observable events
//!
//! Every log line emitted by the registry and the server carries one of
//! these as its `event` field, so logs can be filtered by event name
//! regardless of the message text.

use std::fmt;

/// Observable events in cadastro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded (or defaults applied)
    ConfigLoaded,
    /// Data file opened, created if it was missing
    StoreOpened,
    /// Server bound and accepting requests
    Serving,
    /// Shutdown signal received
    ShutdownStart,
    /// Server stopped
    ShutdownComplete,

    // Store
    /// A stored line could not be decoded and was dropped
    MalformedLineSkipped,
    /// A stored line could not be decoded and the load failed
    MalformedLineRejected,
    /// The data file was rewritten
    StoreRewritten,

    // Registry
    /// Customer inserted
    CustomerInserted,
    /// Customer updated
    CustomerUpdated,
    /// Customer deleted
    CustomerDeleted,
    /// Request rejected (invalid key, conflict, not found, bad field)
    RequestRejected,
    /// Storage failure surfaced to a caller
    StorageFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "CADASTRO_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::Serving => "CADASTRO_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::MalformedLineSkipped => "MALFORMED_LINE_SKIPPED",
            Event::MalformedLineRejected => "MALFORMED_LINE_REJECTED",
            Event::StoreRewritten => "STORE_REWRITTEN",

            Event::CustomerInserted => "CUSTOMER_INSERTED",
            Event::CustomerUpdated => "CUSTOMER_UPDATED",
            Event::CustomerDeleted => "CUSTOMER_DELETED",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::StorageFailed => "STORAGE_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

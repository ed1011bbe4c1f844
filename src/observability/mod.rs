//! Observability for cadastro
//!
//! Logging goes through `tracing`. Each event carries a typed [`Event`]
//! name in its `event` field plus structured fields (`cpf`, `line`,
//! `path`, ...). HTTP request spans come from tower-http's `TraceLayer`.
//!
//! # Usage
//!
//! ```ignore
//! use cadastro::observability::{self, Event};
//!
//! observability::init_tracing();
//! tracing::info!(event = %Event::BootStart, "starting");
//! ```

mod events;

pub use events::Event;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "cadastro=info,tower_http=info";

static INIT: Once = Once::new();

/// Installs the global subscriber. Safe to call more than once.
///
/// The filter comes from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
/// Output goes to stderr so that command output on stdout stays clean.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
        tracing::info!(event = %Event::BootStart, "still alive");
    }
}

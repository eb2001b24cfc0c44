//! Tracing setup for hosts embedding the library
//!
//! The library itself only emits `tracing` events. A host that has no
//! subscriber of its own can call [`init_logging`].

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `level` (error, warn, info, debug,
/// trace) applies to this crate. Calling it again after a subscriber is
/// installed is a no-op and returns `false`.
pub fn init_logging(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
        .is_ok()
}

fn default_directive(level: &str) -> String {
    let level = match level {
        "error" | "warn" | "info" | "debug" | "trace" => level,
        _ => "info",
    };
    format!("infogrid={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("debug"), "infogrid=debug");
        assert_eq!(default_directive("loud"), "infogrid=info");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_logging("warn");
        assert!(!init_logging("warn"));
    }
}

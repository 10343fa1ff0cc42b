//! Bootstrap utilities for host applications.
//!
//! The library only emits `tracing` events; hosts that have no subscriber
//! of their own can install this one.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LOG_ENV_VAR;

/// Initialize tracing with the SHIFT_OVERLAP_LOG environment variable.
///
/// Defaults to "info" level if SHIFT_OVERLAP_LOG is not set. Fails if a
/// global subscriber is already installed.
pub fn init_tracing() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let _ = init_tracing();
        assert!(init_tracing().is_err());
    }
}

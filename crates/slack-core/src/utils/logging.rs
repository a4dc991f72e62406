//! Structured logging setup and operation timing.

use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Install the global stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks `debug` for this
/// workspace's crates and `warn` for everything else.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "warn,slack_core=debug,slack_cli=debug"
        } else {
            "warn"
        })
    });

    // A second init (e.g. from tests) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Track operation timing and log on drop
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration_ms = self.start.elapsed().as_millis() as u64;
        tracing::debug!(
            operation = %self.operation,
            duration_ms,
            "operation completed"
        );
    }
}

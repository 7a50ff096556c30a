//! Diagnostic logging for testscope runs
//!
//! Diagnostics go to stderr through `tracing`; stdout carries only the
//! selection report, so `--json` output stays machine-readable.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise only `testscope` events at
/// `default_level` (the `[observability] log_level` setting) are shown.
/// Calls after the first are no-ops.
///
/// ```no_run
/// testscope::telemetry::init("debug");
/// tracing::debug!(changed_files = 2, "Change set collected");
/// ```
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("testscope={}", default_level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    });
}

//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Default filter when `RETROFIT_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "retrofit_core=info,retrofit_analysis=info,retrofit_cli=info";

/// Initialize the retrofit tracing/logging system.
///
/// Reads the `RETROFIT_LOG` environment variable for per-subsystem levels,
/// e.g. `RETROFIT_LOG=retrofit_analysis::detectors=debug,retrofit_analysis::fixes=trace`.
/// Output goes to stderr so reporters own stdout.
///
/// Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("RETROFIT_LOG")
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}

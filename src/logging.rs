use std::io;
use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
/// Output goes to stderr so it stays out of the menu on stdout.
pub fn init_tracing(level: &str) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let console_layer = fmt::layer()
            .with_writer(io::stderr)
            .with_target(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();
    });
}

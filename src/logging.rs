use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber. Logs go to stderr so they never mix
/// with report output. `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let default_level = if verbose { "spendbook=debug" } else { "spendbook=warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

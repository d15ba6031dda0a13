//! Diagnostics setup.
//!
//! Log lines go to stderr through `tracing-subscriber`'s fmt layer so stdout
//! stays a clean CSV/report stream. The filter comes from `HC_LOG` (read after
//! loading `.env`), defaulting to `warn`; `--verbose` forces `debug`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "HC_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Load `.env` and install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    dotenvy::dotenv().ok();

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! Tracing subscriber setup for the CLI.

use tracing_subscriber::{EnvFilter, fmt};

/// Install a global fmt subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence when set.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,bpcheck=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

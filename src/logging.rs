//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`, so the report on stdout stays
//! clean for piping.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::models::config::Settings;

/// Environment variable holding an explicit filter directive
pub const LOG_ENV_VAR: &str = "AID_METRICS_LOG";

/// Default filter directive for the given verbosity
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Default filter directive for merged settings
pub fn directive_for(settings: &Settings) -> &'static str {
    default_directive(settings.verbose, settings.quiet)
}

/// Build the filter, preferring `AID_METRICS_LOG` when it parses
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)))
}

/// Install the global subscriber.
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_logging(verbose: bool, quiet: bool) {
    let installed = tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_thread_ids(verbose),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(verbose, quiet, "Logging initialized");
    }
}

/// Install the global subscriber for the merged settings
pub fn init_logging_for(settings: &Settings) {
    init_logging(settings.verbose, settings.quiet);
}

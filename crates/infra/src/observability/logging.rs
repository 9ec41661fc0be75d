//! Tracing subscriber setup for binaries and integration harnesses

use calembed_domain::{CalEmbedError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,calembed=debug";

/// Install the global subscriber.
///
/// `RUST_LOG` overrides [`DEFAULT_FILTER`]. With `json` set, events are
/// written as one JSON object per line.
///
/// # Errors
/// Returns `CalEmbedError::Internal` if a global subscriber is already set.
pub fn init_tracing(json: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry.with(fmt::layer().json().with_current_span(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    installed.map_err(|e| CalEmbedError::Internal(format!("tracing already initialised: {e}")))
}

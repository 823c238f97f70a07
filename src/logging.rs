//! Diagnostic logging for the `chatgraph` binary.
//!
//! Progress meant for the user goes to stdout via `println!`; `tracing`
//! events go to stderr so the two never interleave in a pipe.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "chatgraph=debug" } else { "warn" }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `verbose`. Calling this twice is a no-op.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

//! Logging setup.
//!
//! Structured logging through `tracing`, filtered by `RUST_LOG` and written
//! to stderr so assembled arguments on stdout stay machine-readable.

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize the global subscriber writing to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    init_with_writer(std::io::stderr);
}

/// Initialize the global subscriber with a custom writer.
pub fn init_with_writer<W>(writer: W)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .try_init();
}

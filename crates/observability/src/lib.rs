//! Tracing and logging setup shared by the binaries.

/// Initialize process-wide logging.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::{LogFormat, ParseLogFormatError};

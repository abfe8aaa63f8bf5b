//! Benchmark setup error type.

use sinew_core::ConnectError;

/// Errors that may occur while preparing a benchmark.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// A generator rejected its benchmark configuration.
    #[error("generator configuration failed: {0}")]
    Connect(#[from] ConnectError),
}

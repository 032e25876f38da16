use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    /// No compute platform or device matched the request.
    #[error("no compute device found: {0}")]
    NoDeviceFound(String),

    /// User supplied value could not be used (non-numeric, zero, missing).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration is inconsistent with the inputs or the selected device.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Kernel source failed to build for the selected device.
    #[error("kernel compilation failed: {0}")]
    Compile(String),

    /// Buffer allocation, argument binding, enqueue or read-back failure.
    #[error("dispatch failed: {0}")]
    Dispatch(String),

    /// Device output disagrees with the host sum.
    #[error("result mismatch at index {index}: expected {expected}, got {actual}")]
    Verification {
        index: usize,
        expected: i32,
        actual: i32,
    },

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

use std::fmt;

use crate::BenchError;

#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.msg.fmt(f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Convert a library error into a CLI error with a hint.
pub fn bench_cli_error(context: &str, err: BenchError) -> CliError {
    CliError {
        msg: format!("{}: {}", context, cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for an error variant.
pub fn cli_hint(err: &BenchError) -> String {
    use BenchError::*;
    match err {
        NoDeviceFound(msg) => format!(
            "{msg}. Install an OpenCL runtime, run with --list-devices, or use --backend host."
        ),
        InvalidInput(msg) => format!("{msg}. Enter a positive whole number."),
        InvalidConfiguration(msg) => {
            format!("{msg}. Pick a smaller work-group size or check --size.")
        }
        Compile(msg) => format!("{msg}. The device rejected the kernel source."),
        Dispatch(msg) => format!("{msg}. The device failed while running the kernel."),
        Verification { .. } => format!("{err}. The device produced a wrong sum."),
        Io(io) => format!("{io}. Check that standard input and output are open."),
    }
}

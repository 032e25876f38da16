use crate::device::{DeviceInfo, SelectionPolicy};
use crate::BenchError;

/// Default number of elements in each input vector.
pub const DEFAULT_VECTOR_LEN: usize = 10_000_000;

/// Runtime configuration for one benchmark run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Elements per input vector.
    pub vector_len: usize,
    /// Work-items per work-group. `None` until the user has supplied it.
    pub work_group_size: Option<usize>,
    /// Generator seed. `None` falls back to the wall clock.
    pub seed: Option<u64>,
    /// Device selection policy.
    pub policy: SelectionPolicy,
    /// Explicit device ordinal, overriding `policy`.
    pub device: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vector_len: DEFAULT_VECTOR_LEN,
            work_group_size: None,
            seed: None,
            policy: SelectionPolicy::First,
            device: None,
        }
    }
}

impl Config {
    /// Reject vector lengths the kernel cannot index, before anything is
    /// allocated for them.
    pub fn check_len(&self) -> Result<(), BenchError> {
        if self.vector_len == 0 {
            return Err(BenchError::InvalidConfiguration(
                "vector length must be positive".into(),
            ));
        }
        // the kernel receives the length as a signed 32-bit int
        if self.vector_len > i32::MAX as usize {
            return Err(BenchError::InvalidConfiguration(format!(
                "vector length {} exceeds the kernel's int range",
                self.vector_len
            )));
        }
        Ok(())
    }

    /// Check the configuration against the selected device and return the
    /// work-group size to dispatch with.
    pub fn validate(&self, device: &DeviceInfo) -> Result<usize, BenchError> {
        self.check_len()?;
        let group = self.work_group_size.ok_or_else(|| {
            BenchError::InvalidConfiguration("work-group size not set".into())
        })?;
        if group == 0 {
            return Err(BenchError::InvalidConfiguration(
                "work-group size must be positive".into(),
            ));
        }
        if group > self.vector_len {
            return Err(BenchError::InvalidConfiguration(format!(
                "work-group size {group} exceeds vector length {}",
                self.vector_len
            )));
        }
        if group > device.max_work_group_size {
            return Err(BenchError::InvalidConfiguration(format!(
                "work-group size {group} exceeds device maximum {} on {}",
                device.max_work_group_size, device.name
            )));
        }
        Ok(group)
    }
}

/// Parse a user supplied work-group size.
pub fn parse_work_group_size(text: &str) -> Result<usize, BenchError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(BenchError::InvalidInput("no work-group size given".into()));
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| BenchError::InvalidInput(format!("'{trimmed}' is not a number")))?;
    if value <= 0 {
        return Err(BenchError::InvalidInput(format!(
            "work-group size must be positive, got {value}"
        )));
    }
    usize::try_from(value)
        .map_err(|_| BenchError::InvalidInput(format!("work-group size {value} is too large")))
}

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::BenchError;

/// Description of one compute device as reported by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// Position in the flattened platform/device enumeration.
    pub ordinal: usize,
    pub platform_index: usize,
    pub device_index: usize,
    /// Platform name.
    pub platform: String,
    /// Device name.
    pub name: String,
    /// Parallel compute units reported by the device.
    pub compute_units: u32,
    /// Largest work-group the device accepts.
    pub max_work_group_size: usize,
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} / {} ({} compute units, max work-group {})",
            self.ordinal, self.platform, self.name, self.compute_units, self.max_work_group_size
        )
    }
}

/// How a device is picked from the enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// First device of the first platform.
    #[default]
    First,
    /// Device with the most compute units; ties go to the lower ordinal.
    MostComputeUnits,
}

impl FromStr for SelectionPolicy {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Self::First),
            "most-compute-units" | "most" => Ok(Self::MostComputeUnits),
            other => Err(BenchError::InvalidInput(format!(
                "unknown selection policy '{other}'"
            ))),
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::MostComputeUnits => write!(f, "most-compute-units"),
        }
    }
}

/// Pick a device. An explicit `ordinal` wins over the policy.
pub fn select_device(
    devices: &[DeviceInfo],
    policy: SelectionPolicy,
    ordinal: Option<usize>,
) -> Result<DeviceInfo, BenchError> {
    if devices.is_empty() {
        return Err(BenchError::NoDeviceFound(
            "enumeration returned no platforms or devices".into(),
        ));
    }
    if let Some(wanted) = ordinal {
        return devices
            .iter()
            .find(|d| d.ordinal == wanted)
            .cloned()
            .ok_or_else(|| {
                BenchError::NoDeviceFound(format!(
                    "device {wanted} requested but only {} available",
                    devices.len()
                ))
            });
    }
    let chosen = match policy {
        SelectionPolicy::First => devices.iter().min_by_key(|d| d.ordinal),
        SelectionPolicy::MostComputeUnits => devices
            .iter()
            .max_by(|x, y| {
                x.compute_units
                    .cmp(&y.compute_units)
                    .then_with(|| y.ordinal.cmp(&x.ordinal))
            }),
    };
    chosen
        .cloned()
        .ok_or_else(|| BenchError::NoDeviceFound("no device matched".into()))
}

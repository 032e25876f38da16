use sysinfo::{CpuExt, System, SystemExt};
use tracing::{debug, trace};

use super::ComputeBackend;
use crate::device::DeviceInfo;
use crate::kernel::{LaunchGeometry, KERNEL_NAME};
use crate::BenchError;

/// Work-group limit advertised by the simulated device.
pub const HOST_MAX_WORK_GROUP_SIZE: usize = 1024;

/// Host simulation of a compute device.
///
/// Dispatch walks every work-group and every work-item in it, applying the
/// same bounds guard as the OpenCL kernel, so results match a real device
/// for any launch geometry.
#[derive(Debug, Clone)]
pub struct HostBackend {
    devices: Vec<DeviceInfo>,
}

#[derive(Debug)]
pub struct HostKernel {
    entry: String,
    max_work_group_size: usize,
}

#[derive(Debug)]
pub struct HostBuffers {
    a: Vec<i32>,
    b: Vec<i32>,
    result: Vec<i32>,
    size: usize,
}

impl HostBackend {
    /// One device describing the host CPU.
    pub fn new() -> Self {
        Self {
            devices: vec![host_device()],
        }
    }

    /// Pretend the platform exposes exactly `devices`. An empty list models a
    /// machine with no compute platform installed.
    pub fn with_devices(devices: Vec<DeviceInfo>) -> Self {
        Self { devices }
    }
}

impl Default for HostBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn host_device() -> DeviceInfo {
    let mut sys = System::new();
    sys.refresh_cpu();
    let cpus = sys.cpus();
    let name = cpus
        .first()
        .map(|c| c.brand().trim().to_string())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| "host cpu".to_string());
    DeviceInfo {
        ordinal: 0,
        platform_index: 0,
        device_index: 0,
        platform: "host simulation".to_string(),
        name,
        compute_units: cpus.len().max(1) as u32,
        max_work_group_size: HOST_MAX_WORK_GROUP_SIZE,
    }
}

impl ComputeBackend for HostBackend {
    type Kernel = HostKernel;
    type Buffers = HostBuffers;

    fn name(&self) -> &'static str {
        "host"
    }

    fn enumerate_devices(&self) -> Result<Vec<DeviceInfo>, BenchError> {
        Ok(self.devices.clone())
    }

    fn compile(&mut self, device: &DeviceInfo, source: &str) -> Result<HostKernel, BenchError> {
        if !self.devices.iter().any(|d| d == device) {
            return Err(BenchError::NoDeviceFound(format!(
                "device {} is not exposed by the host backend",
                device.ordinal
            )));
        }
        let signature = format!("__kernel void {KERNEL_NAME}(");
        if !source.contains(&signature) {
            return Err(BenchError::Compile(format!(
                "entry point '{KERNEL_NAME}' not found in kernel source"
            )));
        }
        debug!(device = %device.name, "host kernel ready");
        Ok(HostKernel {
            entry: KERNEL_NAME.to_string(),
            max_work_group_size: device.max_work_group_size,
        })
    }

    fn bind(&mut self, kernel: &HostKernel, a: &[i32], b: &[i32]) -> Result<HostBuffers, BenchError> {
        if a.len() != b.len() {
            return Err(BenchError::Dispatch(format!(
                "{}: operand lengths differ ({} vs {})",
                kernel.entry,
                a.len(),
                b.len()
            )));
        }
        Ok(HostBuffers {
            a: a.to_vec(),
            b: b.to_vec(),
            result: vec![0; a.len()],
            size: a.len(),
        })
    }

    fn dispatch(
        &mut self,
        kernel: &HostKernel,
        buffers: &mut HostBuffers,
        geometry: &LaunchGeometry,
    ) -> Result<(), BenchError> {
        if geometry.local > kernel.max_work_group_size {
            return Err(BenchError::InvalidConfiguration(format!(
                "work-group size {} exceeds kernel limit {}",
                geometry.local, kernel.max_work_group_size
            )));
        }
        if geometry.global % geometry.local != 0 {
            return Err(BenchError::Dispatch(format!(
                "global size {} is not a multiple of local size {}",
                geometry.global, geometry.local
            )));
        }
        let size = buffers.size;
        for group in 0..geometry.global / geometry.local {
            for local_id in 0..geometry.local {
                let i = group * geometry.local + local_id;
                if i < size {
                    buffers.result[i] = buffers.a[i].wrapping_add(buffers.b[i]);
                }
            }
        }
        trace!(global = geometry.global, local = geometry.local, "host dispatch complete");
        Ok(())
    }

    fn read_result(&mut self, buffers: &HostBuffers) -> Result<Vec<i32>, BenchError> {
        Ok(buffers.result.clone())
    }
}

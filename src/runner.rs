use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::backend::ComputeBackend;
use crate::config::Config;
use crate::device::{select_device, DeviceInfo};
use crate::input::InputVectors;
use crate::kernel::{LaunchGeometry, VECTOR_ADD_SRC};
use crate::BenchError;

/// Pipeline checkpoints of one run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    DeviceReady,
    KernelBuilt,
    BuffersBound,
    Dispatched,
    Synchronized,
    Reported,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::DeviceReady => "device-ready",
            Stage::KernelBuilt => "kernel-built",
            Stage::BuffersBound => "buffers-bound",
            Stage::Dispatched => "dispatched",
            Stage::Synchronized => "synchronized",
            Stage::Reported => "reported",
        };
        f.write_str(name)
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct BenchReport {
    pub backend: &'static str,
    pub device: DeviceInfo,
    pub work_group_size: usize,
    pub geometry: LaunchGeometry,
    /// Wall-clock time from enqueue to completion.
    pub elapsed: Duration,
    pub result: Vec<i32>,
}

impl BenchReport {
    pub fn vector_len(&self) -> usize {
        self.geometry.len
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Compare the device result against the host sum of `inputs`.
    pub fn verify(&self, inputs: &InputVectors) -> Result<(), BenchError> {
        if self.result.len() != inputs.len() {
            return Err(BenchError::InvalidConfiguration(format!(
                "result has {} elements, inputs have {}",
                self.result.len(),
                inputs.len()
            )));
        }
        let mismatch = inputs
            .a()
            .iter()
            .zip(inputs.b())
            .zip(&self.result)
            .enumerate()
            .find(|(_, ((a, b), r))| a.wrapping_add(**b) != **r);
        match mismatch {
            Some((index, ((a, b), r))) => Err(BenchError::Verification {
                index,
                expected: a.wrapping_add(*b),
                actual: *r,
            }),
            None => Ok(()),
        }
    }
}

fn stage(s: Stage) {
    debug!(stage = %s, "pipeline");
}

/// Run the vector sum once on `backend` and time the kernel.
///
/// Only the dispatch (enqueue plus the blocking wait) is timed; setup,
/// transfers and read-back are not.
pub fn run_benchmark<B: ComputeBackend>(
    backend: &mut B,
    config: &Config,
    inputs: &InputVectors,
) -> Result<BenchReport, BenchError> {
    stage(Stage::Start);
    if config.vector_len != inputs.len() {
        return Err(BenchError::InvalidConfiguration(format!(
            "configured length {} does not match input length {}",
            config.vector_len,
            inputs.len()
        )));
    }

    let devices = backend.enumerate_devices()?;
    debug!(count = devices.len(), backend = backend.name(), "devices enumerated");
    let device = select_device(&devices, config.policy, config.device)?;
    info!(device = %device, "selected device");
    stage(Stage::DeviceReady);

    let work_group_size = config.validate(&device)?;
    let geometry = LaunchGeometry::new(inputs.len(), work_group_size)?;
    if geometry.padding() > 0 {
        debug!(padding = geometry.padding(), "global size rounded up to whole work-groups");
    }

    let kernel = backend.compile(&device, VECTOR_ADD_SRC)?;
    stage(Stage::KernelBuilt);

    let mut buffers = backend.bind(&kernel, inputs.a(), inputs.b())?;
    stage(Stage::BuffersBound);

    let start = Instant::now();
    stage(Stage::Dispatched);
    backend.dispatch(&kernel, &mut buffers, &geometry)?;
    let elapsed = start.elapsed();
    stage(Stage::Synchronized);

    let result = backend.read_result(&buffers)?;
    info!(
        work_group_size,
        global = geometry.global,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "kernel finished"
    );
    stage(Stage::Reported);

    Ok(BenchReport {
        backend: backend.name(),
        device,
        work_group_size,
        geometry,
        elapsed,
        result,
    })
}

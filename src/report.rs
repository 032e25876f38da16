//! Rendering of a finished run for standard output.

use serde::Serialize;

use crate::device::DeviceInfo;
use crate::runner::BenchReport;

/// The two human-readable report lines.
pub fn render_text(report: &BenchReport) -> String {
    format!(
        "Number of Threads Used: {}\nExecution Time: {:.3} milliseconds\n",
        report.work_group_size,
        report.elapsed_ms()
    )
}

/// Machine-readable summary. The result vector itself is not included.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub backend: &'a str,
    pub device: &'a DeviceInfo,
    pub vector_len: usize,
    pub work_group_size: usize,
    pub global_work_size: usize,
    pub work_groups: usize,
    pub elapsed_ms: f64,
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a BenchReport, seed: Option<u64>, verified: Option<bool>) -> Self {
        Self {
            backend: report.backend,
            device: &report.device,
            vector_len: report.vector_len(),
            work_group_size: report.work_group_size,
            global_work_size: report.geometry.global,
            work_groups: report.geometry.groups,
            elapsed_ms: report.elapsed_ms(),
            seed,
            verified,
        }
    }
}

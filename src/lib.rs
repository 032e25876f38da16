//! Element-wise vector addition offloaded to a compute device, with the
//! kernel dispatch timed on the host.
//!
//! The OpenCL backend is compiled in with the `gpu` feature. The host
//! simulation is always available and is what the tests run against.

pub mod backend;
pub mod config;
pub mod device;
pub mod error;
pub mod input;
pub mod io_utils;
pub mod kernel;
pub mod prompt;
pub mod report;
pub mod runner;

pub use backend::{ComputeBackend, HostBackend};
#[cfg(feature = "gpu")]
pub use backend::OpenClBackend;
pub use config::{parse_work_group_size, Config, DEFAULT_VECTOR_LEN};
pub use device::{select_device, DeviceInfo, SelectionPolicy};
pub use error::BenchError;
pub use input::{generate_vector, seed_from_clock, InputVectors, VALUE_BOUND};
pub use kernel::{LaunchGeometry, KERNEL_NAME, VECTOR_ADD_SRC};
pub use prompt::{prompt_work_group_size, THREADS_PROMPT};
pub use report::{render_text, JsonReport};
pub use runner::{run_benchmark, BenchReport, Stage};

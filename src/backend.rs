use crate::device::DeviceInfo;
use crate::kernel::LaunchGeometry;
use crate::BenchError;

#[cfg(feature = "gpu")]
#[path = "opencl.rs"]
mod opencl;
#[cfg(feature = "gpu")]
pub use opencl::{OpenClBackend, OpenClBuffers, OpenClKernel};

#[path = "host.rs"]
mod host;
pub use host::{HostBackend, HostBuffers, HostKernel, HOST_MAX_WORK_GROUP_SIZE};

/// Capability surface of a compute API: device discovery, kernel
/// compilation, buffer binding and range dispatch.
///
/// One run calls the methods in order: `enumerate_devices`, `compile`,
/// `bind`, `dispatch`, `read_result`. Resources are released when the
/// returned handles are dropped.
pub trait ComputeBackend {
    /// Compiled program bound to one device and queue.
    type Kernel;
    /// Device buffers plus bound kernel arguments.
    type Buffers;

    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// List every device of every platform, in platform order.
    fn enumerate_devices(&self) -> Result<Vec<DeviceInfo>, BenchError>;

    /// Build `source` for `device`.
    fn compile(&mut self, device: &DeviceInfo, source: &str) -> Result<Self::Kernel, BenchError>;

    /// Upload `a` and `b` read-only, allocate the write-only result and bind
    /// all three plus the element count as kernel arguments.
    fn bind(
        &mut self,
        kernel: &Self::Kernel,
        a: &[i32],
        b: &[i32],
    ) -> Result<Self::Buffers, BenchError>;

    /// Enqueue the kernel over `geometry` and block until the device is done.
    /// A local size above the compiled kernel's work-group limit is rejected
    /// with `InvalidConfiguration` before anything is enqueued.
    fn dispatch(
        &mut self,
        kernel: &Self::Kernel,
        buffers: &mut Self::Buffers,
        geometry: &LaunchGeometry,
    ) -> Result<(), BenchError>;

    /// Copy the result buffer back to the host.
    fn read_result(&mut self, buffers: &Self::Buffers) -> Result<Vec<i32>, BenchError>;
}

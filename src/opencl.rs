use ocl::enums::{
    DeviceInfo as ClDeviceInfo, DeviceInfoResult, KernelWorkGroupInfo, KernelWorkGroupInfoResult,
};
use ocl::flags::MemFlags;
use ocl::{Buffer, Context, Device, Platform, Program, Queue};
use tracing::{debug, warn};

use super::ComputeBackend;
use crate::device::DeviceInfo;
use crate::kernel::{LaunchGeometry, KERNEL_NAME};
use crate::BenchError;

/// Compute backend driving a real OpenCL device through `ocl`.
#[derive(Debug, Default)]
pub struct OpenClBackend;

/// Program built for one device plus the queue bound to it.
pub struct OpenClKernel {
    queue: Queue,
    program: Program,
    device: Device,
    device_max_work_group_size: usize,
}

/// Device buffers and the kernel with its arguments set.
pub struct OpenClBuffers {
    kernel: ocl::Kernel,
    _a: Buffer<i32>,
    _b: Buffer<i32>,
    result: Buffer<i32>,
    len: usize,
    max_work_group_size: usize,
}

impl OpenClBuffers {
    /// Largest work-group the bound kernel can be launched with on its device.
    pub fn max_work_group_size(&self) -> usize {
        self.max_work_group_size
    }
}

impl OpenClBackend {
    pub fn new() -> Self {
        Self
    }
}

fn platforms() -> Vec<Platform> {
    match ocl::core::get_platform_ids() {
        Ok(ids) => ids.into_iter().map(Platform::new).collect(),
        Err(e) => {
            debug!("no OpenCL platforms: {e}");
            Vec::new()
        }
    }
}

fn locate(info: &DeviceInfo) -> Result<(Platform, Device), BenchError> {
    let missing = || {
        BenchError::NoDeviceFound(format!(
            "platform {} device {} disappeared",
            info.platform_index, info.device_index
        ))
    };
    let platform = platforms()
        .into_iter()
        .nth(info.platform_index)
        .ok_or_else(missing)?;
    let device = Device::list_all(platform)
        .map_err(|e| BenchError::NoDeviceFound(format!("{e}")))?
        .into_iter()
        .nth(info.device_index)
        .ok_or_else(missing)?;
    Ok((platform, device))
}

fn dispatch_err(context: &str) -> impl Fn(ocl::Error) -> BenchError + '_ {
    move |e| BenchError::Dispatch(format!("{context}: {e}"))
}

impl ComputeBackend for OpenClBackend {
    type Kernel = OpenClKernel;
    type Buffers = OpenClBuffers;

    fn name(&self) -> &'static str {
        "opencl"
    }

    fn enumerate_devices(&self) -> Result<Vec<DeviceInfo>, BenchError> {
        let mut out = Vec::new();
        for (platform_index, platform) in platforms().into_iter().enumerate() {
            let platform_name = platform
                .name()
                .unwrap_or_else(|_| format!("platform {platform_index}"));
            let devices = match Device::list_all(platform) {
                Ok(d) => d,
                Err(e) => {
                    warn!(platform = %platform_name, "listing devices failed: {e}");
                    continue;
                }
            };
            for (device_index, device) in devices.into_iter().enumerate() {
                let compute_units = match device.info(ClDeviceInfo::MaxComputeUnits) {
                    Ok(DeviceInfoResult::MaxComputeUnits(n)) => n,
                    _ => 0,
                };
                out.push(DeviceInfo {
                    ordinal: out.len(),
                    platform_index,
                    device_index,
                    platform: platform_name.clone(),
                    name: device
                        .name()
                        .unwrap_or_else(|_| format!("device {device_index}")),
                    compute_units,
                    max_work_group_size: device.max_wg_size().unwrap_or(1),
                });
            }
        }
        Ok(out)
    }

    fn compile(&mut self, device: &DeviceInfo, source: &str) -> Result<OpenClKernel, BenchError> {
        let (platform, cl_device) = locate(device)?;
        let context = Context::builder()
            .platform(platform)
            .devices(cl_device)
            .build()
            .map_err(dispatch_err("creating context"))?;
        let queue = Queue::new(&context, cl_device, None).map_err(dispatch_err("creating queue"))?;
        let program = Program::builder()
            .src(source)
            .devices(cl_device)
            .build(&context)
            .map_err(|e| BenchError::Compile(format!("{e}")))?;
        debug!(device = %device.name, "OpenCL program built");
        Ok(OpenClKernel {
            queue,
            program,
            device: cl_device,
            device_max_work_group_size: device.max_work_group_size,
        })
    }

    fn bind(&mut self, kernel: &OpenClKernel, a: &[i32], b: &[i32]) -> Result<OpenClBuffers, BenchError> {
        if a.len() != b.len() {
            return Err(BenchError::Dispatch(format!(
                "operand lengths differ ({} vs {})",
                a.len(),
                b.len()
            )));
        }
        let len = a.len();
        let a_buf = Buffer::<i32>::builder()
            .queue(kernel.queue.clone())
            .flags(MemFlags::new().read_only())
            .len(len)
            .copy_host_slice(a)
            .build()
            .map_err(dispatch_err("allocating buffer a"))?;
        let b_buf = Buffer::<i32>::builder()
            .queue(kernel.queue.clone())
            .flags(MemFlags::new().read_only())
            .len(len)
            .copy_host_slice(b)
            .build()
            .map_err(dispatch_err("allocating buffer b"))?;
        let result = Buffer::<i32>::builder()
            .queue(kernel.queue.clone())
            .flags(MemFlags::new().write_only())
            .len(len)
            .build()
            .map_err(dispatch_err("allocating result buffer"))?;
        let cl_kernel = ocl::Kernel::builder()
            .program(&kernel.program)
            .name(KERNEL_NAME)
            .queue(kernel.queue.clone())
            .arg(&a_buf)
            .arg(&b_buf)
            .arg(&result)
            .arg(len as i32)
            .build()
            .map_err(dispatch_err("binding kernel arguments"))?;
        // register pressure can push the per-kernel limit below the device's
        let max_work_group_size =
            match cl_kernel.wg_info(kernel.device, KernelWorkGroupInfo::WorkGroupSize) {
                Ok(KernelWorkGroupInfoResult::WorkGroupSize(n)) => n,
                _ => kernel.device_max_work_group_size,
            };
        debug!(max_work_group_size, "kernel work-group limit");
        Ok(OpenClBuffers {
            kernel: cl_kernel,
            _a: a_buf,
            _b: b_buf,
            result,
            len,
            max_work_group_size,
        })
    }

    fn dispatch(
        &mut self,
        kernel: &OpenClKernel,
        buffers: &mut OpenClBuffers,
        geometry: &LaunchGeometry,
    ) -> Result<(), BenchError> {
        if geometry.local > buffers.max_work_group_size {
            return Err(BenchError::InvalidConfiguration(format!(
                "work-group size {} exceeds kernel limit {}",
                geometry.local, buffers.max_work_group_size
            )));
        }
        unsafe {
            buffers
                .kernel
                .cmd()
                .global_work_size(geometry.global)
                .local_work_size(geometry.local)
                .enq()
                .map_err(dispatch_err("enqueueing kernel"))?;
        }
        kernel.queue.finish().map_err(dispatch_err("waiting for queue"))
    }

    fn read_result(&mut self, buffers: &OpenClBuffers) -> Result<Vec<i32>, BenchError> {
        let mut out = vec![0i32; buffers.len];
        buffers
            .result
            .read(&mut out)
            .enq()
            .map_err(dispatch_err("reading result"))?;
        Ok(out)
    }
}

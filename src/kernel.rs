use crate::BenchError;

/// OpenCL C source for the element-wise sum. Work-items whose global id is
/// not below `size` do nothing.
pub const VECTOR_ADD_SRC: &str = include_str!("kernels/vector_add.cl");

/// Entry point declared in [`VECTOR_ADD_SRC`].
pub const KERNEL_NAME: &str = "vector_add";

/// Global and local sizes of a one-dimensional dispatch.
///
/// `global` is the vector length rounded up to a whole number of work-groups.
/// The padded work-items are skipped by the kernel's bounds guard, so every
/// index below `len` is still computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchGeometry {
    /// Number of elements the kernel must cover.
    pub len: usize,
    /// Work-items per work-group.
    pub local: usize,
    /// Total work-items enqueued.
    pub global: usize,
    /// Number of work-groups.
    pub groups: usize,
}

impl LaunchGeometry {
    pub fn new(len: usize, local: usize) -> Result<Self, BenchError> {
        if len == 0 {
            return Err(BenchError::InvalidConfiguration(
                "vector length must be positive".into(),
            ));
        }
        if local == 0 {
            return Err(BenchError::InvalidConfiguration(
                "work-group size must be positive".into(),
            ));
        }
        // the kernel receives the length as a signed 32-bit int
        if len > i32::MAX as usize {
            return Err(BenchError::InvalidConfiguration(format!(
                "vector length {len} exceeds the kernel's int range"
            )));
        }
        let groups = len.div_ceil(local);
        Ok(Self {
            len,
            local,
            global: groups * local,
            groups,
        })
    }

    /// Work-items launched past the end of the vector.
    pub fn padding(&self) -> usize {
        self.global - self.len
    }
}

//! CUDA device implementation

use crate::runtime::Device;

/// A single GPU, identified by its ordinal
#[derive(Clone, Debug)]
pub struct CudaDevice {
    /// Index of the GPU device (0, 1, 2, ...)
    pub(crate) index: usize,
}

impl CudaDevice {
    /// Create a handle for GPU `index`
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Default for CudaDevice {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Device for CudaDevice {
    fn id(&self) -> usize {
        self.index
    }

    fn name(&self) -> String {
        format!("cuda:{}", self.index)
    }
}

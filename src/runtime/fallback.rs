//! Host staging for accelerator ops
//!
//! Some ops are only implemented on the CPU. An accelerator client runs them
//! by copying operands to host memory, calling the CPU client, and uploading
//! the results back to its own device. Values are unchanged by the trip, so
//! results match the CPU backend exactly.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
use crate::tensor::Tensor;

/// CPU client and device used as the staging target
pub(crate) struct CpuFallbackContext {
    pub client: CpuClient,
    pub device: CpuDevice,
}

impl CpuFallbackContext {
    pub fn new() -> Self {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        Self { client, device }
    }

    /// Download a tensor into host memory
    pub fn to_host<R: Runtime>(&self, tensor: &Tensor<R>) -> Result<Tensor<CpuRuntime>> {
        tensor.to_runtime::<CpuRuntime>(&self.device)
    }
}

/// Run a CPU op producing one tensor and upload the result to `device`
pub(crate) fn host_op<R, F>(device: &R::Device, op: F) -> Result<Tensor<R>>
where
    R: Runtime,
    F: FnOnce(&CpuFallbackContext) -> Result<Tensor<CpuRuntime>>,
{
    let ctx = CpuFallbackContext::new();
    op(&ctx)?.to_runtime::<R>(device)
}

/// Run a CPU op producing two tensors and upload both to `device`
pub(crate) fn host_op2<R, F>(device: &R::Device, op: F) -> Result<(Tensor<R>, Tensor<R>)>
where
    R: Runtime,
    F: FnOnce(&CpuFallbackContext) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)>,
{
    let ctx = CpuFallbackContext::new();
    let (a, b) = op(&ctx)?;
    Ok((a.to_runtime::<R>(device)?, b.to_runtime::<R>(device)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::ops::UtilityOps;

    #[test]
    fn test_host_op_roundtrip_on_cpu() {
        let device = CpuDevice::new();
        let eye = host_op::<CpuRuntime, _>(&device, |ctx| ctx.client.eye(2, None, DType::F64))
            .unwrap();
        assert_eq!(eye.to_vec::<f64>().unwrap(), vec![1.0, 0.0, 0.0, 1.0]);
    }
}

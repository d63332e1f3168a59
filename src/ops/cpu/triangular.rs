//! CPU implementation of the triangular LU split.

use crate::dispatch_dtype;
use crate::error::Result;
use crate::ops::TriangularOps;
use crate::ops::validate::validate_square;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Tensor;

impl TriangularOps<CpuRuntime> for CpuClient {
    fn split_lu(
        &self,
        lu: &Tensor<CpuRuntime>,
    ) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        let n = validate_square(lu.shape())?;
        let dtype = lu.dtype();

        let upper = Tensor::<CpuRuntime>::try_empty(&[n, n], dtype, &self.device)?;
        let lower = Tensor::<CpuRuntime>::try_empty(&[n, n], dtype, &self.device)?;
        if n == 0 {
            return Ok((upper, lower));
        }

        let lu = lu.contiguous()?;
        let lu_ptr = lu.data_ptr();
        let lower_ptr = lower.storage().ptr();
        let upper_ptr = upper.storage().ptr();

        dispatch_dtype!(dtype, T => {
            unsafe {
                kernels::split_lu_kernel::<T>(
                    lu_ptr as *const T,
                    lower_ptr as *mut T,
                    upper_ptr as *mut T,
                    n,
                );
            }
        }, "split_lu");

        Ok((upper, lower))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;
    use crate::runtime::cpu::CpuDevice;

    #[test]
    fn test_split_lu_shapes_and_values() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        let lu = Tensor::<CpuRuntime>::from_slice(&[4.0f32, 3.0, 0.5, 2.0], &[2, 2], &device);

        let (upper, lower) = client.split_lu(&lu).unwrap();
        assert_eq!(upper.to_vec::<f32>().unwrap(), vec![4.0, 3.0, 0.0, 2.0]);
        assert_eq!(lower.to_vec::<f32>().unwrap(), vec![1.0, 0.0, 0.5, 1.0]);
        assert!(!upper.shares_storage_with(&lu));
    }
}

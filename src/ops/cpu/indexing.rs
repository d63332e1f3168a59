//! CPU implementation of indexing operations.

use crate::dispatch_dtype;
use crate::error::Result;
use crate::ops::IndexingOps;
use crate::ops::validate::{check_indices_in_bounds, validate_index_select};
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Tensor;

impl IndexingOps<CpuRuntime> for CpuClient {
    fn index_select(
        &self,
        a: &Tensor<CpuRuntime>,
        dim: usize,
        index: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        let out_shape = validate_index_select(a.shape(), dim, index.shape(), index.dtype())?;

        let a = a.contiguous()?;
        let index = index.contiguous()?;
        let index_len = index.numel();

        let dtype = a.dtype();
        let out = Tensor::<CpuRuntime>::try_empty(&out_shape, dtype, &self.device)?;
        if out.numel() == 0 {
            return Ok(out);
        }

        // Host memory: read the indices in place
        let idx_ptr = index.data_ptr() as *const i64;
        let indices = unsafe { std::slice::from_raw_parts(idx_ptr, index_len) };
        check_indices_in_bounds(indices, a.shape()[dim])?;

        let a_ptr = a.data_ptr();
        let out_ptr = out.storage().ptr();

        dispatch_dtype!(dtype, T => {
            unsafe {
                kernels::index_select_kernel::<T>(
                    a_ptr as *const T,
                    idx_ptr,
                    out_ptr as *mut T,
                    a.shape(),
                    dim,
                    index_len,
                );
            }
        }, "index_select");

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::runtime::Runtime;
    use crate::runtime::cpu::CpuDevice;

    #[test]
    fn test_index_select_rows_of_transposed_view() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        let a = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device);
        let idx = Tensor::<CpuRuntime>::from_slice(&[1i64, 0], &[2], &device);

        let out = client.index_select(&a.t().unwrap(), 0, &idx).unwrap();
        assert_eq!(out.to_vec::<f32>().unwrap(), vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn test_index_select_out_of_bounds() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        let a = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0], &[2, 1], &device);
        let idx = Tensor::<CpuRuntime>::from_slice(&[2i64], &[1], &device);

        let err = client.index_select(&a, 0, &idx).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfBounds { index: 2, size: 2 }));
    }
}

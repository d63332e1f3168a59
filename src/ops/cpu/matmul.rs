//! CPU implementation of matrix multiplication.

use crate::dispatch_dtype;
use crate::error::Result;
use crate::ops::MatmulOps;
use crate::ops::validate::validate_matmul_shapes;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Tensor;

impl MatmulOps<CpuRuntime> for CpuClient {
    fn matmul(&self, a: &Tensor<CpuRuntime>, b: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        let [m, n] = validate_matmul_shapes(a.shape(), b.shape(), a.dtype(), b.dtype())?;
        let k = a.shape()[1];

        let dtype = a.dtype();
        let out = Tensor::<CpuRuntime>::try_empty(&[m, n], dtype, &self.device)?;
        // Zero-filled output is already the product of empty operands
        if m == 0 || n == 0 || k == 0 {
            return Ok(out);
        }

        let a = a.contiguous()?;
        let b = b.contiguous()?;
        let a_ptr = a.data_ptr();
        let b_ptr = b.data_ptr();
        let out_ptr = out.storage().ptr();

        dispatch_dtype!(dtype, T => {
            unsafe {
                kernels::matmul_kernel::<T>(
                    a_ptr as *const T,
                    b_ptr as *const T,
                    out_ptr as *mut T,
                    m,
                    n,
                    k,
                );
            }
        }, "matmul");

        Ok(out)
    }
}

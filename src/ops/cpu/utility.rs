//! CPU implementation of utility operations.

use crate::dispatch_dtype;
use crate::dtype::DType;
use crate::error::Result;
use crate::ops::UtilityOps;
use crate::ops::validate::validate_eye;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Tensor;

impl UtilityOps<CpuRuntime> for CpuClient {
    fn eye(&self, n: usize, m: Option<usize>, dtype: DType) -> Result<Tensor<CpuRuntime>> {
        let (rows, cols) = validate_eye(n, m);

        let out = Tensor::<CpuRuntime>::try_empty(&[rows, cols], dtype, &self.device)?;
        if rows == 0 || cols == 0 {
            return Ok(out);
        }

        let out_ptr = out.storage().ptr();

        dispatch_dtype!(dtype, T => {
            unsafe {
                kernels::eye_kernel::<T>(out_ptr as *mut T, rows, cols);
            }
        }, "eye");

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;
    use crate::runtime::cpu::CpuDevice;

    #[test]
    fn test_eye_i64() {
        let client = CpuRuntime::default_client(&CpuDevice::new());
        let eye = client.eye(2, None, DType::I64).unwrap();
        assert_eq!(eye.shape(), &[2, 2]);
        assert_eq!(eye.to_vec::<i64>().unwrap(), vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_eye_bool_unsupported() {
        let client = CpuRuntime::default_client(&CpuDevice::new());
        assert!(client.eye(2, None, DType::Bool).is_err());
    }
}

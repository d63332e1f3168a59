//! Host LU factorization for the CPU client

use super::kernels::{self, CpuPivotInt};
use super::{CpuClient, CpuRuntime};
use crate::algorithm::linalg::{
    GetrfBackend, LuAlgorithms, LuFactors, PluDecomposition, lu_impl, lu_with_pivots_impl,
    pivot_dtype_for_width,
};
use crate::dispatch_float_dtype;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::tensor::Tensor;

impl GetrfBackend<CpuRuntime> for CpuClient {
    fn pivot_dtype(&self) -> Result<DType> {
        pivot_dtype_for_width(std::mem::size_of::<CpuPivotInt>())
    }

    fn getrf(
        &self,
        buffer: &Tensor<CpuRuntime>,
        pivots: &Tensor<CpuRuntime>,
        n: usize,
    ) -> Result<()> {
        if !buffer.is_contiguous() {
            return Err(Error::NotContiguous);
        }
        if buffer.shape() != [n, n] {
            return Err(Error::shape_mismatch(&[n, n], buffer.shape()));
        }
        let pivot_dtype = self.pivot_dtype()?;
        if pivots.dtype() != pivot_dtype {
            return Err(Error::DTypeMismatch {
                lhs: pivot_dtype,
                rhs: pivots.dtype(),
            });
        }
        if pivots.numel() != n {
            return Err(Error::shape_mismatch(&[n], pivots.shape()));
        }

        let buf_ptr = buffer.data_ptr();
        let ipiv = pivots.data_ptr() as *mut CpuPivotInt;

        let info = dispatch_float_dtype!(buffer.dtype(), T => {
            unsafe { kernels::getrf_kernel::<T>(buf_ptr as *mut T, ipiv, n) }
        }, "getrf");

        if info > 0 {
            log::debug!("getrf: exact zero pivot at U[{0}, {0}], matrix is singular", info - 1);
        }

        Ok(())
    }
}

impl LuAlgorithms<CpuRuntime> for CpuClient {
    fn lu_with_pivots(&self, a: &Tensor<CpuRuntime>) -> Result<LuFactors<CpuRuntime>> {
        lu_with_pivots_impl(self, a)
    }

    fn lu(&self, a: &Tensor<CpuRuntime>, permute_l: bool) -> Result<PluDecomposition<CpuRuntime>> {
        lu_impl(self, a, permute_l)
    }
}

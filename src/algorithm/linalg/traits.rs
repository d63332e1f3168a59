//! Backend contracts for LU factorization

use super::decompositions::{LuFactors, PluDecomposition};
use crate::dtype::DType;
use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// In-place pivoted LU (`getrf`) on one runtime
///
/// Each runtime client provides its own backend: the host client runs the
/// native kernel, the CUDA client calls cuSOLVER.
pub trait GetrfBackend<R: Runtime> {
    /// Dtype of the pivot array this backend writes
    fn pivot_dtype(&self) -> Result<DType>;

    /// Factor a column-major `n x n` matrix in place.
    ///
    /// `buffer` is a contiguous `[n, n]` tensor whose row-major contents are
    /// the column-major matrix (i.e. it holds the transpose). `pivots` is a
    /// length-`n` tensor of [`GetrfBackend::pivot_dtype`] that receives the
    /// 1-based swap log. Both are overwritten.
    fn getrf(&self, buffer: &Tensor<R>, pivots: &Tensor<R>, n: usize) -> Result<()>;
}

/// Pivoted LU factorization with explicit factors
pub trait LuAlgorithms<R: Runtime> {
    /// Factor `a` into the compact `getrf` form.
    ///
    /// `a` must be a non-empty square `F32`/`F64` matrix; it is never written.
    fn lu_with_pivots(&self, a: &Tensor<R>) -> Result<LuFactors<R>>;

    /// Factor `a` into explicit `P`, `L`, `U` with `A = P @ L @ U`.
    ///
    /// With `permute_l`, the returned `l` is `P @ L` so that `A = l @ u`;
    /// `p` is returned either way.
    ///
    /// # Example
    ///
    /// ```
    /// use numr_plu::prelude::*;
    ///
    /// let device = CpuDevice::new();
    /// let client = CpuRuntime::default_client(&device);
    /// let a = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2], &device);
    ///
    /// let plu = client.lu(&a, false)?;
    /// assert_eq!(plu.p.to_vec::<f64>()?, vec![0.0, 1.0, 1.0, 0.0]);
    /// # Ok::<(), numr_plu::error::Error>(())
    /// ```
    fn lu(&self, a: &Tensor<R>, permute_l: bool) -> Result<PluDecomposition<R>>;
}

//! Generic LU driver and PLU reconstructor
//!
//! Backend-independent: everything here goes through the runtime's client
//! traits, so CPU and CUDA share the same validation, layout handling and
//! permutation decoding.

use super::decompositions::{LuFactors, PluDecomposition};
use super::helpers::validate_lu_input;
use super::permutation::permutation_indices;
use super::traits::GetrfBackend;
use crate::error::{Error, Result};
use crate::ops::validate::validate_square;
use crate::ops::{IndexingOps, MatmulOps, TriangularOps, UtilityOps};
use crate::runtime::{Device, Runtime};
use crate::tensor::Tensor;

/// Run `getrf` on a private copy of `a` and return the packed factors.
///
/// `a` is copied through its transpose into fresh storage, which hands the
/// backend the column-major layout it works in. The copy is made even when
/// the transposed view is already contiguous (`1 x 1`), so `a` is never
/// written. The packed result is transposed back to row-major.
pub fn lu_with_pivots_impl<R, C>(client: &C, a: &Tensor<R>) -> Result<LuFactors<R>>
where
    R: Runtime,
    C: GetrfBackend<R>,
{
    let n = validate_lu_input(a)?;

    let buffer = a.t()?.deep_copy()?;
    let pivot_dtype = client.pivot_dtype()?;
    let pivots = Tensor::<R>::try_empty(&[n], pivot_dtype, a.device())?;

    log::debug!(
        "getrf: {}x{} {} on {} ({:?}), pivots {}",
        n,
        n,
        a.dtype(),
        R::name(),
        R::device_kind(),
        pivot_dtype
    );

    client.getrf(&buffer, &pivots, n)?;

    let lu = buffer.t()?.contiguous()?;
    Ok(LuFactors { lu, pivots })
}

/// Build explicit `P`, `L`, `U` from a packed factorization.
///
/// `P` is the transpose of the identity with its rows gathered by the decoded
/// permutation, so `A = P @ L @ U`. With `permute_l`, `L` is replaced by
/// `P @ L`.
pub fn plu_from_factors<R, C>(
    client: &C,
    lu: &Tensor<R>,
    pivots: &Tensor<R>,
    permute_l: bool,
) -> Result<PluDecomposition<R>>
where
    R: Runtime,
    C: UtilityOps<R> + IndexingOps<R> + MatmulOps<R> + TriangularOps<R>,
{
    let n = validate_square(lu.shape())?;
    if !lu.device().is_same(pivots.device()) {
        return Err(Error::DeviceMismatch {
            lhs: lu.device().name(),
            rhs: pivots.device().name(),
        });
    }

    let full = permutation_indices(pivots, n)?;
    let (u, l) = client.split_lu(lu)?;

    // Row j of the gathered identity selects original row full[j]: perm @ A = L @ U
    let perm = client.index_select(&client.eye(n, None, lu.dtype())?, 0, &full)?;
    let p = perm.t()?.contiguous()?;

    let l = if permute_l { client.matmul(&p, &l)? } else { l };

    Ok(PluDecomposition { p, l, u })
}

/// Factor `a` and reconstruct explicit factors in one call
pub fn lu_impl<R, C>(client: &C, a: &Tensor<R>, permute_l: bool) -> Result<PluDecomposition<R>>
where
    R: Runtime,
    C: GetrfBackend<R> + UtilityOps<R> + IndexingOps<R> + MatmulOps<R> + TriangularOps<R>,
{
    let LuFactors { lu, pivots } = lu_with_pivots_impl(client, a)?;
    plu_from_factors(client, &lu, &pivots, permute_l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_driver_copies_one_by_one_input() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        let a = Tensor::<CpuRuntime>::from_slice(&[2.0f64], &[1, 1], &device);

        let factors = lu_with_pivots_impl(&client, &a).unwrap();
        assert!(!factors.lu.shares_storage_with(&a));
        assert_eq!(factors.pivots.shape(), &[1]);
    }

    #[test]
    fn test_reconstructor_rejects_short_pivots() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        let lu = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 0.0, 0.0, 1.0], &[2, 2], &device);
        let pivots = Tensor::<CpuRuntime>::from_slice(&[1i32], &[1], &device);

        assert!(matches!(
            plu_from_factors(&client, &lu, &pivots, false),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_p_keeps_input_dtype() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        let lu = Tensor::<CpuRuntime>::from_slice(&[3.0f32, 4.0, 0.5, 1.0], &[2, 2], &device);
        let pivots = Tensor::<CpuRuntime>::from_slice(&[2i64, 2], &[2], &device);

        let plu = plu_from_factors(&client, &lu, &pivots, false).unwrap();
        assert_eq!(plu.p.dtype(), DType::F32);
        assert_eq!(plu.p.to_vec::<f32>().unwrap(), vec![0.0, 1.0, 1.0, 0.0]);
    }
}

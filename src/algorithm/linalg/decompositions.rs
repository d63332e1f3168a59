//! Result types for LU factorization

use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Compact LU factorization as produced by `getrf`
///
/// `lu` holds both factors in one row-major `n x n` matrix: the strict lower
/// triangle is L (unit diagonal implied), the rest is U.
pub struct LuFactors<R: Runtime> {
    /// Combined L\U matrix
    pub lu: Tensor<R>,

    /// 1-based sequential row swaps: at step `i`, row `i` was exchanged with
    /// row `pivots[i] - 1`. Signed integer tensor of length `n`.
    pub pivots: Tensor<R>,
}

/// Explicit factors with `A = P @ L @ U`
///
/// When built with `permute_l`, `l` already holds `P @ L`, so `A = l @ u`.
pub struct PluDecomposition<R: Runtime> {
    /// Permutation matrix, same dtype as the input
    pub p: Tensor<R>,
    /// Unit lower-triangular factor (or `P @ L`)
    pub l: Tensor<R>,
    /// Upper-triangular factor
    pub u: Tensor<R>,
}

impl<R: Runtime> PluDecomposition<R> {
    /// Unpack into `(p, l, u)`
    pub fn into_parts(self) -> (Tensor<R>, Tensor<R>, Tensor<R>) {
        (self.p, self.l, self.u)
    }
}

impl<R: Runtime> std::fmt::Debug for LuFactors<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LuFactors")
            .field("lu", &self.lu)
            .field("pivots", &self.pivots)
            .finish()
    }
}

impl<R: Runtime> std::fmt::Debug for PluDecomposition<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluDecomposition")
            .field("p", &self.p)
            .field("l", &self.l)
            .field("u", &self.u)
            .finish()
    }
}

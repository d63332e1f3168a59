//! Triangular split of packed factorizations.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Triangular operations
pub trait TriangularOps<R: Runtime> {
    /// Split a packed square LU matrix into `(upper, lower)`.
    ///
    /// `upper` keeps the diagonal and everything above it. `lower` keeps the
    /// strictly-lower part with ones written on its diagonal. Both are
    /// contiguous and independent of the input.
    fn split_lu(&self, lu: &Tensor<R>) -> Result<(Tensor<R>, Tensor<R>)>;
}

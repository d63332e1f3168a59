//! Indexing operations trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Gather operations
pub trait IndexingOps<R: Runtime> {
    /// Select elements along a dimension using indices.
    ///
    /// Output dimension `dim` has size `index.numel()`; slice `i` of the
    /// output is slice `index[i]` of `a`. Indices may repeat.
    ///
    /// # Arguments
    ///
    /// * `a` - Input tensor
    /// * `dim` - Dimension to select from
    /// * `index` - 1D index tensor (I64)
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if any index is negative or >= `a.shape()[dim]`.
    fn index_select(&self, a: &Tensor<R>, dim: usize, index: &Tensor<R>) -> Result<Tensor<R>>;
}

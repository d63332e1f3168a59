//! Matrix multiplication operations trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Matrix multiplication operations
pub trait MatmulOps<R: Runtime> {
    /// Matrix multiplication of two 2-D tensors: a @ b
    fn matmul(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>>;
}

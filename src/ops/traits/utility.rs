//! Utility operations trait.

use crate::dtype::DType;
use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Utility operations
pub trait UtilityOps<R: Runtime> {
    /// Create an identity matrix (2D tensor with ones on the diagonal)
    ///
    /// # Arguments
    ///
    /// * `n` - Number of rows
    /// * `m` - Number of columns (defaults to `n`)
    /// * `dtype` - Data type of the output tensor
    ///
    /// # Example
    ///
    /// ```
    /// # use numr_plu::prelude::*;
    /// # let client = CpuRuntime::default_client(&CpuDevice::new());
    /// let eye = client.eye(3, None, DType::F32)?;
    /// assert_eq!(eye.to_vec::<f32>()?, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    /// # Ok::<(), numr_plu::error::Error>(())
    /// ```
    fn eye(&self, n: usize, m: Option<usize>, dtype: DType) -> Result<Tensor<R>>;
}

//! Tensor operations
//!
//! Operations are traits implemented by each runtime's client, which owns the
//! device the output tensors are allocated on:
//!
//! ```text
//! RuntimeClient<R>
//!   ├── UtilityOps<R>     eye
//!   ├── IndexingOps<R>    index_select
//!   ├── MatmulOps<R>      matmul
//!   └── TriangularOps<R>  split_lu
//! ```
//!
//! The CPU client runs native kernels. The CUDA client stages through host
//! memory and reuses them.

mod dispatch;
pub(crate) mod validate;

mod cpu;
#[cfg(feature = "cuda")]
mod cuda;
mod traits;

pub use traits::{IndexingOps, MatmulOps, TriangularOps, UtilityOps};

//! CPU kernel implementations
//!
//! Kernels are `unsafe fn`s over raw pointers into host storage. Callers are
//! responsible for sizing buffers and keeping inputs and outputs disjoint.

pub mod getrf;
pub mod index;
pub mod matmul;
pub mod memory;

pub use getrf::{CpuPivotInt, getrf_kernel};
pub use index::index_select_kernel;
pub use matmul::matmul_kernel;
pub use memory::{eye_kernel, split_lu_kernel};

/// Below this many elements per task, rayon splitting costs more than it saves
#[cfg(feature = "rayon")]
pub(crate) const PAR_MIN_LEN: usize = 64;

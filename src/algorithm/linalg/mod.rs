//! Pivoted LU factorization and PLU reconstruction
//!
//! Two stages, run back to back by [`LuAlgorithms::lu`]:
//!
//! 1. **Driver** ([`lu_with_pivots_impl`]): validates the input, copies it into
//!    a private column-major buffer, runs the runtime's [`GetrfBackend`] and
//!    returns the packed L\U matrix (row-major) plus the pivot log.
//! 2. **Reconstructor** ([`plu_from_factors`]): splits the packed matrix,
//!    decodes the pivot log ([`permutation_indices`]) and builds `P`.
//!
//! # Module Structure
//!
//! - `decompositions`: result types
//! - `permutation`: pivot log decoding
//! - `traits`: `GetrfBackend` and `LuAlgorithms`
//! - `helpers`: validation utilities
//! - `lu`: generic driver and reconstructor shared by every runtime

pub mod decompositions;
pub mod helpers;
mod lu;
pub mod permutation;
pub mod traits;

pub use decompositions::{LuFactors, PluDecomposition};
pub use helpers::{pivot_dtype_for_width, validate_linalg_dtype, validate_lu_input};
pub use lu::{lu_impl, lu_with_pivots_impl, plu_from_factors};
pub use permutation::{PivotSwap, SwapLog, permutation_indices};
pub use traits::{GetrfBackend, LuAlgorithms};

//! # numr-plu
//!
//! **Explicit P, L, U factors from pivoted LU factorizations, on CPU and CUDA tensors.**
//!
//! A partial-pivoting LU factorization (`getrf`) returns a packed matrix and a
//! log of row swaps. This crate runs that factorization on whichever runtime
//! the tensor lives on and turns its output into three explicit matrices with
//! `A = P @ L @ U`.
//!
//! ## Quick Start
//!
//! ```
//! use numr_plu::prelude::*;
//!
//! let device = CpuDevice::new();
//! let client = CpuRuntime::default_client(&device);
//! let a = Tensor::<CpuRuntime>::from_slice(&[0.0f64, 1.0, 2.0, 3.0], &[2, 2], &device);
//!
//! let PluDecomposition { p, l, u } = client.lu(&a, false)?;
//! assert_eq!(p.shape(), &[2, 2]);
//! assert_eq!(l.to_vec::<f64>()?, vec![1.0, 0.0, 0.0, 1.0]);
//! assert_eq!(u.to_vec::<f64>()?, vec![2.0, 3.0, 0.0, 1.0]);
//! # Ok::<(), numr_plu::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): Multi-threaded trailing updates and matmul on CPU
//! - `cuda`: NVIDIA CUDA runtime
//! - `cusolver`: cuSOLVER `getrf` for CUDA tensors (implies `cuda`)
//! - `ilp64`: 64-bit pivot integers in the host `getrf`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithm;
pub mod dtype;
pub mod error;
pub mod ops;
pub mod runtime;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithm::linalg::{LuAlgorithms, LuFactors, PluDecomposition};
    pub use crate::dtype::DType;
    pub use crate::error::{Error, Result};
    pub use crate::ops::{IndexingOps, MatmulOps, TriangularOps, UtilityOps};
    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
    pub use crate::runtime::{Device, Runtime, RuntimeClient};
    pub use crate::tensor::{Layout, Tensor};

    #[cfg(feature = "cuda")]
    pub use crate::runtime::cuda::{CudaClient, CudaDevice, CudaRuntime};
}

/// Default runtime based on enabled features
///
/// - With `cuda` feature: `CudaRuntime`
/// - Otherwise: `CpuRuntime`
#[cfg(feature = "cuda")]
pub type DefaultRuntime = runtime::cuda::CudaRuntime;

/// Default runtime based on enabled features
#[cfg(not(feature = "cuda"))]
pub type DefaultRuntime = runtime::cpu::CpuRuntime;

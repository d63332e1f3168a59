//! CUDA runtime implementation
//!
//! Memory management and copies go through the cudarc driver API. Factoring
//! uses cuSOLVER (feature `cusolver`); the small auxiliary ops the
//! reconstruction needs stage through host memory and reuse the CPU kernels.

mod cache;
mod client;
mod device;
mod linalg;
mod runtime;

pub use crate::tensor::Tensor;
pub use client::CudaClient;
pub use device::CudaDevice;
pub use runtime::{CudaRuntime, is_cuda_available};

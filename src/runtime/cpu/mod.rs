//! CPU runtime implementation
//!
//! The CPU runtime uses standard heap allocation and hosts the native
//! `getrf` kernel. Memory is directly addressable, so pivot decoding and
//! strided copies run in place without staging.

mod client;
mod device;
pub(crate) mod kernels;
mod linalg;
mod runtime;

pub use crate::tensor::Tensor;
pub use client::CpuClient;
pub use device::CpuDevice;
pub use kernels::CpuPivotInt;
pub use runtime::CpuRuntime;

//! Runtime backends for tensor computation
//!
//! This module defines the `Runtime` trait and provides implementations
//! for the host (CPU) and, with the `cuda` feature, NVIDIA GPUs.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity, memory primitives)
//! ├── Device (identifies a specific GPU/CPU)
//! ├── DeviceKind (host vs accelerator, drives factorization dispatch)
//! └── Client (dispatches operations, owns stream/queue)
//! ```

pub mod cpu;
mod traits;

#[cfg(feature = "cuda")]
pub mod cuda;

// Host staging for operations the accelerator runtime does not run natively
#[cfg(feature = "cuda")]
pub(crate) mod fallback;

pub use traits::{Device, DeviceKind, Runtime, RuntimeClient};

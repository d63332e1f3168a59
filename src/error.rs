//! Error types for numr-plu

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using numr-plu's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while factorizing or reconstructing
#[derive(Error, Debug)]
pub enum Error {
    /// Unsupported dtype for an operation
    #[error("Unsupported dtype {dtype:?} for operation '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// Input is not a 2-D matrix
    #[error("Tensor must be 2D, but got {ndim}D")]
    InvalidRank {
        /// Number of dimensions of the offending tensor
        ndim: usize,
    },

    /// Input matrix is not square
    #[error("Tensor must be square, but got {rows} x {cols}")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// Input has a zero-length dimension
    #[error("Tensor shapes should not contain dimensions with zero, got {shape:?}")]
    EmptyDimension {
        /// Shape of the offending tensor
        shape: Vec<usize>,
    },

    /// The host backend's pivot integer has a width we cannot represent
    #[error("Unsupported pivot integer width: {bytes} bytes (expected 4 or 8)")]
    UnsupportedIntegerWidth {
        /// Width of the pivot integer type in bytes
        bytes: usize,
    },

    /// A device was requested whose factorization backend is not compiled in
    #[error("{backend} backend unavailable for '{operation}': rebuild with the `{feature}` feature")]
    BackendUnavailable {
        /// Backend name (e.g. "cuda")
        backend: &'static str,
        /// The operation being attempted
        operation: &'static str,
        /// Cargo feature that provides the backend
        feature: &'static str,
    },

    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Invalid dimension index
    #[error("Invalid dimension {dim} for tensor with {ndim} dimensions")]
    InvalidDimension {
        /// The invalid dimension
        dim: isize,
        /// Number of dimensions
        ndim: usize,
    },

    /// Index outside the dimension it selects from
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The offending index
        index: i64,
        /// Size of the indexed dimension
        size: usize,
    },

    /// DType mismatch between operands
    #[error("DType mismatch: {lhs:?} vs {rhs:?}")]
    DTypeMismatch {
        /// Left-hand side dtype
        lhs: DType,
        /// Right-hand side dtype
        rhs: DType,
    },

    /// Operands live on different devices
    #[error("Device mismatch: {lhs} vs {rhs}")]
    DeviceMismatch {
        /// Device of the first operand
        lhs: String,
        /// Device of the second operand
        rhs: String,
    },

    /// Out of memory
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },

    /// Tensor is not contiguous when contiguous memory is required
    #[error("Operation requires contiguous tensor")]
    NotContiguous,

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),

    /// CUDA driver error
    #[cfg(feature = "cuda")]
    #[error("CUDA error: {0}")]
    Cuda(#[from] cudarc::driver::DriverError),
}

impl Error {
    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create a backend-unavailable error
    pub fn backend_unavailable(
        backend: &'static str,
        operation: &'static str,
        feature: &'static str,
    ) -> Self {
        Self::BackendUnavailable {
            backend,
            operation,
            feature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err = Error::NotSquare { rows: 3, cols: 4 };
        assert_eq!(err.to_string(), "Tensor must be square, but got 3 x 4");

        let err = Error::InvalidRank { ndim: 1 };
        assert_eq!(err.to_string(), "Tensor must be 2D, but got 1D");

        let err = Error::UnsupportedIntegerWidth { bytes: 2 };
        assert!(err.to_string().contains("2 bytes"));
    }

    #[test]
    fn test_backend_unavailable_names_feature() {
        let err = Error::backend_unavailable("cuda", "getrf", "cusolver");
        let msg = err.to_string();
        assert!(msg.starts_with("cuda backend unavailable"));
        assert!(msg.contains("`cusolver`"));
    }
}

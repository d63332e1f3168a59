//! Validation helpers for the LU factorization paths

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Validate a factorization input and return its side length `n`.
///
/// Checks run in a fixed order, so each malformed input maps to exactly one
/// error: dtype, then rank, then squareness, then non-emptiness.
pub fn validate_lu_input<R: Runtime>(a: &Tensor<R>) -> Result<usize> {
    validate_linalg_dtype(a.dtype())?;

    let shape = a.shape();
    if shape.len() != 2 {
        return Err(Error::InvalidRank { ndim: shape.len() });
    }

    let (rows, cols) = (shape[0], shape[1]);
    if rows != cols {
        return Err(Error::NotSquare { rows, cols });
    }

    if rows == 0 {
        return Err(Error::EmptyDimension {
            shape: shape.to_vec(),
        });
    }

    Ok(rows)
}

/// Only `F32` and `F64` can be factorized
pub fn validate_linalg_dtype(dtype: DType) -> Result<()> {
    match dtype {
        DType::F32 | DType::F64 => Ok(()),
        _ => Err(Error::unsupported_dtype(dtype, "lu")),
    }
}

/// Pivot dtype for a backend whose pivot integer is `bytes` wide
pub fn pivot_dtype_for_width(bytes: usize) -> Result<DType> {
    match bytes {
        4 => Ok(DType::I32),
        8 => Ok(DType::I64),
        _ => Err(Error::UnsupportedIntegerWidth { bytes }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pivot_dtype_for_width() {
        assert_eq!(pivot_dtype_for_width(4).unwrap(), DType::I32);
        assert_eq!(pivot_dtype_for_width(8).unwrap(), DType::I64);
        assert!(matches!(
            pivot_dtype_for_width(2),
            Err(Error::UnsupportedIntegerWidth { bytes: 2 })
        ));
    }

    #[test]
    fn test_linalg_dtype() {
        assert!(validate_linalg_dtype(DType::F32).is_ok());
        assert!(validate_linalg_dtype(DType::F64).is_ok());
        assert!(matches!(
            validate_linalg_dtype(DType::I32),
            Err(Error::UnsupportedDType { dtype: DType::I32, .. })
        ));
    }
}

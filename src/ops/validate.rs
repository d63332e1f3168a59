//! Shape and dtype validation shared by every backend's ops

use crate::dtype::DType;
use crate::error::{Error, Result};

/// Output shape of `eye(n, m)`
#[inline]
pub fn validate_eye(n: usize, m: Option<usize>) -> (usize, usize) {
    (n, m.unwrap_or(n))
}

/// Output shape of `a @ b` for 2-D operands
pub fn validate_matmul_shapes(
    a_shape: &[usize],
    b_shape: &[usize],
    a_dtype: DType,
    b_dtype: DType,
) -> Result<[usize; 2]> {
    if a_dtype != b_dtype {
        return Err(Error::DTypeMismatch {
            lhs: a_dtype,
            rhs: b_dtype,
        });
    }
    if a_shape.len() != 2 {
        return Err(Error::InvalidRank {
            ndim: a_shape.len(),
        });
    }
    if b_shape.len() != 2 {
        return Err(Error::InvalidRank {
            ndim: b_shape.len(),
        });
    }
    if a_shape[1] != b_shape[0] {
        return Err(Error::shape_mismatch(&[a_shape[1], b_shape[1]], b_shape));
    }
    Ok([a_shape[0], b_shape[1]])
}

/// Validate `index_select` arguments, returning the output shape
///
/// Index values are checked separately by the backend that can read them.
pub fn validate_index_select(
    shape: &[usize],
    dim: usize,
    index_shape: &[usize],
    index_dtype: DType,
) -> Result<Vec<usize>> {
    if dim >= shape.len() {
        return Err(Error::InvalidDimension {
            dim: dim as isize,
            ndim: shape.len(),
        });
    }
    if index_dtype != DType::I64 {
        return Err(Error::DTypeMismatch {
            lhs: DType::I64,
            rhs: index_dtype,
        });
    }
    if index_shape.len() != 1 {
        return Err(Error::InvalidRank {
            ndim: index_shape.len(),
        });
    }

    let mut out_shape = shape.to_vec();
    out_shape[dim] = index_shape[0];
    Ok(out_shape)
}

/// Check every index lies in `0..size`
pub fn check_indices_in_bounds(indices: &[i64], size: usize) -> Result<()> {
    match indices.iter().find(|&&i| i < 0 || i as usize >= size) {
        Some(&index) => Err(Error::IndexOutOfBounds { index, size }),
        None => Ok(()),
    }
}

/// Side length of a square 2-D matrix
pub fn validate_square(shape: &[usize]) -> Result<usize> {
    match *shape {
        [rows, cols] if rows == cols => Ok(rows),
        [rows, cols] => Err(Error::NotSquare { rows, cols }),
        _ => Err(Error::InvalidRank { ndim: shape.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matmul_shapes() {
        assert_eq!(
            validate_matmul_shapes(&[2, 3], &[3, 4], DType::F32, DType::F32).unwrap(),
            [2, 4]
        );
        assert!(validate_matmul_shapes(&[2, 3], &[2, 4], DType::F32, DType::F32).is_err());
        assert!(validate_matmul_shapes(&[2, 3], &[3, 4], DType::F32, DType::F64).is_err());
    }

    #[test]
    fn test_index_select_shape() {
        let shape = validate_index_select(&[4, 5], 0, &[3], DType::I64).unwrap();
        assert_eq!(shape, vec![3, 5]);
        assert!(validate_index_select(&[4, 5], 2, &[3], DType::I64).is_err());
        assert!(validate_index_select(&[4, 5], 0, &[3], DType::I32).is_err());
    }

    #[test]
    fn test_indices_in_bounds() {
        assert!(check_indices_in_bounds(&[0, 2, 1], 3).is_ok());
        assert!(matches!(
            check_indices_in_bounds(&[0, 3], 3),
            Err(Error::IndexOutOfBounds { index: 3, size: 3 })
        ));
        assert!(check_indices_in_bounds(&[-1], 3).is_err());
    }

    #[test]
    fn test_validate_square() {
        assert_eq!(validate_square(&[3, 3]).unwrap(), 3);
        assert!(matches!(
            validate_square(&[3, 4]),
            Err(Error::NotSquare { rows: 3, cols: 4 })
        ));
        assert!(matches!(validate_square(&[3]), Err(Error::InvalidRank { ndim: 1 })));
    }
}

//! Native partial-pivoting LU factorization (`getrf`)
//!
//! Works on a column-major `n x n` buffer and writes LAPACK-style pivots:
//! `ipiv[k] = p + 1` means row `k` was swapped with row `p` at step `k`.
//! The unit-diagonal L and the upper U overwrite the buffer in place.

use crate::dtype::FloatElement;

/// Integer type the host `getrf` writes its pivot array in
///
/// 32-bit unless the `ilp64` feature selects the 64-bit interface.
#[cfg(not(feature = "ilp64"))]
pub type CpuPivotInt = i32;

/// Integer type the host `getrf` writes its pivot array in
#[cfg(feature = "ilp64")]
pub type CpuPivotInt = i64;

/// Factor a column-major `n x n` matrix in place with row pivoting.
///
/// Returns LAPACK's `info`: zero on success, or `k` (1-based) if `U[k-1, k-1]`
/// is exactly zero. A zero pivot does not stop the factorization; the column
/// below it is left unscaled, matching the reference behaviour.
///
/// # Safety
/// - `lu` must be valid for `n * n` reads and writes
/// - `ipiv` must be valid for `n` writes
/// - the two buffers must not overlap
pub unsafe fn getrf_kernel<T: FloatElement>(lu: *mut T, ipiv: *mut CpuPivotInt, n: usize) -> usize {
    let lu = unsafe { std::slice::from_raw_parts_mut(lu, n * n) };
    let ipiv = unsafe { std::slice::from_raw_parts_mut(ipiv, n) };

    let mut info = 0usize;

    for col in 0..n {
        let column = &lu[col * n..(col + 1) * n];

        let mut p = col;
        let mut best = column[col].abs_val();
        for (i, &v) in column.iter().enumerate().skip(col + 1) {
            let mag = v.abs_val();
            if mag > best {
                best = mag;
                p = i;
            }
        }
        ipiv[col] = (p + 1) as CpuPivotInt;

        if lu[col * n + p] != T::zero() {
            if p != col {
                for j in 0..n {
                    lu.swap(j * n + col, j * n + p);
                }
            }

            let pivot = lu[col * n + col];
            for v in &mut lu[col * n + col + 1..(col + 1) * n] {
                *v = *v / pivot;
            }
        } else if info == 0 {
            info = col + 1;
        }

        if col + 1 < n {
            let (head, tail) = lu.split_at_mut((col + 1) * n);
            let l_col = &head[col * n..];
            update_trailing(l_col, tail, col, n);
        }
    }

    info
}

/// Rank-1 update of the columns right of `col`: `A[i, j] -= L[i, col] * A[col, j]`
fn update_trailing<T: FloatElement>(l_col: &[T], tail: &mut [T], col: usize, n: usize) {
    let apply = |c: &mut [T]| {
        let f = c[col];
        if f == T::zero() {
            return;
        }
        for (v, &l) in c[col + 1..].iter_mut().zip(&l_col[col + 1..n]) {
            *v = *v - l * f;
        }
    };

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;

        if tail.len() >= super::PAR_MIN_LEN * n {
            tail.par_chunks_mut(n).for_each(apply);
            return;
        }
    }

    tail.chunks_mut(n).for_each(apply);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factor(col_major: &[f64], n: usize) -> (Vec<f64>, Vec<CpuPivotInt>, usize) {
        let mut lu = col_major.to_vec();
        let mut ipiv = vec![0 as CpuPivotInt; n];
        let info = unsafe { getrf_kernel(lu.as_mut_ptr(), ipiv.as_mut_ptr(), n) };
        (lu, ipiv, info)
    }

    #[test]
    fn test_getrf_2x2() {
        // [[1, 2], [3, 4]] stored by columns
        let (lu, ipiv, info) = factor(&[1.0, 3.0, 2.0, 4.0], 2);
        assert_eq!(info, 0);
        assert_eq!(ipiv, vec![2, 2]);

        let expected = [3.0, 1.0 / 3.0, 4.0, 2.0 / 3.0];
        for (a, b) in lu.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12, "{a} vs {b}");
        }
    }

    #[test]
    fn test_getrf_pivots_are_one_based_and_in_range() {
        let n = 5;
        let a: Vec<f64> = (0..n * n)
            .map(|k| ((k * 7 + 3) % 11) as f64 - 4.5)
            .collect();
        let (_, ipiv, _) = factor(&a, n);
        for (k, &p) in ipiv.iter().enumerate() {
            assert!(p as usize > k && p as usize <= n, "ipiv[{k}] = {p}");
        }
    }

    #[test]
    fn test_getrf_zero_matrix_reports_info() {
        let (lu, ipiv, info) = factor(&[0.0; 4], 2);
        assert_eq!(info, 1);
        assert_eq!(ipiv, vec![1, 2]);
        assert!(lu.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_getrf_identity_is_noop() {
        let (lu, ipiv, info) = factor(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0], 3);
        assert_eq!(info, 0);
        assert_eq!(ipiv, vec![1, 2, 3]);
        assert_eq!(lu, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_getrf_f32() {
        let mut lu = vec![4.0f32, 6.0, 3.0, 3.0];
        let mut ipiv = vec![0 as CpuPivotInt; 2];
        let info = unsafe { getrf_kernel(lu.as_mut_ptr(), ipiv.as_mut_ptr(), 2) };
        assert_eq!(info, 0);
        assert_eq!(ipiv, vec![2, 2]);
        assert!((lu[0] - 6.0).abs() < 1e-6);
    }
}

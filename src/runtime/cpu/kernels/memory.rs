//! Fill and split kernels

use crate::dtype::Element;

/// Write an `n x m` identity matrix (ones on the main diagonal).
///
/// # Safety
/// `out` must be valid for `n * m` writes.
#[inline]
pub unsafe fn eye_kernel<T: Element>(out: *mut T, n: usize, m: usize) {
    let out_slice = unsafe { std::slice::from_raw_parts_mut(out, n * m) };

    out_slice.fill(T::zero());

    let diag_len = n.min(m);
    for i in 0..diag_len {
        out_slice[i * m + i] = T::one();
    }
}

/// Split a packed row-major LU matrix into its unit-lower and upper halves.
///
/// Strictly-lower entries go to `lower` with ones on its diagonal; the
/// diagonal and everything above it go to `upper`. Remaining entries of
/// both outputs are zero.
///
/// # Safety
/// - `lu`, `lower`, `upper` must each be valid for `n * n` elements
/// - `lower` and `upper` must not overlap `lu` or each other
pub unsafe fn split_lu_kernel<T: Element>(lu: *const T, lower: *mut T, upper: *mut T, n: usize) {
    let lu = unsafe { std::slice::from_raw_parts(lu, n * n) };
    let lower = unsafe { std::slice::from_raw_parts_mut(lower, n * n) };
    let upper = unsafe { std::slice::from_raw_parts_mut(upper, n * n) };

    for (i, ((src, l_row), u_row)) in lu
        .chunks_exact(n)
        .zip(lower.chunks_exact_mut(n))
        .zip(upper.chunks_exact_mut(n))
        .enumerate()
    {
        for j in 0..n {
            let (l, u) = match j.cmp(&i) {
                std::cmp::Ordering::Less => (src[j], T::zero()),
                std::cmp::Ordering::Equal => (T::one(), src[j]),
                std::cmp::Ordering::Greater => (T::zero(), src[j]),
            };
            l_row[j] = l;
            u_row[j] = u;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_rectangular() {
        let mut out = vec![7.0f32; 6];
        unsafe { eye_kernel(out.as_mut_ptr(), 2, 3) };
        assert_eq!(out, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_split_lu() {
        let lu = [2.0f64, 3.0, 4.0, 0.5, 5.0, 6.0, 0.25, 0.75, 7.0];
        let mut lower = [0.0f64; 9];
        let mut upper = [0.0f64; 9];
        unsafe { split_lu_kernel(lu.as_ptr(), lower.as_mut_ptr(), upper.as_mut_ptr(), 3) };

        assert_eq!(lower, [1.0, 0.0, 0.0, 0.5, 1.0, 0.0, 0.25, 0.75, 1.0]);
        assert_eq!(upper, [2.0, 3.0, 4.0, 0.0, 5.0, 6.0, 0.0, 0.0, 7.0]);
    }
}

//! Matrix multiplication kernel

use crate::dtype::Element;

/// Matrix multiplication: C = A @ B
///
/// # Arguments
/// * `a` - Pointer to matrix A (m × k), row-major
/// * `b` - Pointer to matrix B (k × n), row-major
/// * `out` - Pointer to output matrix C (m × n), row-major
///
/// # Safety
/// - All pointers must be valid for the specified dimensions
/// - `out` must not alias with `a` or `b`
pub unsafe fn matmul_kernel<T: Element>(
    a: *const T,
    b: *const T,
    out: *mut T,
    m: usize,
    n: usize,
    k: usize,
) {
    let a = unsafe { std::slice::from_raw_parts(a, m * k) };
    let b = unsafe { std::slice::from_raw_parts(b, k * n) };
    let out = unsafe { std::slice::from_raw_parts_mut(out, m * n) };

    if n == 0 {
        return;
    }

    // i-k-j order keeps B and C accesses sequential
    let row = |(i, c_row): (usize, &mut [T])| {
        c_row.fill(T::zero());
        let a_row = &a[i * k..(i + 1) * k];
        for (kk, &a_ik) in a_row.iter().enumerate() {
            let b_row = &b[kk * n..(kk + 1) * n];
            for (c, &b_kj) in c_row.iter_mut().zip(b_row) {
                *c = *c + a_ik * b_kj;
            }
        }
    };

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;

        if m * n >= super::PAR_MIN_LEN * super::PAR_MIN_LEN {
            out.par_chunks_mut(n).enumerate().for_each(row);
            return;
        }
    }

    out.chunks_mut(n).enumerate().for_each(row);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matmul_2x3_3x2() {
        let a = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [7.0f64, 8.0, 9.0, 10.0, 11.0, 12.0];
        let mut c = [f64::NAN; 4];
        unsafe { matmul_kernel(a.as_ptr(), b.as_ptr(), c.as_mut_ptr(), 2, 2, 3) };
        assert_eq!(c, [58.0, 64.0, 139.0, 154.0]);
    }
}

//! Gather kernels

use crate::dtype::Element;

/// Select slices along dimension `dim` using an `i64` index list.
///
/// The tensor is viewed as `outer x dim_size x inner`; the output is
/// `outer x index_len x inner`.
///
/// # Safety
/// - `a` must be valid for the product of `shape`
/// - `indices` must be valid for `index_len` reads, each in `0..shape[dim]`
/// - `out` must be valid for `outer * index_len * inner` writes
#[inline]
pub unsafe fn index_select_kernel<T: Element>(
    a: *const T,
    indices: *const i64,
    out: *mut T,
    shape: &[usize],
    dim: usize,
    index_len: usize,
) {
    if shape.is_empty() {
        return;
    }

    let outer_size: usize = shape[..dim].iter().product();
    let dim_size = shape[dim];
    let inner_size: usize = shape[dim + 1..].iter().product();

    let indices = unsafe { std::slice::from_raw_parts(indices, index_len) };

    for outer in 0..outer_size {
        let src_base = outer * dim_size * inner_size;
        let dst_base = outer * index_len * inner_size;

        for (sel, &idx) in indices.iter().enumerate() {
            debug_assert!((idx as usize) < dim_size);
            unsafe {
                std::ptr::copy_nonoverlapping(
                    a.add(src_base + idx as usize * inner_size),
                    out.add(dst_base + sel * inner_size),
                    inner_size,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_select_rows() {
        let a = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let idx = [2i64, 0];
        let mut out = [0.0f64; 4];
        unsafe { index_select_kernel(a.as_ptr(), idx.as_ptr(), out.as_mut_ptr(), &[3, 2], 0, 2) };
        assert_eq!(out, [5.0, 6.0, 1.0, 2.0]);
    }

    #[test]
    fn test_index_select_columns() {
        let a = [1i32, 2, 3, 4, 5, 6];
        let idx = [1i64, 1, 0];
        let mut out = [0i32; 6];
        unsafe { index_select_kernel(a.as_ptr(), idx.as_ptr(), out.as_mut_ptr(), &[2, 3], 1, 3) };
        assert_eq!(out, [2, 2, 1, 5, 5, 4]);
    }
}

//! Core Tensor type

use super::{Layout, Storage};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use std::fmt;

/// N-dimensional array stored on a compute device
///
/// `Tensor` consists of:
/// - **Storage**: Reference-counted device memory
/// - **Layout**: Shape, strides, and offset defining the view into storage
/// - **DType**: Element type (determined at runtime)
///
/// # Zero-Copy Views
///
/// `transpose` and `clone` create tensors that share the same underlying
/// storage. Use [`Tensor::deep_copy`] when an independent buffer is required,
/// e.g. before handing it to an in-place kernel.
///
/// # Example
///
/// ```
/// use numr_plu::prelude::*;
///
/// let device = CpuDevice::new();
/// let a = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device);
/// let b = a.t().unwrap(); // Zero-copy, shares storage with a
/// assert_eq!(b.shape(), &[2, 2]);
/// ```
pub struct Tensor<R: Runtime> {
    storage: Storage<R>,
    layout: Layout,
}

impl<R: Runtime> Tensor<R> {
    /// Create a tensor from storage and layout
    pub fn from_parts(storage: Storage<R>, layout: Layout) -> Self {
        Self { storage, layout }
    }

    /// Create a tensor from a slice of data
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` does not equal the product of the `shape` dimensions.
    /// For a fallible alternative, use [`Self::try_from_slice`].
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize], device: &R::Device) -> Self {
        Self::try_from_slice(data, shape, device).expect("Tensor::from_slice failed")
    }

    /// Create a tensor from a slice of data (fallible version)
    ///
    /// Returns an error if `data.len()` does not equal the product of the `shape` dimensions,
    /// or if memory allocation fails.
    pub fn try_from_slice<T: Element>(
        data: &[T],
        shape: &[usize],
        device: &R::Device,
    ) -> Result<Self> {
        let expected_len: usize = shape.iter().product();
        if data.len() != expected_len {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }

        let storage = Storage::from_slice(data, device)?;
        Ok(Self::from_parts(storage, Layout::contiguous(shape)))
    }

    /// Create a zero-filled tensor
    ///
    /// # Panics
    ///
    /// Panics if allocation fails. For a fallible alternative, use [`Self::try_empty`].
    pub fn empty(shape: &[usize], dtype: DType, device: &R::Device) -> Self {
        Self::try_empty(shape, dtype, device).expect("Tensor::empty failed")
    }

    /// Create a zero-filled tensor (fallible version)
    ///
    /// Backends zero their allocations, so this is also the cheapest way to
    /// get a writable output buffer.
    pub fn try_empty(shape: &[usize], dtype: DType, device: &R::Device) -> Result<Self> {
        let len: usize = shape.iter().product();
        let storage = Storage::new(len, dtype, device)?;
        Ok(Self::from_parts(storage, Layout::contiguous(shape)))
    }

    // ===== Accessors =====

    /// Get the underlying storage
    #[inline]
    pub fn storage(&self) -> &Storage<R> {
        &self.storage
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.elem_count()
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Device the data lives on
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.storage.device()
    }

    /// Whether the view is row-major contiguous
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Get size along a dimension (supports negative indexing)
    pub fn size(&self, dim: isize) -> Option<usize> {
        self.layout.dim(dim)
    }

    /// Device address of the first viewed element
    #[inline]
    pub fn data_ptr(&self) -> u64 {
        self.storage.ptr() + (self.layout.offset() * self.dtype().size_in_bytes()) as u64
    }

    /// Whether two tensors view the same allocation
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        self.storage.same_allocation(&other.storage)
    }

    // ===== View Operations (Zero-Copy) =====

    /// Transpose two dimensions (zero-copy)
    pub fn transpose(&self, dim0: isize, dim1: isize) -> Result<Self> {
        let new_layout =
            self.layout
                .transpose(dim0, dim1)
                .ok_or_else(|| Error::InvalidDimension {
                    dim: dim0,
                    ndim: self.ndim(),
                })?;

        Ok(Self::from_parts(self.storage.clone(), new_layout))
    }

    /// Transpose last two dimensions (matrix transpose)
    pub fn t(&self) -> Result<Self> {
        self.transpose(-2, -1)
    }

    // ===== Copies =====

    /// Return a contiguous tensor with the same data
    ///
    /// If the tensor is already contiguous, returns a view (zero-copy).
    /// Otherwise, allocates new storage and copies through `Runtime::copy_strided`.
    pub fn contiguous(&self) -> Result<Self> {
        if self.is_contiguous() {
            Ok(self.clone())
        } else {
            self.deep_copy()
        }
    }

    /// Copy the viewed data into freshly allocated contiguous storage
    ///
    /// Unlike [`Tensor::contiguous`], this never aliases the source, even when
    /// the view already reads as contiguous (for example the transpose of a
    /// `1 x 1` matrix).
    pub fn deep_copy(&self) -> Result<Self> {
        let dtype = self.dtype();
        let device = self.storage.device();
        let new_storage = Storage::new(self.numel(), dtype, device)?;

        let elem_size = dtype.size_in_bytes();
        R::copy_strided(
            self.storage.ptr(),
            self.layout.offset() * elem_size,
            new_storage.ptr(),
            self.shape(),
            self.strides(),
            elem_size,
            device,
        )?;

        Ok(Self::from_parts(new_storage, Layout::contiguous(self.shape())))
    }

    /// Copy this tensor onto a device of another runtime
    ///
    /// Goes through host memory. Used to stage data for kernels that only
    /// exist on the other side.
    pub fn to_runtime<R2: Runtime>(&self, device: &R2::Device) -> Result<Tensor<R2>> {
        let src = self.contiguous()?;
        let mut bytes = vec![0u8; src.numel() * src.dtype().size_in_bytes()];
        R::copy_from_device(src.data_ptr(), &mut bytes, src.device())?;

        let storage = Storage::<R2>::from_bytes(&bytes, src.dtype(), device)?;
        Ok(Tensor::from_parts(storage, Layout::contiguous(src.shape())))
    }

    // ===== Data Access =====

    /// Copy tensor data to a Vec on the host, in row-major order
    ///
    /// `T` must be the element type of the tensor's dtype.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        if T::DTYPE != self.dtype() {
            return Err(Error::DTypeMismatch {
                lhs: self.dtype(),
                rhs: T::DTYPE,
            });
        }

        let src = self.contiguous()?;

        // Allocate as T so the host buffer is aligned for T, then view as bytes
        let mut result = vec![T::zeroed(); src.numel()];
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut result);
        R::copy_from_device(src.data_ptr(), bytes, src.device())?;
        Ok(result)
    }
}

impl<R: Runtime> Clone for Tensor<R> {
    /// Clone creates a new tensor sharing the same storage (zero-copy)
    fn clone(&self) -> Self {
        Self::from_parts(self.storage.clone(), self.layout.clone())
    }
}

impl<R: Runtime> fmt::Debug for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("runtime", &R::name())
            .field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .field("contiguous", &self.is_contiguous())
            .finish()
    }
}

impl<R: Runtime> fmt::Display for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor({:?}, dtype={})", self.shape(), self.dtype())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_from_slice_shape_mismatch() {
        let device = CpuDevice::new();
        let err = Tensor::<CpuRuntime>::try_from_slice(&[1.0f32, 2.0, 3.0], &[2, 2], &device)
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_transpose_then_contiguous() {
        let device = CpuDevice::new();
        let a = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3], &device);
        let t = a.t().unwrap();
        assert!(!t.is_contiguous());
        assert!(t.shares_storage_with(&a));

        let c = t.contiguous().unwrap();
        assert!(c.is_contiguous());
        assert!(!c.shares_storage_with(&a));
        assert_eq!(c.to_vec::<f64>().unwrap(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_deep_copy_never_aliases() {
        let device = CpuDevice::new();
        let a = Tensor::<CpuRuntime>::from_slice(&[5.0f32], &[1, 1], &device);
        let t = a.t().unwrap();
        assert!(t.is_contiguous());
        assert!(t.contiguous().unwrap().shares_storage_with(&a));

        let copy = t.deep_copy().unwrap();
        assert!(!copy.shares_storage_with(&a));
        assert_eq!(copy.to_vec::<f32>().unwrap(), vec![5.0]);
    }

    #[test]
    fn test_to_vec_rejects_other_dtype() {
        let device = CpuDevice::new();
        let a = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0], &[2], &device);
        assert!(matches!(
            a.to_vec::<f32>(),
            Err(Error::DTypeMismatch {
                lhs: DType::F64,
                rhs: DType::F32
            })
        ));

        // Same width, different element type
        let idx = Tensor::<CpuRuntime>::from_slice(&[1i64, 2], &[2], &device);
        assert!(matches!(
            idx.to_vec::<f64>(),
            Err(Error::DTypeMismatch {
                lhs: DType::I64,
                rhs: DType::F64
            })
        ));
        let b = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0], &[2], &device);
        assert!(matches!(
            b.to_vec::<i32>(),
            Err(Error::DTypeMismatch {
                lhs: DType::F32,
                rhs: DType::I32
            })
        ));
        assert_eq!(b.to_vec::<f32>().unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_to_runtime_cpu_to_cpu() {
        let device = CpuDevice::new();
        let a = Tensor::<CpuRuntime>::from_slice(&[1i32, 2, 3, 4], &[2, 2], &device);
        let b = a.t().unwrap().to_runtime::<CpuRuntime>(&device).unwrap();
        assert_eq!(b.dtype(), DType::I32);
        assert_eq!(b.to_vec::<i32>().unwrap(), vec![1, 3, 2, 4]);
    }
}

//! CPU runtime implementation

use super::client::CpuClient;
use super::device::CpuDevice;
use crate::error::{Error, Result};
use crate::runtime::{DeviceKind, Runtime};
use std::alloc::{Layout as AllocLayout, alloc_zeroed, dealloc};

/// Alignment for host buffers (AVX-512 friendly)
const HOST_ALIGN: usize = 64;

/// CPU compute runtime
///
/// This is the default runtime that works on any platform.
/// Memory is allocated on the heap using the system allocator.
#[derive(Clone, Debug, Default)]
pub struct CpuRuntime;

impl Runtime for CpuRuntime {
    type Device = CpuDevice;
    type Client = CpuClient;

    fn name() -> &'static str {
        "cpu"
    }

    fn device_kind() -> DeviceKind {
        DeviceKind::Host
    }

    fn allocate(size_bytes: usize, _device: &Self::Device) -> Result<u64> {
        if size_bytes == 0 {
            return Ok(0);
        }

        let layout = AllocLayout::from_size_align(size_bytes, HOST_ALIGN)
            .map_err(|_| Error::OutOfMemory { size: size_bytes })?;

        // SAFETY: layout has non-zero size.
        let ptr = unsafe { alloc_zeroed(layout) };

        if ptr.is_null() {
            return Err(Error::OutOfMemory { size: size_bytes });
        }

        Ok(ptr as u64)
    }

    fn deallocate(ptr: u64, size_bytes: usize, _device: &Self::Device) {
        if ptr == 0 || size_bytes == 0 {
            return;
        }

        // Same size/align pair that allocate() accepted
        if let Ok(layout) = AllocLayout::from_size_align(size_bytes, HOST_ALIGN) {
            // SAFETY: ptr came from allocate() with this layout.
            unsafe {
                dealloc(ptr as *mut u8, layout);
            }
        }
    }

    fn copy_to_device(src: &[u8], dst: u64, _device: &Self::Device) -> Result<()> {
        if src.is_empty() || dst == 0 {
            return Ok(());
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), dst as *mut u8, src.len());
        }
        Ok(())
    }

    fn copy_from_device(src: u64, dst: &mut [u8], _device: &Self::Device) -> Result<()> {
        if dst.is_empty() || src == 0 {
            return Ok(());
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src as *const u8, dst.as_mut_ptr(), dst.len());
        }
        Ok(())
    }

    fn copy_strided(
        src_handle: u64,
        src_byte_offset: usize,
        dst_handle: u64,
        shape: &[usize],
        strides: &[isize],
        elem_size: usize,
        _device: &Self::Device,
    ) -> Result<()> {
        if src_handle == 0 || dst_handle == 0 {
            return Ok(());
        }

        let numel: usize = shape.iter().product();
        if numel == 0 {
            return Ok(());
        }

        let src_base = (src_handle as usize + src_byte_offset) as *const u8;
        let dst_base = dst_handle as *mut u8;

        let mut indices = vec![0usize; shape.len()];

        for dst_offset in 0..numel {
            let src_elem_offset: isize = indices
                .iter()
                .zip(strides)
                .map(|(&idx, &stride)| idx as isize * stride)
                .sum();

            unsafe {
                std::ptr::copy_nonoverlapping(
                    src_base.offset(src_elem_offset * elem_size as isize),
                    dst_base.add(dst_offset * elem_size),
                    elem_size,
                );
            }

            // Increment indices (row-major order)
            for dim in (0..shape.len()).rev() {
                indices[dim] += 1;
                if indices[dim] < shape[dim] {
                    break;
                }
                indices[dim] = 0;
            }
        }
        Ok(())
    }

    fn default_device() -> Self::Device {
        CpuDevice::new()
    }

    fn default_client(device: &Self::Device) -> Self::Client {
        CpuClient::new(device.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_deallocate() {
        let device = CpuDevice::new();
        let ptr = CpuRuntime::allocate(1024, &device).unwrap();
        assert_ne!(ptr, 0);
        assert_eq!(ptr % HOST_ALIGN as u64, 0);
        CpuRuntime::deallocate(ptr, 1024, &device);
    }

    #[test]
    fn test_zero_allocation() {
        let device = CpuDevice::new();
        let ptr = CpuRuntime::allocate(0, &device).unwrap();
        assert_eq!(ptr, 0);
        CpuRuntime::deallocate(ptr, 0, &device);
    }

    #[test]
    fn test_copy_roundtrip() {
        let device = CpuDevice::new();
        let data: Vec<u8> = vec![1, 2, 3, 4, 5, 6, 7, 8];

        let ptr = CpuRuntime::allocate(data.len(), &device).unwrap();
        CpuRuntime::copy_to_device(&data, ptr, &device).unwrap();

        let mut result = vec![0u8; data.len()];
        CpuRuntime::copy_from_device(ptr, &mut result, &device).unwrap();
        assert_eq!(data, result);

        CpuRuntime::deallocate(ptr, data.len(), &device);
    }

    #[test]
    fn test_copy_strided_transposes() {
        let device = CpuDevice::new();
        // [[1, 2, 3], [4, 5, 6]] read through strides of its transpose
        let data = [1u8, 2, 3, 4, 5, 6];
        let src = CpuRuntime::allocate(6, &device).unwrap();
        let dst = CpuRuntime::allocate(6, &device).unwrap();
        CpuRuntime::copy_to_device(&data, src, &device).unwrap();

        CpuRuntime::copy_strided(src, 0, dst, &[3, 2], &[1, 3], 1, &device).unwrap();

        let mut out = [0u8; 6];
        CpuRuntime::copy_from_device(dst, &mut out, &device).unwrap();
        assert_eq!(out, [1, 4, 2, 5, 3, 6]);

        CpuRuntime::deallocate(src, 6, &device);
        CpuRuntime::deallocate(dst, 6, &device);
    }
}

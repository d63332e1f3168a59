//! CUDA runtime implementation

use super::cache::{get_or_create_client, is_cuda_context_valid, try_get_cached_stream};
use super::client::CudaClient;
use super::device::CudaDevice;
use crate::error::{Error, Result};
use crate::runtime::cpu::{CpuDevice, CpuRuntime};
use crate::runtime::{DeviceKind, Runtime};
use cudarc::driver::sys::{self, CUresult};

/// CUDA runtime
///
/// Memory is stream-ordered device memory from the driver API. The host
/// cannot dereference it, so factorization output is decoded after a copy.
#[derive(Clone, Debug, Default)]
pub struct CudaRuntime;

fn check(result: CUresult, what: &str, bytes: usize) -> Result<()> {
    if result == CUresult::CUDA_SUCCESS {
        Ok(())
    } else {
        Err(Error::Backend(format!(
            "CUDA {what} failed: {bytes} bytes ({result:?})"
        )))
    }
}

impl Runtime for CudaRuntime {
    type Device = CudaDevice;
    type Client = CudaClient;

    fn name() -> &'static str {
        "cuda"
    }

    fn device_kind() -> DeviceKind {
        DeviceKind::Accelerator
    }

    fn allocate(size_bytes: usize, device: &Self::Device) -> Result<u64> {
        if size_bytes == 0 {
            return Ok(0);
        }

        let client = get_or_create_client(device)?;
        client.context.bind_to_thread()?;

        let mut ptr: u64 = 0;
        let result = unsafe { sys::cuMemAllocAsync(&mut ptr, size_bytes, client.cu_stream()) };
        if result == CUresult::CUDA_SUCCESS {
            return Ok(ptr);
        }

        // Pending async frees may be holding memory; flush them and retry once
        client.try_synchronize()?;
        let result = unsafe { sys::cuMemAllocAsync(&mut ptr, size_bytes, client.cu_stream()) };
        if result == CUresult::CUDA_SUCCESS {
            return Ok(ptr);
        }

        log::warn!("cuda: allocation of {size_bytes} bytes failed ({result:?})");
        Err(Error::OutOfMemory { size: size_bytes })
    }

    fn deallocate(ptr: u64, _size_bytes: usize, device: &Self::Device) {
        if ptr == 0 {
            return;
        }

        unsafe {
            // Context already torn down: the driver reclaimed the memory
            if !is_cuda_context_valid() {
                return;
            }

            let result = match try_get_cached_stream(device.index) {
                Some(stream) => sys::cuMemFreeAsync(ptr, stream),
                None => sys::cuMemFree_v2(ptr),
            };

            if result != CUresult::CUDA_SUCCESS {
                log::error!("cuda: free of 0x{ptr:x} failed ({result:?})");
            }
        }
    }

    fn copy_to_device(src: &[u8], dst: u64, device: &Self::Device) -> Result<()> {
        if src.is_empty() || dst == 0 {
            return Ok(());
        }

        let client = get_or_create_client(device)?;
        client.context.bind_to_thread()?;

        let result = unsafe {
            sys::cuMemcpyHtoDAsync_v2(
                dst,
                src.as_ptr() as *const std::ffi::c_void,
                src.len(),
                client.cu_stream(),
            )
        };
        check(result, "host-to-device copy", src.len())?;

        // `src` may be dropped as soon as we return
        client.try_synchronize()
    }

    fn copy_from_device(src: u64, dst: &mut [u8], device: &Self::Device) -> Result<()> {
        if dst.is_empty() || src == 0 {
            return Ok(());
        }

        let client = get_or_create_client(device)?;
        client.context.bind_to_thread()?;

        let result = unsafe {
            sys::cuMemcpyDtoHAsync_v2(
                dst.as_mut_ptr() as *mut std::ffi::c_void,
                src,
                dst.len(),
                client.cu_stream(),
            )
        };
        check(result, "device-to-host copy", dst.len())?;

        client.try_synchronize()
    }

    /// Strided gather staged through host memory.
    ///
    /// Downloads the span of the source the view touches, gathers it with the
    /// host kernel, and uploads the contiguous result.
    fn copy_strided(
        src_handle: u64,
        src_byte_offset: usize,
        dst_handle: u64,
        shape: &[usize],
        strides: &[isize],
        elem_size: usize,
        device: &Self::Device,
    ) -> Result<()> {
        if src_handle == 0 || dst_handle == 0 {
            return Ok(());
        }

        let numel: usize = shape.iter().product();
        if numel == 0 {
            return Ok(());
        }

        // Views here only come from transposes, so strides are non-negative
        let last: isize = shape
            .iter()
            .zip(strides)
            .map(|(&d, &s)| (d as isize - 1) * s)
            .sum();
        let span_bytes = (last as usize + 1) * elem_size;

        let mut host_src = vec![0u8; span_bytes];
        Self::copy_from_device(src_handle + src_byte_offset as u64, &mut host_src, device)?;

        let mut host_dst = vec![0u8; numel * elem_size];
        CpuRuntime::copy_strided(
            host_src.as_ptr() as u64,
            0,
            host_dst.as_mut_ptr() as u64,
            shape,
            strides,
            elem_size,
            &CpuDevice::new(),
        )?;

        Self::copy_to_device(&host_dst, dst_handle, device)
    }

    fn default_device() -> Self::Device {
        CudaDevice::new(0)
    }

    /// # Panics
    ///
    /// Panics if no CUDA context can be created for `device`.
    fn default_client(device: &Self::Device) -> Self::Client {
        get_or_create_client(device).expect("failed to create CUDA client")
    }
}

/// Check if a CUDA device can be opened on this system
pub fn is_cuda_available() -> bool {
    get_or_create_client(&CudaDevice::new(0)).is_ok()
}

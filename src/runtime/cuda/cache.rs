//! Global client cache for CUDA runtime
//!
//! Every device gets exactly one cached client. Its stream is the ordering
//! point for all work on that device: allocations, host copies, frees and
//! cuSOLVER calls are enqueued on it, so stream order alone sequences a
//! buffer's allocation, fill, factorization and release. Code that runs
//! device work must fetch this client rather than use the stream of a
//! caller-supplied `CudaClient`.

use super::client::CudaClient;
use super::device::CudaDevice;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Device index -> client, so each GPU has one context and one ordering stream
static CLIENT_CACHE: OnceLock<Mutex<HashMap<usize, CudaClient>>> = OnceLock::new();

/// Check if the CUDA context on the current thread is valid.
///
/// # Safety
///
/// Calls the driver API directly; the answer only holds for this thread.
#[inline]
pub(super) unsafe fn is_cuda_context_valid() -> bool {
    let mut ctx: cudarc::driver::sys::CUcontext = std::ptr::null_mut();
    let result = unsafe { cudarc::driver::sys::cuCtxGetCurrent(&mut ctx) };
    result == cudarc::driver::sys::CUresult::CUDA_SUCCESS && !ctx.is_null()
}

/// Lock the cache, recovering from a poisoned mutex (inserts are idempotent)
#[inline]
fn lock_client_cache(
    cache: &Mutex<HashMap<usize, CudaClient>>,
) -> MutexGuard<'_, HashMap<usize, CudaClient>> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Get or create the cached client for a device
pub(super) fn get_or_create_client(device: &CudaDevice) -> Result<CudaClient> {
    let cache = CLIENT_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache_guard = lock_client_cache(cache);

    if let Some(client) = cache_guard.get(&device.index) {
        return Ok(client.clone());
    }

    let client = CudaClient::new(device.clone())?;
    log::debug!("cuda: created client for device {}", device.index);
    cache_guard.insert(device.index, client.clone());

    Ok(client)
}

/// Stream of an already-cached client, without creating one
///
/// Used on free paths, which must not create a client during teardown.
#[inline]
pub(super) fn try_get_cached_stream(device_index: usize) -> Option<cudarc::driver::sys::CUstream> {
    let cache = CLIENT_CACHE.get()?;
    let guard = lock_client_cache(cache);
    guard.get(&device_index).map(|client| client.cu_stream())
}

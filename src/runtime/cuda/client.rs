//! CUDA client implementation
//!
//! `CudaClient` owns a context and a stream. Clones share both through `Arc`.
//! Allocation, copies, frees and solver calls for a device are issued on the
//! stream of that device's cached client, so they stay ordered no matter which
//! client handle the caller holds.

use cudarc::driver::safe::{CudaContext, CudaStream};
use std::sync::Arc;

use super::CudaRuntime;
use super::device::CudaDevice;
use crate::error::Result;
use crate::runtime::RuntimeClient;

/// CUDA runtime client
#[derive(Clone)]
pub struct CudaClient {
    pub(crate) device: CudaDevice,
    pub(crate) context: Arc<CudaContext>,
    pub(crate) stream: Arc<CudaStream>,
}

impl CudaClient {
    /// Create a client with a fresh stream on `device`
    ///
    /// Memory and solver work still runs on the device's cached stream (see
    /// [`CudaRuntime::default_client`](crate::runtime::Runtime::default_client)),
    /// so tensors created through any client can be mixed freely.
    pub fn new(device: CudaDevice) -> Result<Self> {
        let context = CudaContext::new(device.index)?;
        let stream = context.new_stream()?;

        Ok(Self {
            device,
            context,
            stream,
        })
    }

    /// Raw stream handle for driver and library calls
    #[inline]
    pub(crate) fn cu_stream(&self) -> cudarc::driver::sys::CUstream {
        self.stream.cu_stream()
    }

    /// Block until all work on the stream has finished
    pub fn try_synchronize(&self) -> Result<()> {
        self.context.bind_to_thread()?;
        self.stream.synchronize()?;
        Ok(())
    }
}

impl std::fmt::Debug for CudaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CudaClient")
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl RuntimeClient<CudaRuntime> for CudaClient {
    fn device(&self) -> &CudaDevice {
        &self.device
    }

    fn synchronize(&self) {
        if let Err(e) = self.try_synchronize() {
            log::error!("cuda: stream synchronize failed on {:?}: {e}", self.device);
        }
    }
}

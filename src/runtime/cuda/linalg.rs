//! LU factorization for the CUDA client
//!
//! `getrf` runs through cuSOLVER when the `cusolver` feature is enabled.
//! Without it, CUDA tensors can still be created and copied but factoring
//! them fails with `BackendUnavailable`.

use super::{CudaClient, CudaRuntime};
use crate::algorithm::linalg::{
    GetrfBackend, LuAlgorithms, LuFactors, PluDecomposition, lu_impl, lu_with_pivots_impl,
};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::tensor::Tensor;

impl GetrfBackend<CudaRuntime> for CudaClient {
    /// cuSOLVER's dense `getrf` only has a 32-bit pivot interface
    fn pivot_dtype(&self) -> Result<DType> {
        Ok(DType::I32)
    }

    #[cfg(feature = "cusolver")]
    fn getrf(
        &self,
        buffer: &Tensor<CudaRuntime>,
        pivots: &Tensor<CudaRuntime>,
        n: usize,
    ) -> Result<()> {
        if !buffer.is_contiguous() {
            return Err(Error::NotContiguous);
        }
        if buffer.shape() != [n, n] {
            return Err(Error::shape_mismatch(&[n, n], buffer.shape()));
        }
        if pivots.dtype() != DType::I32 {
            return Err(Error::DTypeMismatch {
                lhs: DType::I32,
                rhs: pivots.dtype(),
            });
        }
        if pivots.numel() != n {
            return Err(Error::shape_mismatch(&[n], pivots.shape()));
        }

        cusolver::getrf(self, buffer, pivots, n)
    }

    #[cfg(not(feature = "cusolver"))]
    fn getrf(
        &self,
        _buffer: &Tensor<CudaRuntime>,
        _pivots: &Tensor<CudaRuntime>,
        n: usize,
    ) -> Result<()> {
        log::warn!(
            "cuda: getrf requested for a {n}x{n} matrix but cuSOLVER support is not compiled in"
        );
        Err(Error::backend_unavailable("cuda", "getrf", "cusolver"))
    }
}

impl LuAlgorithms<CudaRuntime> for CudaClient {
    fn lu_with_pivots(&self, a: &Tensor<CudaRuntime>) -> Result<LuFactors<CudaRuntime>> {
        lu_with_pivots_impl(self, a)
    }

    fn lu(
        &self,
        a: &Tensor<CudaRuntime>,
        permute_l: bool,
    ) -> Result<PluDecomposition<CudaRuntime>> {
        lu_impl(self, a, permute_l)
    }
}

#[cfg(feature = "cusolver")]
mod cusolver {
    use super::super::cache::get_or_create_client;
    use super::super::{CudaClient, CudaRuntime};
    use crate::dtype::DType;
    use crate::error::{Error, Result};
    use crate::runtime::Runtime;
    use crate::tensor::Tensor;
    use cudarc::cusolver::sys::{self, cusolverDnHandle_t, cusolverStatus_t};

    fn check(status: cusolverStatus_t, what: &str) -> Result<()> {
        if status == cusolverStatus_t::CUSOLVER_STATUS_SUCCESS {
            Ok(())
        } else {
            Err(Error::Backend(format!("cuSOLVER {what} failed ({status:?})")))
        }
    }

    /// Dense solver handle bound to a client's stream, destroyed on drop
    struct DnHandle(cusolverDnHandle_t);

    impl DnHandle {
        fn new(client: &CudaClient) -> Result<Self> {
            let mut handle: cusolverDnHandle_t = std::ptr::null_mut();
            check(unsafe { sys::cusolverDnCreate(&mut handle) }, "create")?;
            let handle = Self(handle);
            check(
                unsafe { sys::cusolverDnSetStream(handle.0, client.cu_stream() as _) },
                "set stream",
            )?;
            Ok(handle)
        }
    }

    impl Drop for DnHandle {
        fn drop(&mut self) {
            let status = unsafe { sys::cusolverDnDestroy(self.0) };
            if status != cusolverStatus_t::CUSOLVER_STATUS_SUCCESS {
                log::error!("cuSOLVER destroy failed ({status:?})");
            }
        }
    }

    /// Device scratch buffer freed on drop
    struct Scratch<'a> {
        ptr: u64,
        bytes: usize,
        client: &'a CudaClient,
    }

    impl<'a> Scratch<'a> {
        fn new(client: &'a CudaClient, bytes: usize) -> Result<Self> {
            let ptr = CudaRuntime::allocate(bytes, &client.device)?;
            Ok(Self { ptr, bytes, client })
        }
    }

    impl Drop for Scratch<'_> {
        fn drop(&mut self) {
            CudaRuntime::deallocate(self.ptr, self.bytes, &self.client.device);
        }
    }

    macro_rules! run_getrf {
        ($handle:expr, $client:expr, $a:expr, $ipiv:expr, $n:expr, $T:ty, $size_fn:ident, $getrf_fn:ident) => {{
            let a = $a as *mut $T;
            let mut lwork: i32 = 0;
            check(
                unsafe { sys::$size_fn($handle, $n, $n, a, $n, &mut lwork) },
                "getrf workspace query",
            )?;

            let work = Scratch::new($client, (lwork.max(1) as usize) * std::mem::size_of::<$T>())?;
            let info = Scratch::new($client, std::mem::size_of::<i32>())?;

            check(
                unsafe {
                    sys::$getrf_fn(
                        $handle,
                        $n,
                        $n,
                        a,
                        $n,
                        work.ptr as *mut $T,
                        $ipiv,
                        info.ptr as *mut i32,
                    )
                },
                "getrf",
            )?;
            $client.try_synchronize()?;

            let mut host_info = [0u8; 4];
            CudaRuntime::copy_from_device(info.ptr, &mut host_info, &$client.device)?;
            i32::from_ne_bytes(host_info)
        }};
    }

    pub(super) fn getrf(
        client: &CudaClient,
        buffer: &Tensor<CudaRuntime>,
        pivots: &Tensor<CudaRuntime>,
        n: usize,
    ) -> Result<()> {
        let n_i32 = i32::try_from(n)
            .map_err(|_| Error::Backend(format!("matrix of order {n} exceeds cuSOLVER's 32-bit interface")))?;

        // The buffers were allocated and filled on the device's cached stream,
        // which need not be the stream of the client passed in
        let stream_client = get_or_create_client(&client.device)?;
        stream_client.context.bind_to_thread()?;
        let handle = DnHandle::new(&stream_client)?;
        let a_ptr = buffer.data_ptr();
        let ipiv = pivots.data_ptr() as *mut i32;

        let info = match buffer.dtype() {
            DType::F32 => run_getrf!(
                handle.0, &stream_client, a_ptr, ipiv, n_i32, f32,
                cusolverDnSgetrf_bufferSize, cusolverDnSgetrf
            ),
            DType::F64 => run_getrf!(
                handle.0, &stream_client, a_ptr, ipiv, n_i32, f64,
                cusolverDnDgetrf_bufferSize, cusolverDnDgetrf
            ),
            other => return Err(Error::unsupported_dtype(other, "getrf")),
        };

        if info < 0 {
            return Err(Error::Backend(format!(
                "cuSOLVER getrf rejected argument {}",
                -info
            )));
        }
        if info > 0 {
            log::debug!("getrf: exact zero pivot at U[{0}, {0}], matrix is singular", info - 1);
        }

        Ok(())
    }
}

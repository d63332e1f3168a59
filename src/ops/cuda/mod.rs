//! CUDA implementations of the operation traits
//!
//! Each op stages its operands through host memory and runs the CPU kernel
//! (see `runtime::fallback`). The matrices involved are the `n x n` outputs of
//! one factorization, so the copies are the same order of work as the op.

use crate::dtype::DType;
use crate::error::Result;
use crate::ops::{IndexingOps, MatmulOps, TriangularOps, UtilityOps};
use crate::runtime::cuda::{CudaClient, CudaRuntime};
use crate::runtime::fallback::{host_op, host_op2};
use crate::tensor::Tensor;

impl UtilityOps<CudaRuntime> for CudaClient {
    fn eye(&self, n: usize, m: Option<usize>, dtype: DType) -> Result<Tensor<CudaRuntime>> {
        host_op(&self.device, |ctx| ctx.client.eye(n, m, dtype))
    }
}

impl IndexingOps<CudaRuntime> for CudaClient {
    fn index_select(
        &self,
        a: &Tensor<CudaRuntime>,
        dim: usize,
        index: &Tensor<CudaRuntime>,
    ) -> Result<Tensor<CudaRuntime>> {
        host_op(&self.device, |ctx| {
            ctx.client
                .index_select(&ctx.to_host(a)?, dim, &ctx.to_host(index)?)
        })
    }
}

impl MatmulOps<CudaRuntime> for CudaClient {
    fn matmul(
        &self,
        a: &Tensor<CudaRuntime>,
        b: &Tensor<CudaRuntime>,
    ) -> Result<Tensor<CudaRuntime>> {
        host_op(&self.device, |ctx| {
            ctx.client.matmul(&ctx.to_host(a)?, &ctx.to_host(b)?)
        })
    }
}

impl TriangularOps<CudaRuntime> for CudaClient {
    fn split_lu(
        &self,
        lu: &Tensor<CudaRuntime>,
    ) -> Result<(Tensor<CudaRuntime>, Tensor<CudaRuntime>)> {
        host_op2(&self.device, |ctx| ctx.client.split_lu(&ctx.to_host(lu)?))
    }
}

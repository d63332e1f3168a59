//! Common test utilities
#![allow(dead_code)]

use numr_plu::dtype::DType;
use numr_plu::runtime::Runtime;
use numr_plu::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
#[cfg(feature = "cuda")]
use numr_plu::runtime::cuda::{CudaClient, CudaDevice, CudaRuntime};
use numr_plu::tensor::Tensor;

/// Route `log` output through the test harness (`RUST_LOG=debug cargo test`)
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    init_logger();
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// Create a CUDA client and device, returning None if CUDA is unavailable
#[cfg(feature = "cuda")]
pub fn create_cuda_client() -> Option<(CudaClient, CudaDevice)> {
    init_logger();
    if !numr_plu::runtime::cuda::is_cuda_available() {
        return None;
    }
    let device = CudaDevice::new(0);
    let client = CudaRuntime::default_client(&device);
    Some((client, device))
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Assert two f32 slices are close within tolerance
pub fn assert_allclose_f32(a: &[f32], b: &[f32], rtol: f32, atol: f32, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Reference row-major matmul of two `n x n` matrices
pub fn matmul_ref(a: &[f64], b: &[f64], n: usize) -> Vec<f64> {
    let mut out = vec![0.0; n * n];
    for i in 0..n {
        for k in 0..n {
            let a_ik = a[i * n + k];
            for j in 0..n {
                out[i * n + j] += a_ik * b[k * n + j];
            }
        }
    }
    out
}

/// Transpose a row-major `n x n` matrix
pub fn transpose_ref(a: &[f64], n: usize) -> Vec<f64> {
    let mut out = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            out[j * n + i] = a[i * n + j];
        }
    }
    out
}

/// Read a pivot tensor of either integer width as i64
pub fn pivots_as_i64<R: Runtime>(pivots: &Tensor<R>) -> Vec<i64> {
    match pivots.dtype() {
        DType::I32 => pivots
            .to_vec::<i32>()
            .unwrap()
            .into_iter()
            .map(i64::from)
            .collect(),
        DType::I64 => pivots.to_vec::<i64>().unwrap(),
        other => panic!("unexpected pivot dtype {other}"),
    }
}

/// Deterministic test matrices, row-major, with their orders
///
/// Includes cases that need pivoting at every step, a zero leading entry and
/// a rank-deficient matrix.
pub fn test_matrices() -> Vec<(usize, Vec<f64>)> {
    let mut cases = vec![
        (1, vec![-3.5]),
        (2, vec![0.0, 1.0, 2.0, 3.0]),
        (3, vec![2.0, 1.0, 1.0, 4.0, -6.0, 0.0, -2.0, 7.0, 2.0]),
        // Pivots [3, 3, 3]
        (3, vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0, 0.0]),
        (3, vec![1.0, 2.0, 3.0, 2.0, 5.0, 4.0, 8.0, 3.0, 1.0]),
        // Rank 2
        (3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]),
    ];

    for n in [4usize, 6, 9] {
        let a = (0..n * n)
            .map(|k| {
                let (i, j) = (k / n, k % n);
                ((i * 7 + j * 3 + 1) % 11) as f64 - 5.0 + if i == j { 0.5 } else { 0.0 }
            })
            .collect();
        cases.push((n, a));
    }

    cases
}

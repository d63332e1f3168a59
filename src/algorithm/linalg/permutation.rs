//! Decoding LAPACK pivot arrays into row permutations
//!
//! `getrf` does not return a permutation. It returns a log of row exchanges
//! performed in order: at step `i`, row `i` was swapped with row `ipiv[i] - 1`.
//! Later swaps act on rows already moved by earlier ones, so the log has to be
//! replayed in order; looking entries up independently gives the wrong answer.

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// One entry of a pivot log, 0-based
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PivotSwap {
    /// Step index; the row being pivoted
    pub row: usize,
    /// Row it was exchanged with
    pub with: usize,
}

/// Ordered row exchanges recorded by a pivoted factorization
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwapLog {
    /// Exchanges in the order they were applied
    pub swaps: Vec<PivotSwap>,
}

impl SwapLog {
    /// Build the log from 1-based LAPACK pivots.
    ///
    /// Entries must lie in `1..=pivots.len()`. This is not checked in release
    /// builds; replaying an out-of-range entry panics on the slice bound.
    pub fn from_pivots(pivots: &[i64]) -> Self {
        let n = pivots.len();
        let swaps = pivots
            .iter()
            .enumerate()
            .map(|(row, &p)| {
                debug_assert!(
                    p >= 1 && p as usize <= n,
                    "pivot {p} at step {row} outside 1..={n}"
                );
                PivotSwap {
                    row,
                    with: (p as usize).wrapping_sub(1),
                }
            })
            .collect();
        Self { swaps }
    }

    /// Number of exchanges that actually moved a row
    pub fn num_transpositions(&self) -> usize {
        self.swaps.iter().filter(|s| s.row != s.with).count()
    }

    /// Replay the log over `[0, 1, .., n-1]`.
    ///
    /// Entry `j` of the result is the original row that ends up at position `j`.
    pub fn replay(&self, n: usize) -> Vec<i64> {
        let mut full: Vec<i64> = (0..n as i64).collect();
        for swap in &self.swaps {
            full.swap(swap.row, swap.with);
        }
        full
    }
}

/// Decode a pivot tensor into the full row permutation.
///
/// The pivots are read back to the host (for accelerator tensors this
/// synchronizes), replayed, and the result is uploaded as an `I64` tensor of
/// length `n` on the pivots' device. `pivots` must be 1-D of length `n`.
pub fn permutation_indices<R: Runtime>(pivots: &Tensor<R>, n: usize) -> Result<Tensor<R>> {
    if pivots.ndim() != 1 || pivots.numel() != n {
        return Err(Error::shape_mismatch(&[n], pivots.shape()));
    }

    let host: Vec<i64> = match pivots.dtype() {
        DType::I32 => pivots
            .to_vec::<i32>()?
            .into_iter()
            .map(i64::from)
            .collect(),
        DType::I64 => pivots.to_vec::<i64>()?,
        other => return Err(Error::unsupported_dtype(other, "permutation_indices")),
    };

    let full = SwapLog::from_pivots(&host).replay(n);
    log::trace!("pivots {host:?} -> row permutation {full:?}");

    Tensor::<R>::try_from_slice(&full, &[n], pivots.device())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_replay_is_sequential() {
        assert_eq!(SwapLog::from_pivots(&[2, 2, 3]).replay(3), vec![1, 0, 2]);
        assert_eq!(SwapLog::from_pivots(&[3, 3, 3]).replay(3), vec![2, 0, 1]);
    }

    #[test]
    fn test_identity_log() {
        let log = SwapLog::from_pivots(&[1, 2, 3, 4]);
        assert_eq!(log.num_transpositions(), 0);
        assert_eq!(log.replay(4), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_from_pivots_is_zero_based() {
        let log = SwapLog::from_pivots(&[2, 2]);
        assert_eq!(
            log.swaps,
            vec![PivotSwap { row: 0, with: 1 }, PivotSwap { row: 1, with: 1 }]
        );
        assert_eq!(log.num_transpositions(), 1);
    }

    #[test]
    fn test_replay_yields_a_permutation() {
        let full = SwapLog::from_pivots(&[4, 3, 4, 4, 5]).replay(5);
        let mut sorted = full.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_permutation_indices_accepts_i32_and_i64() {
        let device = CpuDevice::new();
        let p32 = Tensor::<CpuRuntime>::from_slice(&[3i32, 3, 3], &[3], &device);
        let p64 = Tensor::<CpuRuntime>::from_slice(&[3i64, 3, 3], &[3], &device);

        for pivots in [p32, p64] {
            let full = permutation_indices(&pivots, 3).unwrap();
            assert_eq!(full.dtype(), DType::I64);
            assert_eq!(full.to_vec::<i64>().unwrap(), vec![2, 0, 1]);
        }
    }

    #[test]
    fn test_permutation_indices_rejects_length_mismatch() {
        let device = CpuDevice::new();
        let pivots = Tensor::<CpuRuntime>::from_slice(&[3i32, 3, 3], &[3], &device);

        for n in [2, 4] {
            assert!(matches!(
                permutation_indices(&pivots, n),
                Err(Error::ShapeMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_permutation_indices_rejects_matrix_pivots() {
        let device = CpuDevice::new();
        let pivots = Tensor::<CpuRuntime>::from_slice(&[1i64, 2, 2, 2], &[2, 2], &device);
        assert!(matches!(
            permutation_indices(&pivots, 4),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_permutation_indices_rejects_float_pivots() {
        let device = CpuDevice::new();
        let pivots = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0], &[2], &device);
        assert!(matches!(
            permutation_indices(&pivots, 2),
            Err(Error::UnsupportedDType { dtype: DType::F32, .. })
        ));
    }
}

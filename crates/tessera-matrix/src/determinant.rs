//! Determinants.
//!
//! Small matrices use closed-form cofactor expansion. Larger ones use the
//! fraction-free Gauss-Bareiss algorithm when the scalar type has division
//! with remainder, and full permutation expansion when it is only a ring.
//!
//! # Bareiss
//!
//! Step k replaces every trailing entry with
//!
//! ```text
//! a[i][j] = (a[k][k] * a[i][j] - a[i][k] * a[k][j]) / p
//! ```
//!
//! where `p` is the previous pivot. By Sylvester's identity the division is
//! exact, so a non-zero remainder means the scalar type broke the contract;
//! the computation then restarts with permutation expansion instead of
//! returning a truncated value.

use tracing::{debug, warn};

use tessera_rings::{DivisionError, EuclideanOps, Ring};

use crate::dense_matrix::DenseMatrix;
use crate::error::MatrixError;

/// Tuning for [`DenseMatrix::det_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeterminantConfig {
    /// Largest size computed by closed-form expansion. Values above 3 are
    /// treated as 3.
    pub closed_form_limit: usize,
    /// Sizes above this log a warning before permutation expansion.
    pub expansion_warn_limit: usize,
}

impl Default for DeterminantConfig {
    fn default() -> Self {
        Self {
            closed_form_limit: 3,
            expansion_warn_limit: 9,
        }
    }
}

impl<R: Ring> DenseMatrix<R> {
    /// Computes the determinant.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices.
    pub fn det(&self) -> Result<R, MatrixError> {
        self.det_with(&DeterminantConfig::default())
    }

    /// Computes the determinant with explicit tuning.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices.
    pub fn det_with(&self, config: &DeterminantConfig) -> Result<R, MatrixError> {
        let n = self.require_square("det")?;
        if n <= config.closed_form_limit.min(3) {
            return Ok(det_closed_form(self));
        }

        let capability = R::capability();
        match capability.euclidean() {
            Some(ops) => match bareiss(self, ops) {
                Ok(d) => Ok(d),
                Err(err) => {
                    debug!(size = n, %err, "bareiss division not exact, using permutation expansion");
                    Ok(det_by_expansion(self, config.expansion_warn_limit))
                }
            },
            None => {
                debug!(size = n, capability = capability.name(), "no division available, using permutation expansion");
                Ok(det_by_expansion(self, config.expansion_warn_limit))
            }
        }
    }

    /// Computes the determinant by full permutation expansion.
    ///
    /// Uses only ring operations and costs O(n * n!).
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices.
    pub fn det_slow(&self) -> Result<R, MatrixError> {
        self.require_square("det_slow")?;
        Ok(det_by_expansion(self, DeterminantConfig::default().expansion_warn_limit))
    }
}

fn det_closed_form<R: Ring>(m: &DenseMatrix<R>) -> R {
    let a = |i: usize, j: usize| m[(i, j)].clone();
    match m.num_rows() {
        1 => a(0, 0),
        2 => a(0, 0) * a(1, 1) - a(0, 1) * a(1, 0),
        _ => {
            let m0 = a(0, 0) * (a(1, 1) * a(2, 2) - a(1, 2) * a(2, 1));
            let m1 = a(0, 1) * (a(1, 2) * a(2, 0) - a(1, 0) * a(2, 2));
            let m2 = a(0, 2) * (a(1, 0) * a(2, 1) - a(1, 1) * a(2, 0));
            m0 + m1 + m2
        }
    }
}

pub(crate) fn bareiss<R: Ring>(m: &DenseMatrix<R>, ops: EuclideanOps<R>) -> Result<R, DivisionError> {
    let n = m.num_rows();
    let mut a = m.clone();
    let mut prev = (ops.one)();
    let mut negate = false;

    for k in 0..n - 1 {
        if a[(k, k)].is_zero() {
            let Some(swap) = (k + 1..n).find(|&i| !a[(i, k)].is_zero()) else {
                return Ok(R::zero());
            };
            a.swap_rows_raw(k, swap, k..n);
            negate = !negate;
        }

        let pivot = a[(k, k)].clone();
        for i in k + 1..n {
            for j in k + 1..n {
                let cross = pivot.clone() * a[(i, j)].clone() - a[(i, k)].clone() * a[(k, j)].clone();
                a[(i, j)] = ops.divide_exact(&cross, &prev)?;
            }
        }
        prev = pivot;
    }

    let d = a[(n - 1, n - 1)].clone();
    Ok(if negate { -d } else { d })
}

/// Leibniz expansion, enumerating permutations with Heap's algorithm so that
/// consecutive permutations differ by one transposition.
fn det_by_expansion<R: Ring>(m: &DenseMatrix<R>, warn_limit: usize) -> R {
    let n = m.num_rows();
    if n > warn_limit {
        warn!(size = n, limit = warn_limit, "permutation expansion on a large matrix");
    }

    let term = |perm: &[usize]| -> R {
        let mut product = m[(0, perm[0])].clone();
        for (row, &col) in perm.iter().enumerate().skip(1) {
            if product.is_zero() {
                break;
            }
            product = product * m[(row, col)].clone();
        }
        product
    };

    let mut perm: Vec<usize> = (0..n).collect();
    let mut counters = vec![0usize; n];
    let mut positive = true;
    let mut total = term(&perm);

    let mut i = 1;
    while i < n {
        if counters[i] < i {
            if i % 2 == 0 {
                perm.swap(0, i);
            } else {
                perm.swap(counters[i], i);
            }
            positive = !positive;

            let t = term(&perm);
            total = if positive { total + t } else { total - t };

            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }

    total
}

//! Reduction to upper-Hessenberg form by similarity transforms.

use tracing::trace;

use tessera_rings::Field;

use crate::dense_matrix::DenseMatrix;
use crate::error::MatrixError;

impl<F: Field> DenseMatrix<F> {
    /// Returns a matrix similar to `self` with zeros below the sub-diagonal.
    ///
    /// Every step is a row operation followed by the inverse column
    /// operation, so the characteristic polynomial is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices.
    pub fn to_upper_hessenberg(&self) -> Result<Self, MatrixError> {
        let n = self.require_square("to_upper_hessenberg")?;
        let mut a = self.clone();

        for m in 0..n.saturating_sub(2) {
            let Some(found) = (m + 1..n).find(|&i| !a[(i, m)].is_zero()) else {
                continue;
            };
            if found != m + 1 {
                trace!(column = m, row = found, "swapping pivot onto sub-diagonal");
                a.swap_rows_raw(found, m + 1, 0..n);
                a.swap_cols_raw(found, m + 1, 0..n);
            }

            let Some(pivot_inv) = a[(m + 1, m)].inv() else {
                continue;
            };
            for i in m + 2..n {
                if a[(i, m)].is_zero() {
                    continue;
                }
                let u = a[(i, m)].clone() * pivot_inv.clone();
                a.add_scaled_row_raw(i, m + 1, &-u.clone(), 0..n);
                a.add_scaled_col_raw(m + 1, i, &u, 0..n);
            }
        }

        Ok(a)
    }

    /// True if every entry below the sub-diagonal is zero.
    #[must_use]
    pub fn is_upper_hessenberg(&self) -> bool {
        let (rows, cols) = self.shape();
        (0..rows).all(|i| (0..cols.min(i.saturating_sub(1))).all(|j| self[(i, j)].is_zero()))
    }
}

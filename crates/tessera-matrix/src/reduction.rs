//! Upper-triangular and reduced row-echelon reduction.
//!
//! Both reductions work in place on an owned matrix and return the pivot
//! list: the strictly increasing column indices of the pivots, whose length
//! is the rank. Pivoting picks the first non-zero candidate row, since
//! entries are exact and there is no rounding to control.

use smallvec::SmallVec;
use tracing::debug;

use tessera_rings::{Capability, EuclideanDomain, Field, FieldOps, Ring};

use crate::dense_matrix::DenseMatrix;
use crate::error::MatrixError;

/// Column indices of the pivots found by a reduction.
pub type Pivots = SmallVec<[usize; 8]>;

impl<F: Field> DenseMatrix<F> {
    /// Reduces the matrix to upper-triangular (row echelon) form in place.
    pub fn to_upper_triangle(&mut self) -> Pivots {
        let cols = self.num_cols();
        upper_triangle_with(self, FieldOps::of(), cols)
    }

    /// Like [`Self::to_upper_triangle`], but only searches for pivots in the
    /// first `col_limit` columns. Row operations still span every column.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `col_limit` exceeds the column count.
    pub fn to_upper_triangle_in(&mut self, col_limit: usize) -> Result<Pivots, MatrixError> {
        self.check_col_limit("to_upper_triangle", col_limit)?;
        Ok(upper_triangle_with(self, FieldOps::of(), col_limit))
    }

    /// Reduces the matrix to reduced row-echelon form in place.
    pub fn to_echelon(&mut self) -> Pivots {
        let cols = self.num_cols();
        echelon_with(self, FieldOps::of(), cols)
    }

    /// Like [`Self::to_echelon`], with pivots restricted to the first
    /// `col_limit` columns.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `col_limit` exceeds the column count.
    pub fn to_echelon_in(&mut self, col_limit: usize) -> Result<Pivots, MatrixError> {
        self.check_col_limit("to_echelon", col_limit)?;
        Ok(echelon_with(self, FieldOps::of(), col_limit))
    }

    fn check_col_limit(&self, operation: &'static str, col_limit: usize) -> Result<(), MatrixError> {
        if col_limit <= self.num_cols() {
            Ok(())
        } else {
            Err(MatrixError::shape(operation, self.shape(), (0, col_limit)))
        }
    }
}

impl<R: EuclideanDomain> DenseMatrix<R> {
    /// Computes the rank.
    ///
    /// Fields use upper-triangular reduction. Other Euclidean domains use
    /// fraction-free elimination, which never leaves the ring.
    #[must_use]
    pub fn rank(&self) -> usize {
        let mut m = self.clone();
        match R::capability() {
            Capability::Field(ops) => {
                let cols = m.num_cols();
                upper_triangle_with(&mut m, ops, cols).len()
            }
            _ => fraction_free_rank(&mut m),
        }
    }
}

pub(crate) fn upper_triangle_with<R: Ring>(
    m: &mut DenseMatrix<R>,
    ops: FieldOps<R>,
    col_limit: usize,
) -> Pivots {
    let (rows, cols) = m.shape();
    let mut pivots = Pivots::new();
    let mut row = 0;

    for col in 0..col_limit {
        if row == rows {
            break;
        }
        let Some(found) = (row..rows).find(|&i| !m[(i, col)].is_zero()) else {
            continue;
        };
        m.swap_rows_raw(row, found, col..cols);

        let Some(inv) = (ops.inv)(&m[(row, col)]) else {
            continue;
        };
        for i in row + 1..rows {
            if m[(i, col)].is_zero() {
                continue;
            }
            let factor = -(m[(i, col)].clone() * inv.clone());
            m.add_scaled_row_raw(i, row, &factor, col..cols);
        }

        pivots.push(col);
        row += 1;
    }

    pivots
}

pub(crate) fn echelon_with<R: Ring>(
    m: &mut DenseMatrix<R>,
    ops: FieldOps<R>,
    col_limit: usize,
) -> Pivots {
    let pivots = upper_triangle_with(m, ops, col_limit);
    let cols = m.num_cols();

    for (row, &col) in pivots.iter().enumerate().rev() {
        if let Some(inv) = (ops.inv)(&m[(row, col)]) {
            m.scale_row_raw(row, &inv, col..cols);
        }
        for above in 0..row {
            if m[(above, col)].is_zero() {
                continue;
            }
            let factor = -m[(above, col)].clone();
            m.add_scaled_row_raw(above, row, &factor, col..cols);
        }
    }

    pivots
}

/// Rank by fraction-free elimination.
///
/// Each step divides the updated block by the previous pivot. If that
/// division is ever inexact the elimination continues with plain
/// cross-multiplication, which preserves rank in an integral domain.
fn fraction_free_rank<R: EuclideanDomain>(m: &mut DenseMatrix<R>) -> usize {
    let (rows, cols) = m.shape();
    let mut prev = R::one();
    let mut exact = true;
    let mut row = 0;

    for col in 0..cols {
        if row == rows {
            break;
        }
        let Some(found) = (row..rows).find(|&i| !m[(i, col)].is_zero()) else {
            continue;
        };
        m.swap_rows_raw(row, found, col..cols);
        let pivot = m[(row, col)].clone();

        let mut updated = Vec::with_capacity((rows - row - 1) * (cols - col - 1));
        for i in row + 1..rows {
            for j in col + 1..cols {
                updated.push(
                    pivot.clone() * m[(i, j)].clone() - m[(i, col)].clone() * m[(row, j)].clone(),
                );
            }
        }
        if exact {
            match updated
                .iter()
                .map(|x| x.divide_exact(&prev))
                .collect::<Result<Vec<_>, _>>()
            {
                Ok(divided) => updated = divided,
                Err(err) => {
                    debug!(row, col, %err, "fraction-free rank falling back to cross-multiplication");
                    exact = false;
                }
            }
        }

        let mut values = updated.into_iter();
        for i in row + 1..rows {
            m[(i, col)] = R::zero();
            for j in col + 1..cols {
                if let Some(v) = values.next() {
                    m[(i, j)] = v;
                }
            }
        }

        if exact {
            prev = pivot;
        }
        row += 1;
    }

    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_rings::{Fp, Polynomial, UnitRing, Q, Z};

    fn q_matrix(rows: &[&[i64]]) -> DenseMatrix<Q> {
        DenseMatrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&v| Q::from_integer(v)).collect())
                .collect(),
        )
        .unwrap()
    }

    fn z_matrix(rows: &[&[i64]]) -> DenseMatrix<Z> {
        DenseMatrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&v| Z::new(v)).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_upper_triangle() {
        let mut m = q_matrix(&[&[0, 2, 1], &[1, 1, 1], &[2, 2, 2]]);
        let pivots = m.to_upper_triangle();
        assert_eq!(pivots.as_slice(), &[0, 1]);
        assert!(m.is_upper_triangular());
        assert_eq!(m.row(2), &[Q::zero(), Q::zero(), Q::zero()]);
    }

    #[test]
    fn test_echelon_form() {
        let mut m = q_matrix(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
        let pivots = m.to_echelon();
        assert_eq!(pivots.as_slice(), &[0, 1]);
        assert_eq!(m, q_matrix(&[&[1, 0, -1], &[0, 1, 2], &[0, 0, 0]]));
    }

    #[test]
    fn test_echelon_skips_zero_columns() {
        let mut m = q_matrix(&[&[0, 3, 6], &[0, 1, 4]]);
        let pivots = m.to_echelon();
        assert_eq!(pivots.as_slice(), &[1, 2]);
        assert_eq!(m, q_matrix(&[&[0, 1, 0], &[0, 0, 1]]));
    }

    #[test]
    fn test_echelon_in_restricts_pivots() {
        // [A | b] where the right column must not be pivoted.
        let mut m = q_matrix(&[&[1, 1, 1], &[1, 1, 2]]);
        let pivots = m.to_echelon_in(2).unwrap();
        assert_eq!(pivots.as_slice(), &[0]);
        assert_eq!(m[(1, 2)], Q::from_integer(1));
        assert!(m.to_echelon_in(4).is_err());
    }

    #[test]
    fn test_rank_over_integers() {
        assert_eq!(z_matrix(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]).rank(), 2);
        assert_eq!(z_matrix(&[&[2, 4], &[3, 7]]).rank(), 2);
        assert_eq!(z_matrix(&[&[0, 0], &[0, 0]]).rank(), 0);
        assert_eq!(z_matrix(&[&[6, 4, 2], &[3, 2, 1]]).rank(), 1);
    }

    #[test]
    fn test_rank_agrees_across_scalars() {
        let rows: &[&[i64]] = &[&[1, 2, 0, 3], &[2, 4, 1, 1], &[3, 6, 1, 4]];
        assert_eq!(z_matrix(rows).rank(), q_matrix(rows).rank());
        assert_eq!(q_matrix(rows).rank(), 2);

        // Over F_2 the second row is [0, 0, 1, 1], still rank 2.
        let f2 = z_matrix(rows).map(|z| Fp::<2>::from_signed(z.to_i64().unwrap_or(0)));
        assert_eq!(f2.rank(), 2);
    }

    #[test]
    fn test_rank_of_lambda_matrix() {
        // [[x, 1], [x^2, x]] has determinant 0.
        let x = Polynomial::<Q>::x();
        let one = Polynomial::constant(Q::one());
        let m = DenseMatrix::from_rows(vec![
            vec![x.clone(), one],
            vec![x.clone() * x.clone(), x],
        ])
        .unwrap();
        assert_eq!(m.rank(), 1);
    }
}

//! Matrix inversion.
//!
//! The strategy depends on the scalar capability:
//!
//! - field: reduce `[A | I]` to echelon form
//! - Euclidean domain: fraction-free reduction of `[A | I]` by repeated
//!   division with remainder, then back-substitution over unit pivots
//! - unit ring: `adj(A) * det(A)^-1`

use tracing::debug;

use tessera_rings::{Capability, EuclideanOps, FieldOps, UnitRing};

use crate::dense_matrix::DenseMatrix;
use crate::error::MatrixError;
use crate::reduction::echelon_with;

impl<R: UnitRing> DenseMatrix<R> {
    /// Computes the inverse over the scalar ring.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices and `NotInvertible`
    /// if no inverse exists over `R` (for example an integer matrix whose
    /// determinant is not ±1).
    pub fn inverse(&self) -> Result<Self, MatrixError> {
        self.require_square("inverse")?;
        let capability = R::capability();
        debug!(capability = capability.name(), size = self.num_rows(), "inverting matrix");
        match capability {
            Capability::Field(ops) => inverse_over_field(self, ops),
            Capability::EuclideanDomain(ops) => inverse_over_euclidean(self, ops),
            Capability::UnitRing | Capability::Ring => self.inverse_by_adjugate(),
        }
    }

    /// Computes the inverse as `adj(A) / det(A)`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices and `NotInvertible`
    /// if the determinant is not a unit.
    pub fn inverse_by_adjugate(&self) -> Result<Self, MatrixError> {
        self.require_square("inverse")?;
        let det_inv = self.det()?.inverse().ok_or(MatrixError::NotInvertible)?;
        Ok(self.adjugate()?.scale(&det_inv))
    }

    /// Returns true if the matrix has an inverse over `R`.
    #[must_use]
    pub fn is_invertible(&self) -> bool {
        self.is_square() && self.det().is_ok_and(|d| d.is_unit())
    }
}

fn inverse_over_field<R: UnitRing>(m: &DenseMatrix<R>, ops: FieldOps<R>) -> Result<DenseMatrix<R>, MatrixError> {
    let n = m.num_rows();
    let mut augmented = m.concat_column(&DenseMatrix::identity(n))?;
    let pivots = echelon_with(&mut augmented, ops, n);
    if pivots.len() < n {
        return Err(MatrixError::NotInvertible);
    }
    Ok(DenseMatrix::from_fn(n, n, |i, j| augmented[(i, n + j)].clone()))
}

fn inverse_over_euclidean<R: UnitRing>(
    m: &DenseMatrix<R>,
    ops: EuclideanOps<R>,
) -> Result<DenseMatrix<R>, MatrixError> {
    let n = m.num_rows();
    let width = 2 * n;
    let mut a = m.concat_column(&DenseMatrix::identity(n))?;

    for k in 0..n {
        let Some(found) = (k..n).find(|&i| !a[(i, k)].is_zero()) else {
            return Err(MatrixError::NotInvertible);
        };
        a.swap_rows_raw(k, found, k..width);

        // Euclid on the column: subtract quotients until every entry below
        // the pivot is zero, swapping whenever a smaller remainder appears.
        for i in k + 1..n {
            while !a[(i, k)].is_zero() {
                let (q, _) = (ops.div_rem)(&a[(i, k)], &a[(k, k)]);
                a.add_scaled_row_raw(i, k, &-q, k..width);
                if !a[(i, k)].is_zero() {
                    a.swap_rows_raw(i, k, k..width);
                }
            }
        }

        // det(A) is the product of the pivots up to sign, so a non-unit
        // pivot means no inverse over R.
        let inv = a[(k, k)].inverse().ok_or(MatrixError::NotInvertible)?;
        a.scale_row_raw(k, &inv, k..width);
    }

    for k in (0..n).rev() {
        for above in 0..k {
            if a[(above, k)].is_zero() {
                continue;
            }
            let factor = -a[(above, k)].clone();
            a.add_scaled_row_raw(above, k, &factor, k..width);
        }
    }

    Ok(DenseMatrix::from_fn(n, n, |i, j| a[(i, n + j)].clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_rings::{Polynomial, Ring, Zn, Q, Z};

    fn z_matrix(rows: &[&[i64]]) -> DenseMatrix<Z> {
        DenseMatrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&v| Z::new(v)).collect())
                .collect(),
        )
        .unwrap()
    }

    fn to_q(m: &DenseMatrix<Z>) -> DenseMatrix<Q> {
        m.map(|z| Q::from(z.clone()))
    }

    fn to_z6(m: &DenseMatrix<Z>) -> DenseMatrix<Zn<6>> {
        m.map(|z| Zn::<6>::from_signed(z.to_i64().unwrap_or(0)))
    }

    #[test]
    fn test_inverse_over_rationals() {
        let m = to_q(&z_matrix(&[&[1, 2], &[3, 4]]));
        let inv = m.inverse().unwrap();
        assert_eq!(inv[(0, 0)], Q::from_integer(-2));
        assert_eq!(inv[(1, 0)], Q::new(3, 2));
        assert!(m.mm(&inv).unwrap().is_identity());
        assert!(inv.mm(&m).unwrap().is_identity());
    }

    #[test]
    fn test_singular_over_rationals() {
        let m = to_q(&z_matrix(&[&[1, 2], &[2, 4]]));
        assert_eq!(m.inverse(), Err(MatrixError::NotInvertible));
        assert!(!m.is_invertible());
    }

    #[test]
    fn test_inverse_over_integers() {
        let m = z_matrix(&[&[1, 2, 3], &[0, 1, 4], &[5, 6, 0]]);
        let inv = m.inverse().unwrap();
        assert_eq!(inv, z_matrix(&[&[-24, 18, 5], &[20, -15, -4], &[-5, 4, 1]]));
        assert_eq!(inv, m.inverse_by_adjugate().unwrap());

        let m = z_matrix(&[&[4, 3], &[5, 4]]);
        assert_eq!(m.inverse().unwrap(), z_matrix(&[&[4, -3], &[-5, 4]]));
    }

    #[test]
    fn test_integer_matrix_with_non_unit_determinant() {
        let m = z_matrix(&[&[2, 0], &[0, 1]]);
        assert_eq!(m.inverse(), Err(MatrixError::NotInvertible));
        assert!(to_q(&m).inverse().is_ok());
        assert_eq!(
            z_matrix(&[&[1, 2], &[2, 4]]).inverse(),
            Err(MatrixError::NotInvertible)
        );
    }

    #[test]
    fn test_inverse_over_residue_ring() {
        // det = -5 = 1 (mod 6)
        let m = to_z6(&z_matrix(&[&[1, 2], &[3, 1]]));
        let inv = m.inverse().unwrap();
        assert_eq!(inv, to_z6(&z_matrix(&[&[1, 4], &[3, 1]])));
        assert!(m.mm(&inv).unwrap().is_identity());

        // det = 2 is a zero divisor mod 6
        let singular = to_z6(&z_matrix(&[&[2, 0], &[0, 1]]));
        assert_eq!(singular.inverse(), Err(MatrixError::NotInvertible));
    }

    #[test]
    fn test_inverse_of_lambda_matrix() {
        let x = Polynomial::<Q>::x();
        let one = Polynomial::constant(Q::from_integer(1));
        let zero = Polynomial::<Q>::zero();
        let m = DenseMatrix::from_rows(vec![
            vec![one.clone(), x.clone()],
            vec![zero.clone(), one.clone()],
        ])
        .unwrap();
        let inv = m.inverse().unwrap();
        assert_eq!(inv[(0, 1)], -x);
        assert!(m.mm(&inv).unwrap().is_identity());
    }

    #[test]
    fn test_non_square() {
        assert!(matches!(
            z_matrix(&[&[1, 2]]).inverse(),
            Err(MatrixError::ShapeMismatch { .. })
        ));
    }
}

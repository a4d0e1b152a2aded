//! Adjugate and characteristic polynomial.
//!
//! Both come out of one Faddeev-LeVerrier pass that uses only unit-ring
//! operations plus exact division by the integers 1..=n. When a ring cannot
//! divide by one of those integers (characteristic p, or zero divisors) the
//! pass fails and the results are rebuilt from minors instead.
//!
//! Coefficient lists are in ascending degree order and monic:
//! `[c_0, c_1, ..., c_{n-1}, 1]` for `det(xI - A)`.

use tracing::debug;

use tessera_rings::{Polynomial, Ring, UnitRing};

use crate::dense_matrix::DenseMatrix;
use crate::error::MatrixError;
use crate::view::MatrixRead;

impl<R: Ring> DenseMatrix<R> {
    /// Determinant of the matrix with `row` and `col` deleted.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices, out-of-range
    /// indices, or 1x1 matrices.
    pub fn minor(&self, row: usize, col: usize) -> Result<R, MatrixError> {
        self.require_square("minor")?;
        self.cofactor(row, col)?.to_dense().det()
    }
}

impl<R: UnitRing> DenseMatrix<R> {
    /// The matrix of signed minors `(-1)^(i+j) * minor(i, j)`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices.
    pub fn cofactor_matrix(&self) -> Result<Self, MatrixError> {
        let n = self.require_square("cofactor_matrix")?;
        if n == 1 {
            return Ok(Self::identity(1));
        }
        let mut result = Self::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                let minor = self.minor(i, j)?;
                result[(i, j)] = if (i + j) % 2 == 0 { minor } else { -minor };
            }
        }
        Ok(result)
    }

    /// The adjugate, satisfying `A * adj(A) = det(A) * I`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices.
    pub fn adjugate(&self) -> Result<Self, MatrixError> {
        Ok(self.adjugate_and_characteristic()?.0)
    }

    /// Coefficients of `det(xI - A)`, constant term first.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices.
    pub fn characteristic_coefficients(&self) -> Result<Vec<R>, MatrixError> {
        Ok(self.adjugate_and_characteristic()?.1)
    }

    /// `det(xI - A)` as a polynomial.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices.
    pub fn characteristic_polynomial(&self) -> Result<Polynomial<R>, MatrixError> {
        Ok(Polynomial::new(self.characteristic_coefficients()?))
    }

    /// Computes the adjugate and the characteristic polynomial coefficients
    /// together.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices.
    pub fn adjugate_and_characteristic(&self) -> Result<(Self, Vec<R>), MatrixError> {
        let n = self.require_square("adjugate")?;
        if n == 1 {
            return Ok((Self::identity(1), vec![-self[(0, 0)].clone(), R::one()]));
        }

        match faddeev_leverrier(self) {
            Ok(result) => Ok(result),
            Err(MatrixError::NotExactDivision | MatrixError::NotInvertible) => {
                debug!(size = n, "integer division failed, rebuilding adjugate from minors");
                let adjugate = self.cofactor_matrix()?.transpose();
                let coefficients = characteristic_from_minors(self)?;
                Ok((adjugate, coefficients))
            }
            Err(err) => Err(err),
        }
    }
}

fn faddeev_leverrier<R: UnitRing>(m: &DenseMatrix<R>) -> Result<(DenseMatrix<R>, Vec<R>), MatrixError> {
    let n = m.num_rows();
    let identity = DenseMatrix::<R>::identity(n);
    // a[k] is the coefficient of x^(n-k)
    let mut a = Vec::with_capacity(n + 1);
    a.push(R::one());

    let mut c = identity.clone();
    for i in 1..n {
        c = m.mm(&c)?;
        let coefficient = -c.trace()?.div_integer(i as u64)?;
        c = c.checked_add(&identity.scale(&coefficient))?;
        a.push(coefficient);
    }
    let last = -m.mm(&c)?.trace()?.div_integer(n as u64)?;
    a.push(last);

    let adjugate = if n % 2 == 1 { c } else { -c };
    a.reverse();
    Ok((adjugate, a))
}

/// The coefficient of `x^(n-k)` is `(-1)^k` times the sum of all principal
/// minors of size k.
fn characteristic_from_minors<R: UnitRing>(m: &DenseMatrix<R>) -> Result<Vec<R>, MatrixError> {
    let n = m.num_rows();
    let mut descending = Vec::with_capacity(n + 1);
    descending.push(R::one());

    for k in 1..=n {
        let mut sum = R::zero();
        let mut subset: Vec<usize> = (0..k).collect();
        loop {
            sum = sum + m.factor(subset.clone(), subset.clone())?.to_dense().det()?;
            if !next_combination(&mut subset, n) {
                break;
            }
        }
        descending.push(if k % 2 == 0 { sum } else { -sum });
    }

    descending.reverse();
    Ok(descending)
}

/// Advances `subset` to the next k-subset of `0..n` in lexicographic order.
fn next_combination(subset: &mut [usize], n: usize) -> bool {
    let k = subset.len();
    let Some(i) = (0..k).rev().find(|&i| subset[i] < n - k + i) else {
        return false;
    };
    subset[i] += 1;
    for j in i + 1..k {
        subset[j] = subset[j - 1] + 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_rings::{Fp, Zn, Q, Z};

    fn z_matrix(rows: &[&[i64]]) -> DenseMatrix<Z> {
        DenseMatrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&v| Z::new(v)).collect())
                .collect(),
        )
        .unwrap()
    }

    fn z_vec(values: &[i64]) -> Vec<Z> {
        values.iter().map(|&v| Z::new(v)).collect()
    }

    const A3: &[&[i64]] = &[&[2, 1, 1], &[1, 3, 2], &[1, 0, 1]];
    const B3: &[&[i64]] = &[&[1, 1, 0], &[0, 1, 1], &[1, 0, 1]];

    #[test]
    fn test_two_by_two() {
        let m = z_matrix(&[&[1, 2], &[3, 4]]);
        let (adj, coeffs) = m.adjugate_and_characteristic().unwrap();
        assert_eq!(adj, z_matrix(&[&[4, -2], &[-3, 1]]));
        assert_eq!(coeffs, z_vec(&[-2, -5, 1]));
    }

    #[test]
    fn test_three_by_three_over_integers() {
        let m = z_matrix(A3);
        assert_eq!(m.characteristic_coefficients().unwrap(), z_vec(&[-4, 9, -6, 1]));
        assert_eq!(
            m.adjugate().unwrap(),
            z_matrix(&[&[3, -1, -1], &[1, 1, -3], &[-3, 1, 5]])
        );
        assert_eq!(m.adjugate().unwrap(), m.cofactor_matrix().unwrap().transpose());
    }

    #[test]
    fn test_one_by_one() {
        let m = z_matrix(&[&[7]]);
        let (adj, coeffs) = m.adjugate_and_characteristic().unwrap();
        assert_eq!(adj, DenseMatrix::identity(1));
        assert_eq!(coeffs, z_vec(&[-7, 1]));
    }

    #[test]
    fn test_fallback_in_characteristic_two() {
        let m = z_matrix(B3).map(|z| Fp::<2>::from_signed(z.to_i64().unwrap_or(0)));
        let (adj, coeffs) = m.adjugate_and_characteristic().unwrap();
        let one = Fp::<2>::new(1);
        let zero = Fp::<2>::new(0);
        assert_eq!(coeffs, vec![zero, one, one, one]);
        assert_eq!(adj, DenseMatrix::from_fn(3, 3, |_, _| one));
    }

    #[test]
    fn test_fallback_with_zero_divisors() {
        let m = z_matrix(A3).map(|z| Zn::<6>::from_signed(z.to_i64().unwrap_or(0)));
        let coeffs = m.characteristic_coefficients().unwrap();
        let expected: Vec<_> = [2, 3, 0, 1].iter().map(|&v| Zn::<6>::new(v)).collect();
        assert_eq!(coeffs, expected);

        let adj = m.adjugate().unwrap();
        let expected_adj = z_matrix(&[&[3, 5, 5], &[1, 1, 3], &[3, 1, 5]])
            .map(|z| Zn::<6>::from_signed(z.to_i64().unwrap_or(0)));
        assert_eq!(adj, expected_adj);
    }

    #[test]
    fn test_cayley_hamilton() {
        let m = z_matrix(A3).map(|z| Q::from(z.clone()));
        let coeffs = m.characteristic_coefficients().unwrap();
        let mut acc = DenseMatrix::<Q>::zeros(3, 3);
        let mut power = DenseMatrix::<Q>::identity(3);
        for c in &coeffs {
            acc = acc.checked_add(&power.scale(c)).unwrap();
            power = power.mm(&m).unwrap();
        }
        assert!(acc.is_zero_matrix());
    }

    #[test]
    fn test_characteristic_polynomial_and_minors() {
        let m = z_matrix(A3).map(|z| Q::from(z.clone()));
        let p = m.characteristic_polynomial().unwrap();
        assert_eq!(p.degree(), 3);
        assert_eq!(p.coeff(0), Q::from_integer(-4));
        // det(A) = -c_0 for odd n
        assert_eq!(m.det().unwrap(), Q::from_integer(4));
        assert_eq!(m.minor(0, 0).unwrap(), Q::from_integer(3));
        assert!(m.minor(3, 0).is_err());
    }

    #[test]
    fn test_next_combination() {
        let mut subset = vec![0, 1];
        let mut seen = vec![subset.clone()];
        while next_combination(&mut subset, 4) {
            seen.push(subset.clone());
        }
        assert_eq!(seen.len(), 6);
        assert_eq!(seen.last(), Some(&vec![2, 3]));
    }
}

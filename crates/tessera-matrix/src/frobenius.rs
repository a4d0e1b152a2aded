//! Frobenius (rational canonical) normal form.
//!
//! The invariant factors of a square matrix M over a field F are the
//! non-unit invariant factors of its characteristic matrix `xI - M`, a
//! matrix over F[x]. The Frobenius form is the block diagonal matrix of
//! their companion matrices. Two matrices are similar over F exactly when
//! their Frobenius forms agree.

use tracing::debug;

use tessera_rings::{Field, Polynomial, Ring, UnitRing};

use crate::dense_matrix::DenseMatrix;
use crate::error::MatrixError;
use crate::normal_form::{smith_normal_form, SmithConfig};

/// Result of [`DenseMatrix::frobenius_normal_form`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrobeniusNormalForm<F: Ring> {
    /// Block diagonal matrix of companion blocks, similar to the input.
    pub form: DenseMatrix<F>,
    /// Monic non-unit invariant factors; each divides the next and the last
    /// is the minimal polynomial.
    pub invariant_factors: Vec<Polynomial<F>>,
}

/// The companion matrix of a monic polynomial of positive degree.
///
/// For `p = c_0 + c_1 x + ... + x^d` the result has ones on the
/// sub-diagonal and `-c_0, ..., -c_{d-1}` down the last column, so its
/// characteristic polynomial is `p`.
///
/// # Errors
///
/// Returns `OutOfDomain` if `p` is constant or not monic.
pub fn companion_matrix<F: Field>(p: &Polynomial<F>) -> Result<DenseMatrix<F>, MatrixError> {
    let d = p.degree();
    if d == 0 || !p.is_monic() {
        return Err(MatrixError::OutOfDomain);
    }
    Ok(DenseMatrix::from_fn(d, d, |i, j| {
        if j == d - 1 {
            -p.coeff(i)
        } else if i == j + 1 {
            F::one()
        } else {
            F::zero()
        }
    }))
}

impl<F: Field> DenseMatrix<F> {
    /// The lambda-matrix `xI - M`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices.
    pub fn characteristic_matrix(&self) -> Result<DenseMatrix<Polynomial<F>>, MatrixError> {
        let n = self.require_square("characteristic_matrix")?;
        Ok(DenseMatrix::from_fn(n, n, |i, j| {
            let entry = -Polynomial::constant(self[(i, j)].clone());
            if i == j {
                Polynomial::x() + entry
            } else {
                entry
            }
        }))
    }

    /// Computes the Frobenius normal form.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices.
    pub fn frobenius_normal_form(&self) -> Result<FrobeniusNormalForm<F>, MatrixError> {
        let n = self.require_square("frobenius_normal_form")?;
        let snf = smith_normal_form(
            &self.characteristic_matrix()?,
            &SmithConfig {
                compute_transforms: false,
            },
        );

        let invariant_factors: Vec<_> = snf
            .invariant_factors
            .into_iter()
            .filter(|p| !p.is_unit())
            .collect();
        debug!(
            size = n,
            blocks = invariant_factors.len(),
            "characteristic matrix reduced"
        );

        let mut form = Self::zeros(n, n);
        let mut offset = 0;
        for factor in &invariant_factors {
            let block = companion_matrix(factor)?;
            let d = block.num_rows();
            for i in 0..d {
                for j in 0..d {
                    form[(offset + i, offset + j)] = block[(i, j)].clone();
                }
            }
            offset += d;
        }

        Ok(FrobeniusNormalForm {
            form,
            invariant_factors,
        })
    }

    /// The monic polynomial of least degree annihilating the matrix.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices.
    pub fn minimal_polynomial(&self) -> Result<Polynomial<F>, MatrixError> {
        let frobenius = self.frobenius_normal_form()?;
        Ok(frobenius
            .invariant_factors
            .last()
            .cloned()
            .unwrap_or_else(Polynomial::one))
    }
}

//! # tessera-matrix
//!
//! Exact dense matrix algebra over abstract scalar rings.
//!
//! This crate provides:
//! - Dense matrices with zero-copy views (transpose, sub-matrix, cofactor)
//! - Elementary row/column operations and echelon reductions
//! - Determinants (closed form, Gauss-Bareiss, permutation expansion)
//! - Linear systems, kernels and column/row spaces over fields
//! - Inversion over fields, Euclidean domains and unit rings
//! - Adjugate and characteristic polynomial
//! - Smith, Hermite, Hessenberg and Frobenius normal forms
//!
//! ## Algorithm Selection
//!
//! Every algorithm is generic over the weakest trait it can work with and
//! asks [`Ring::capability`](tessera_rings::Ring::capability) once per call
//! for anything stronger:
//! - Fields: Gaussian elimination with exact division
//! - Euclidean domains: fraction-free elimination (Bareiss, Euclid on
//!   columns)
//! - Unit rings: Faddeev-LeVerrier with a cofactor fallback
//! - Plain rings: permutation expansion

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dense_matrix;
pub mod error;
pub mod view;

mod basis;
mod charpoly;
mod determinant;
mod elementary;
mod frobenius;
mod hessenberg;
mod inverse;
mod normal_form;
mod reduction;
mod solve;

pub use basis::VectorBasis;
pub use dense_matrix::DenseMatrix;
pub use determinant::DeterminantConfig;
pub use error::MatrixError;
pub use frobenius::{companion_matrix, FrobeniusNormalForm};
pub use normal_form::{
    hermite_normal_form, is_snf, smith_normal_form, snf_determinant, HermiteNormalForm,
    SmithConfig, SmithNormalForm,
};
pub use reduction::Pivots;
pub use solve::{LinearSystemSolution, SolutionKind};
pub use view::{Cofactor, Factor, MatrixRead, SubMatrix, Transpose};

#[cfg(test)]
mod tests;

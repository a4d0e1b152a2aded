//! # Tessera
//!
//! Exact dense matrix algebra over abstract scalar rings.
//!
//! Every algorithm is generic over the weakest algebraic structure it
//! needs. Integer matrices get fraction-free elimination, matrices over
//! fields get Gaussian elimination, and polynomial matrices share the
//! Smith normal form code with the integers.
//!
//! ## Quick Start
//!
//! ```rust
//! use tessera::prelude::*;
//!
//! let a = DenseMatrix::from_rows(vec![
//!     vec![Z::new(1), Z::new(2), Z::new(3)],
//!     vec![Z::new(4), Z::new(5), Z::new(6)],
//!     vec![Z::new(7), Z::new(8), Z::new(9)],
//! ])
//! .unwrap();
//!
//! assert_eq!(a.det().unwrap(), Z::zero());
//! assert_eq!(a.rank(), 2);
//!
//! let snf = smith_normal_form(&a, &SmithConfig::default());
//! assert_eq!(snf.invariant_factors, vec![Z::new(1), Z::new(3)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use tessera_matrix as matrix;
pub use tessera_rings as rings;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tessera_matrix::{
        companion_matrix, hermite_normal_form, smith_normal_form, DenseMatrix, DeterminantConfig,
        MatrixError, MatrixRead, SmithConfig, SolutionKind, VectorBasis,
    };
    pub use tessera_rings::{EuclideanDomain, Field, Fp, Polynomial, Ring, UnitRing, Zn, Q, Z};
}

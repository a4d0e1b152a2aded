//! Bases of subspaces.

use tessera_rings::{Field, Ring};

use crate::dense_matrix::DenseMatrix;
use crate::error::MatrixError;
use crate::solve::SolutionKind;

/// An ordered list of linearly independent vectors spanning a subspace.
///
/// Bases are produced by kernel, column-space and row-space queries and are
/// never mutated afterwards. The zero basis has no vectors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorBasis<R> {
    /// Length of every vector.
    dimension: usize,
    vectors: Vec<Vec<R>>,
}

impl<R: Ring> VectorBasis<R> {
    /// Callers guarantee independence and that every vector has length
    /// `dimension`.
    pub(crate) fn new(dimension: usize, vectors: Vec<Vec<R>>) -> Self {
        debug_assert!(vectors.iter().all(|v| v.len() == dimension));
        Self { dimension, vectors }
    }

    /// The basis of the zero subspace of a `dimension`-dimensional space.
    #[must_use]
    pub fn zero(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    /// Length of the vectors (dimension of the ambient space).
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of basis vectors.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.vectors.len()
    }

    /// True for the zero subspace.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.vectors.is_empty()
    }

    /// The basis vectors.
    #[must_use]
    pub fn vectors(&self) -> &[Vec<R>] {
        &self.vectors
    }

    /// The basis vectors as the columns of a matrix, or `None` for the zero
    /// basis.
    #[must_use]
    pub fn as_matrix(&self) -> Option<DenseMatrix<R>> {
        if self.vectors.is_empty() || self.dimension == 0 {
            return None;
        }
        DenseMatrix::from_vectors(&self.vectors, true).ok()
    }
}

impl<F: Field> VectorBasis<F> {
    /// A basis of the span of `vectors`, keeping the first independent ones.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if a vector's length differs from `dimension`.
    pub fn span_of(dimension: usize, vectors: &[Vec<F>]) -> Result<Self, MatrixError> {
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(MatrixError::shape("span_of", (dimension, 1), (bad.len(), 1)));
        }
        if vectors.is_empty() || dimension == 0 {
            return Ok(Self::zero(dimension));
        }
        Ok(DenseMatrix::from_vectors(vectors, true)?.column_space())
    }

    /// The coefficients expressing `v` as a combination of the basis.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `v` has the wrong length and `OutOfDomain`
    /// if `v` is not in the span.
    pub fn coordinates_of(&self, v: &[F]) -> Result<Vec<F>, MatrixError> {
        if v.len() != self.dimension {
            return Err(MatrixError::shape(
                "coordinates_of",
                (self.dimension, 1),
                (v.len(), 1),
            ));
        }
        let Some(basis) = self.as_matrix() else {
            return if v.iter().all(F::is_zero) {
                Ok(Vec::new())
            } else {
                Err(MatrixError::OutOfDomain)
            };
        };

        let solution = basis.solve_linear(&DenseMatrix::column_vector(v.to_vec())?)?;
        match (solution.kind(), solution.particular()) {
            (SolutionKind::Empty, _) | (_, None) => Err(MatrixError::OutOfDomain),
            (_, Some(x)) => Ok(x.col(0)),
        }
    }

    /// True if `v` lies in the span of the basis.
    #[must_use]
    pub fn contains(&self, v: &[F]) -> bool {
        self.coordinates_of(v).is_ok()
    }
}

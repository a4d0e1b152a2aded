//! Linear systems, kernels and column/row spaces over fields.

use tessera_rings::{Field, FieldOps};

use crate::basis::VectorBasis;
use crate::dense_matrix::DenseMatrix;
use crate::error::MatrixError;
use crate::reduction::{echelon_with, Pivots};

/// Shape of the solution set of `A X = B`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolutionKind {
    /// The system is inconsistent.
    Empty,
    /// Exactly one solution; the homogeneous part is trivial.
    Single,
    /// A particular solution plus a non-trivial homogeneous basis.
    Infinite,
}

/// Solution of a linear system, as built by [`DenseMatrix::solve_linear`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearSystemSolution<R> {
    kind: SolutionKind,
    particular: Option<DenseMatrix<R>>,
    homogeneous: VectorBasis<R>,
}

impl<R> LinearSystemSolution<R> {
    /// The kind of solution set.
    #[must_use]
    pub fn kind(&self) -> SolutionKind {
        self.kind
    }

    /// True unless the system is inconsistent.
    #[must_use]
    pub fn is_solvable(&self) -> bool {
        self.kind != SolutionKind::Empty
    }

    /// A particular solution X of shape `(A.cols, B.cols)`, absent for
    /// inconsistent systems.
    #[must_use]
    pub fn particular(&self) -> Option<&DenseMatrix<R>> {
        self.particular.as_ref()
    }

    /// A basis of the solutions of `A x = 0`.
    #[must_use]
    pub fn homogeneous(&self) -> &VectorBasis<R> {
        &self.homogeneous
    }
}

impl<F: Field> DenseMatrix<F> {
    /// Solves `A X = B`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `b` has a different number of rows.
    pub fn solve_linear(&self, b: &Self) -> Result<LinearSystemSolution<F>, MatrixError> {
        if self.num_rows() != b.num_rows() {
            return Err(MatrixError::shape("solve_linear", self.shape(), b.shape()));
        }
        let n = self.num_cols();
        let mut expanded = self.concat_column(b)?;
        let pivots = echelon_with(&mut expanded, FieldOps::of(), n);
        let rank = pivots.len();

        let homogeneous = kernel_from_echelon(&expanded, &pivots, n);
        let solvable = (rank..expanded.num_rows())
            .all(|i| (n..expanded.num_cols()).all(|j| expanded[(i, j)].is_zero()));
        if !solvable {
            return Ok(LinearSystemSolution {
                kind: SolutionKind::Empty,
                particular: None,
                homogeneous,
            });
        }

        let mut particular = Self::zeros(n, b.num_cols());
        for (row, &col) in pivots.iter().enumerate() {
            for j in 0..b.num_cols() {
                particular[(col, j)] = expanded[(row, n + j)].clone();
            }
        }

        let kind = if homogeneous.is_zero() {
            SolutionKind::Single
        } else {
            SolutionKind::Infinite
        };
        Ok(LinearSystemSolution {
            kind,
            particular: Some(particular),
            homogeneous,
        })
    }

    /// Solves `A x = b` for a single right-hand side.
    ///
    /// Returns `None` if no solution exists.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `b.len()` differs from the row count.
    pub fn solve(&self, b: &[F]) -> Result<Option<Vec<F>>, MatrixError> {
        if b.len() != self.num_rows() {
            return Err(MatrixError::shape("solve", self.shape(), (b.len(), 1)));
        }
        let solution = self.solve_linear(&Self::column_vector(b.to_vec())?)?;
        Ok(solution.particular().map(|x| x.col(0)))
    }

    /// A basis of the kernel `{ x : A x = 0 }`.
    #[must_use]
    pub fn solve_homo(&self) -> VectorBasis<F> {
        let n = self.num_cols();
        let mut reduced = self.clone();
        let pivots = echelon_with(&mut reduced, FieldOps::of(), n);
        kernel_from_echelon(&reduced, &pivots, n)
    }

    /// Alias of [`Self::solve_homo`].
    #[must_use]
    pub fn kernel(&self) -> VectorBasis<F> {
        self.solve_homo()
    }

    /// A basis of the column space made of original columns.
    ///
    /// The upper-triangular reduction only certifies which columns are
    /// independent; the returned vectors are the unreduced ones.
    #[must_use]
    pub fn column_space(&self) -> VectorBasis<F> {
        let mut reduced = self.clone();
        let pivots = reduced.to_upper_triangle();
        let vectors = pivots.iter().map(|&col| self.col(col)).collect();
        VectorBasis::new(self.num_rows(), vectors)
    }

    /// A basis of the row space made of original rows.
    #[must_use]
    pub fn row_space(&self) -> VectorBasis<F> {
        self.transpose().column_space()
    }
}

/// Reads the kernel off a reduced row-echelon matrix whose first `n`
/// columns hold the coefficients.
///
/// Free column j gives the vector with -1 at j and `m[i][j]` at the pivot
/// column of row i.
fn kernel_from_echelon<F: Field>(m: &DenseMatrix<F>, pivots: &Pivots, n: usize) -> VectorBasis<F> {
    let mut vectors = Vec::with_capacity(n - pivots.len());
    for free in (0..n).filter(|j| !pivots.contains(j)) {
        let mut v = vec![F::zero(); n];
        v[free] = -F::one();
        for (row, &col) in pivots.iter().enumerate() {
            v[col] = m[(row, free)].clone();
        }
        vectors.push(v);
    }
    VectorBasis::new(n, vectors)
}

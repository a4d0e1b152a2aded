//! Smith and Hermite normal forms over Euclidean domains.
//!
//! The Smith normal form of A is a diagonal matrix D such that:
//!   - D = U * A * V for invertible U, V over the ring
//!   - D[i,i] divides D[i+1,i+1] for all i
//!
//! The diagonal entries are the invariant factors. Integer matrices and
//! lambda-matrices (polynomial entries) go through the same loop.
//!
//! # Algorithm
//!
//! A loop over the leading index k with the trailing block `A[k.., k..]`
//! as the explicit invariant:
//!
//! 1. Move any non-zero entry of the block to (k, k).
//! 2. Clear row k and column k by division with remainder, swapping in
//!    every non-zero remainder as the new, smaller pivot.
//! 3. If the pivot fails to divide some entry of the block, add that entry's
//!    row to row k and go back to 2.
//! 4. Normalize the pivot by its canonical unit.

use tracing::trace;

use tessera_rings::EuclideanDomain;

use crate::dense_matrix::DenseMatrix;
use crate::reduction::Pivots;

/// Options for [`smith_normal_form`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmithConfig {
    /// Whether to accumulate the transformation matrices U and V.
    pub compute_transforms: bool,
}

impl Default for SmithConfig {
    fn default() -> Self {
        Self {
            compute_transforms: true,
        }
    }
}

/// Result of Smith normal form computation.
#[derive(Clone, Debug)]
pub struct SmithNormalForm<R> {
    /// The diagonal matrix D, same shape as the input.
    pub normal_form: DenseMatrix<R>,
    /// Non-zero diagonal entries (invariant factors) d_1, d_2, ..., d_r.
    /// Satisfies d_i | d_{i+1} for all i.
    pub invariant_factors: Vec<R>,
    /// Left transformation matrix U (optional).
    pub left_transform: Option<DenseMatrix<R>>,
    /// Right transformation matrix V (optional).
    pub right_transform: Option<DenseMatrix<R>>,
    /// Rank of the matrix.
    pub rank: usize,
}

/// Result of Hermite normal form computation.
#[derive(Clone, Debug)]
pub struct HermiteNormalForm<R> {
    /// The row-style Hermite form H = U * A.
    pub form: DenseMatrix<R>,
    /// The invertible transform U.
    pub transform: DenseMatrix<R>,
    /// Pivot columns of H.
    pub pivots: Pivots,
}

/// The working matrix plus the transforms that record every operation.
struct Tracked<R> {
    a: DenseMatrix<R>,
    u: Option<DenseMatrix<R>>,
    v: Option<DenseMatrix<R>>,
}

impl<R: EuclideanDomain> Tracked<R> {
    fn swap_rows(&mut self, i: usize, j: usize) {
        let cols = self.a.num_cols();
        self.a.swap_rows_raw(i, j, 0..cols);
        if let Some(u) = self.u.as_mut() {
            let n = u.num_cols();
            u.swap_rows_raw(i, j, 0..n);
        }
    }

    fn swap_cols(&mut self, i: usize, j: usize) {
        let rows = self.a.num_rows();
        self.a.swap_cols_raw(i, j, 0..rows);
        if let Some(v) = self.v.as_mut() {
            let n = v.num_rows();
            v.swap_cols_raw(i, j, 0..n);
        }
    }

    fn add_scaled_row(&mut self, target: usize, source: usize, k: &R) {
        let cols = self.a.num_cols();
        self.a.add_scaled_row_raw(target, source, k, 0..cols);
        if let Some(u) = self.u.as_mut() {
            let n = u.num_cols();
            u.add_scaled_row_raw(target, source, k, 0..n);
        }
    }

    fn add_scaled_col(&mut self, target: usize, source: usize, k: &R) {
        let rows = self.a.num_rows();
        self.a.add_scaled_col_raw(target, source, k, 0..rows);
        if let Some(v) = self.v.as_mut() {
            let n = v.num_rows();
            v.add_scaled_col_raw(target, source, k, 0..n);
        }
    }

    fn scale_row(&mut self, row: usize, k: &R) {
        let cols = self.a.num_cols();
        self.a.scale_row_raw(row, k, 0..cols);
        if let Some(u) = self.u.as_mut() {
            let n = u.num_cols();
            u.scale_row_raw(row, k, 0..n);
        }
    }

    /// Euclid on column `col` over rows `row..`, leaving a single non-zero
    /// entry at `(row, col)`.
    fn clear_column(&mut self, row: usize, col: usize) -> bool {
        let rows = self.a.num_rows();
        let mut swapped = false;
        for i in row + 1..rows {
            while !self.a[(i, col)].is_zero() {
                let (q, r) = self.a[(i, col)].div_rem(&self.a[(row, col)]);
                self.add_scaled_row(i, row, &-q);
                if !r.is_zero() {
                    self.swap_rows(i, row);
                    swapped = true;
                }
            }
        }
        swapped
    }

    /// Column analogue of [`Self::clear_column`].
    fn clear_row(&mut self, row: usize, col: usize) -> bool {
        let cols = self.a.num_cols();
        let mut swapped = false;
        for j in col + 1..cols {
            while !self.a[(row, j)].is_zero() {
                let (q, r) = self.a[(row, j)].div_rem(&self.a[(row, col)]);
                self.add_scaled_col(j, col, &-q);
                if !r.is_zero() {
                    self.swap_cols(j, col);
                    swapped = true;
                }
            }
        }
        swapped
    }

    /// First entry of the trailing block not divisible by the pivot.
    fn find_indivisible(&self, k: usize) -> Option<usize> {
        let (rows, cols) = self.a.shape();
        let pivot = &self.a[(k, k)];
        (k + 1..rows).find(|&i| (k + 1..cols).any(|j| !self.a[(i, j)].is_divisible_by(pivot)))
    }
}

/// Finds a non-zero entry in the submatrix A[k:, k:].
fn find_pivot<R: EuclideanDomain>(a: &DenseMatrix<R>, k: usize) -> Option<(usize, usize)> {
    let (rows, cols) = a.shape();
    (k..rows)
        .flat_map(|i| (k..cols).map(move |j| (i, j)))
        .find(|&(i, j)| !a[(i, j)].is_zero())
}

/// Computes the Smith normal form of a matrix over a Euclidean domain.
#[must_use]
pub fn smith_normal_form<R: EuclideanDomain>(
    matrix: &DenseMatrix<R>,
    config: &SmithConfig,
) -> SmithNormalForm<R> {
    let (rows, cols) = matrix.shape();
    let mut t = Tracked {
        a: matrix.clone(),
        u: config.compute_transforms.then(|| DenseMatrix::identity(rows)),
        v: config.compute_transforms.then(|| DenseMatrix::identity(cols)),
    };

    let mut rank = 0;
    for k in 0..rows.min(cols) {
        let Some((pi, pj)) = find_pivot(&t.a, k) else {
            break;
        };
        t.swap_rows(k, pi);
        t.swap_cols(k, pj);

        loop {
            // A pass without swaps leaves row k and column k clear.
            while t.clear_column(k, k) | t.clear_row(k, k) {}

            match t.find_indivisible(k) {
                Some(i) => {
                    trace!(k, row = i, "pivot does not divide trailing block, merging rows");
                    t.add_scaled_row(k, i, &R::one());
                }
                None => break,
            }
        }

        let unit = t.a[(k, k)].canonical_unit();
        if !unit.is_one() {
            t.scale_row(k, &unit);
        }
        trace!(k, pivot = ?t.a[(k, k)], "invariant factor fixed");
        rank += 1;
    }

    let invariant_factors = (0..rank).map(|i| t.a[(i, i)].clone()).collect();
    SmithNormalForm {
        normal_form: t.a,
        invariant_factors,
        left_transform: t.u,
        right_transform: t.v,
        rank,
    }
}

/// Computes the row-style Hermite normal form H = U * A.
///
/// H is in row echelon form, every pivot is canonical (positive for the
/// integers, monic for polynomials) and every entry above a pivot is the
/// remainder of its division by that pivot.
#[must_use]
pub fn hermite_normal_form<R: EuclideanDomain>(matrix: &DenseMatrix<R>) -> HermiteNormalForm<R> {
    let (rows, cols) = matrix.shape();
    let mut t = Tracked {
        a: matrix.clone(),
        u: Some(DenseMatrix::identity(rows)),
        v: None,
    };
    let mut pivots = Pivots::new();
    let mut row = 0;

    for col in 0..cols {
        if row == rows {
            break;
        }
        let Some(found) = (row..rows).find(|&i| !t.a[(i, col)].is_zero()) else {
            continue;
        };
        t.swap_rows(row, found);
        while t.clear_column(row, col) {}

        let unit = t.a[(row, col)].canonical_unit();
        if !unit.is_one() {
            t.scale_row(row, &unit);
        }
        for above in 0..row {
            let q = t.a[(above, col)].div(&t.a[(row, col)]);
            if !q.is_zero() {
                t.add_scaled_row(above, row, &-q);
            }
        }

        pivots.push(col);
        row += 1;
    }

    let transform = t.u.unwrap_or_else(|| DenseMatrix::identity(rows));
    HermiteNormalForm {
        form: t.a,
        transform,
        pivots,
    }
}

/// Computes the determinant of the SNF (product of invariant factors).
///
/// For a square input of full rank this equals the determinant up to a unit.
#[must_use]
pub fn snf_determinant<R: EuclideanDomain>(snf: &SmithNormalForm<R>) -> R {
    snf.invariant_factors
        .iter()
        .fold(R::one(), |acc, d| acc * d.clone())
}

/// Checks if a matrix is in Smith normal form.
#[must_use]
pub fn is_snf<R: EuclideanDomain>(matrix: &DenseMatrix<R>) -> bool {
    let (m, n) = matrix.shape();
    let min_dim = m.min(n);

    let off_diagonal_zero =
        (0..m).all(|i| (0..n).all(|j| i == j || matrix[(i, j)].is_zero()));
    if !off_diagonal_zero {
        return false;
    }

    (0..min_dim.saturating_sub(1)).all(|i| {
        let d = &matrix[(i, i)];
        let next = &matrix[(i + 1, i + 1)];
        // zeros trail; a zero d only divides zero
        next.is_divisible_by(d)
    })
}

//! Dense matrix storage.
//!
//! `DenseMatrix` owns its entries in row-major order. Owning a matrix is
//! what grants the right to mutate it: the elementary operations and the
//! in-place reductions are only defined on `DenseMatrix`, never on the
//! read-only views of [`crate::view`].

use std::fmt;
use std::ops::{Index, IndexMut, Neg};

use tessera_rings::{Ring, UnitRing};

use crate::error::MatrixError;

/// Dense matrix stored in row-major order.
///
/// Both dimensions are always positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix<R> {
    /// Matrix entries in row-major order.
    data: Vec<R>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

fn assert_dims(num_rows: usize, num_cols: usize) {
    assert!(
        num_rows > 0 && num_cols > 0,
        "matrix dimensions must be positive, got {num_rows}x{num_cols}"
    );
}

impl<R: Ring> DenseMatrix<R> {
    /// Creates a new matrix filled with zeros.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        assert_dims(num_rows, num_cols);
        Self {
            data: vec![R::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from a 2D vector.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if there are no rows, no columns, or the rows
    /// have different lengths.
    pub fn from_rows(rows: Vec<Vec<R>>) -> Result<Self, MatrixError> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        if num_rows == 0 || num_cols == 0 {
            return Err(MatrixError::shape("from_rows", (num_rows, num_cols), (1, 1)));
        }
        if let Some(bad) = rows.iter().find(|row| row.len() != num_cols) {
            return Err(MatrixError::shape("from_rows", (num_rows, num_cols), (1, bad.len())));
        }

        Ok(Self {
            data: rows.into_iter().flatten().collect(),
            num_rows,
            num_cols,
        })
    }

    /// Creates a matrix from entries listed row by row.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if a dimension is zero or the number of
    /// entries is not `num_rows * num_cols`.
    pub fn from_flat(num_rows: usize, num_cols: usize, data: Vec<R>) -> Result<Self, MatrixError> {
        if num_rows == 0 || num_cols == 0 || data.len() != num_rows * num_cols {
            return Err(MatrixError::shape("from_flat", (num_rows, num_cols), (data.len(), 1)));
        }
        Ok(Self {
            data,
            num_rows,
            num_cols,
        })
    }

    /// Creates a matrix whose entry (i, j) is `f(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn from_fn(num_rows: usize, num_cols: usize, mut f: impl FnMut(usize, usize) -> R) -> Self {
        assert_dims(num_rows, num_cols);
        let mut data = Vec::with_capacity(num_rows * num_cols);
        for i in 0..num_rows {
            for j in 0..num_cols {
                data.push(f(i, j));
            }
        }
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Creates a square matrix with the given diagonal.
    ///
    /// # Panics
    ///
    /// Panics if `entries` is empty.
    #[must_use]
    pub fn diagonal(entries: Vec<R>) -> Self {
        let n = entries.len();
        let mut m = Self::zeros(n, n);
        for (i, value) in entries.into_iter().enumerate() {
            m[(i, i)] = value;
        }
        m
    }

    /// Creates an n x 1 matrix.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `entries` is empty.
    pub fn column_vector(entries: Vec<R>) -> Result<Self, MatrixError> {
        Self::from_flat(entries.len(), 1, entries)
    }

    /// Builds a matrix from vectors, placed as columns or as rows.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if there are no vectors, a vector is empty, or
    /// the vectors have different lengths.
    pub fn from_vectors(vectors: &[Vec<R>], as_column: bool) -> Result<Self, MatrixError> {
        let len = vectors.first().map_or(0, Vec::len);
        if vectors.is_empty() || len == 0 {
            return Err(MatrixError::shape("from_vectors", (vectors.len(), len), (1, 1)));
        }
        if let Some((index, bad)) = vectors.iter().enumerate().find(|(_, v)| v.len() != len) {
            return Err(MatrixError::shape("from_vectors", (index, len), (index, bad.len())));
        }
        let rows = Self::from_rows(vectors.to_vec())?;
        Ok(if as_column { rows.transpose() } else { rows })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns (rows, columns).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.num_rows, self.num_cols)
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    pub(crate) fn require_square(&self, operation: &'static str) -> Result<usize, MatrixError> {
        if self.is_square() {
            Ok(self.num_rows)
        } else {
            Err(MatrixError::shape(operation, self.shape(), (self.num_cols, self.num_rows)))
        }
    }

    pub(crate) fn check_index(
        &self,
        operation: &'static str,
        row: usize,
        col: usize,
    ) -> Result<(), MatrixError> {
        if row < self.num_rows && col < self.num_cols {
            Ok(())
        } else {
            Err(MatrixError::shape(operation, self.shape(), (row, col)))
        }
    }

    /// Returns a reference to the entry at (row, col).
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&R> {
        if row < self.num_rows && col < self.num_cols {
            Some(&self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a mutable reference to the entry at (row, col).
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut R> {
        if row < self.num_rows && col < self.num_cols {
            Some(&mut self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Overwrites the entry at (row, col).
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the index is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: R) -> Result<(), MatrixError> {
        self.check_index("set", row, col)?;
        self[(row, col)] = value;
        Ok(())
    }

    /// Returns a slice of the specified row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    #[must_use]
    pub fn row(&self, row: usize) -> &[R] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Returns a column as a vector.
    ///
    /// # Panics
    ///
    /// Panics if `col` is out of range.
    #[must_use]
    pub fn col(&self, col: usize) -> Vec<R> {
        assert!(col < self.num_cols, "column index out of range");
        (0..self.num_rows)
            .map(|row| self[(row, col)].clone())
            .collect()
    }

    /// Returns the entries in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[R] {
        &self.data
    }

    /// Returns the transpose of the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.num_cols, self.num_rows, |i, j| self[(j, i)].clone())
    }

    /// Applies `f` to every entry.
    #[must_use]
    pub fn map<S: Ring>(&self, f: impl FnMut(&R) -> S) -> DenseMatrix<S> {
        DenseMatrix {
            data: self.data.iter().map(f).collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }

    /// Scales all entries by a scalar.
    #[must_use]
    pub fn scale(&self, scalar: &R) -> Self {
        self.map(|v| v.clone() * scalar.clone())
    }

    /// Returns true if every entry is zero.
    #[must_use]
    pub fn is_zero_matrix(&self) -> bool {
        self.data.iter().all(R::is_zero)
    }

    /// Returns true for square matrices equal to their transpose.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.is_square()
            && (0..self.num_rows).all(|i| (0..i).all(|j| self[(i, j)] == self[(j, i)]))
    }

    /// Returns true if every entry below the main diagonal is zero.
    #[must_use]
    pub fn is_upper_triangular(&self) -> bool {
        (0..self.num_rows).all(|i| (0..i.min(self.num_cols)).all(|j| self[(i, j)].is_zero()))
    }

    fn zip_with(
        &self,
        other: &Self,
        operation: &'static str,
        f: impl Fn(R, R) -> R,
    ) -> Result<Self, MatrixError> {
        if self.shape() != other.shape() {
            return Err(MatrixError::shape(operation, self.shape(), other.shape()));
        }
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| f(a.clone(), b.clone()))
                .collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        })
    }

    /// Entry-wise sum.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` unless both matrices have the same shape.
    pub fn checked_add(&self, other: &Self) -> Result<Self, MatrixError> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Entry-wise difference.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` unless both matrices have the same shape.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, MatrixError> {
        self.zip_with(other, "sub", |a, b| a - b)
    }

    /// Matrix-vector multiply: y = A * x.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `x.len()` differs from the column count.
    pub fn mv(&self, x: &[R]) -> Result<Vec<R>, MatrixError> {
        if x.len() != self.num_cols {
            return Err(MatrixError::shape("mv", self.shape(), (x.len(), 1)));
        }
        Ok((0..self.num_rows)
            .map(|row| {
                self.row(row)
                    .iter()
                    .zip(x.iter())
                    .fold(R::zero(), |acc, (a, b)| acc + a.clone() * b.clone())
            })
            .collect())
    }

    /// Matrix-matrix multiply: C = A * B.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the inner dimensions differ.
    pub fn mm(&self, other: &Self) -> Result<Self, MatrixError> {
        if self.num_cols != other.num_rows {
            return Err(MatrixError::shape("mm", self.shape(), other.shape()));
        }

        let mut result = Self::zeros(self.num_rows, other.num_cols);
        for i in 0..self.num_rows {
            for k in 0..self.num_cols {
                let a = &self[(i, k)];
                if a.is_zero() {
                    continue;
                }
                for j in 0..other.num_cols {
                    result[(i, j)] = result[(i, j)].clone() + a.clone() * other[(k, j)].clone();
                }
            }
        }
        Ok(result)
    }

    /// Sum of the diagonal entries.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices.
    pub fn trace(&self) -> Result<R, MatrixError> {
        let n = self.require_square("trace")?;
        Ok((0..n).fold(R::zero(), |acc, i| acc + self[(i, i)].clone()))
    }

    /// Horizontal concatenation `[self | other]`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the row counts differ.
    pub fn concat_column(&self, other: &Self) -> Result<Self, MatrixError> {
        if self.num_rows != other.num_rows {
            return Err(MatrixError::shape("concat_column", self.shape(), other.shape()));
        }
        let left = self.num_cols;
        Ok(Self::from_fn(self.num_rows, left + other.num_cols, |i, j| {
            if j < left {
                self[(i, j)].clone()
            } else {
                other[(i, j - left)].clone()
            }
        }))
    }

    /// Vertical concatenation: `other` is placed below `self`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the column counts differ.
    pub fn concat_row(&self, other: &Self) -> Result<Self, MatrixError> {
        if self.num_cols != other.num_cols {
            return Err(MatrixError::shape("concat_row", self.shape(), other.shape()));
        }
        let mut data = self.data.clone();
        data.extend(other.data.iter().cloned());
        Ok(Self {
            data,
            num_rows: self.num_rows + other.num_rows,
            num_cols: self.num_cols,
        })
    }

    /// Kronecker (tensor) product.
    #[must_use]
    pub fn kronecker(&self, other: &Self) -> Self {
        let (p, q) = other.shape();
        Self::from_fn(self.num_rows * p, self.num_cols * q, |i, j| {
            self[(i / p, j / q)].clone() * other[(i % p, j % q)].clone()
        })
    }

    pub(crate) fn swap_entries(&mut self, a: (usize, usize), b: (usize, usize)) {
        let ia = a.0 * self.num_cols + a.1;
        let ib = b.0 * self.num_cols + b.1;
        self.data.swap(ia, ib);
    }
}

impl<R: UnitRing> DenseMatrix<R> {
    /// Creates an identity matrix.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = R::one();
        }
        m
    }

    /// Returns true if this is an identity matrix.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.is_square()
            && (0..self.num_rows).all(|i| {
                (0..self.num_cols).all(|j| {
                    if i == j {
                        self[(i, j)].is_one()
                    } else {
                        self[(i, j)].is_zero()
                    }
                })
            })
    }

    /// Raises a square matrix to a non-negative power by repeated squaring.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for non-square matrices and `ZeroExponent`
    /// for the zero matrix to the zeroth power.
    pub fn pow(&self, exp: u32) -> Result<Self, MatrixError> {
        let n = self.require_square("pow")?;
        if exp == 0 {
            if self.is_zero_matrix() {
                return Err(MatrixError::ZeroExponent);
            }
            return Ok(Self::identity(n));
        }

        let mut result: Option<Self> = None;
        let mut base = self.clone();
        let mut e = exp;
        loop {
            if e & 1 == 1 {
                result = Some(match result {
                    Some(r) => r.mm(&base)?,
                    None => base.clone(),
                });
            }
            e >>= 1;
            if e == 0 {
                break;
            }
            base = base.mm(&base)?;
        }
        Ok(result.unwrap_or_else(|| Self::identity(n)))
    }
}

impl<R> Index<(usize, usize)> for DenseMatrix<R> {
    type Output = R;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.num_rows && col < self.num_cols, "matrix index out of range");
        &self.data[row * self.num_cols + col]
    }
}

impl<R> IndexMut<(usize, usize)> for DenseMatrix<R> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(row < self.num_rows && col < self.num_cols, "matrix index out of range");
        &mut self.data[row * self.num_cols + col]
    }
}

impl<R: Ring> Neg for DenseMatrix<R> {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        for v in &mut self.data {
            *v = -v.clone();
        }
        self
    }
}

impl<R: Ring> Neg for &DenseMatrix<R> {
    type Output = DenseMatrix<R>;

    fn neg(self) -> Self::Output {
        self.map(|v| -v.clone())
    }
}

impl<R: fmt::Display> fmt::Display for DenseMatrix<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.num_rows {
            write!(f, "[")?;
            for j in 0..self.num_cols {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.data[i * self.num_cols + j])?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

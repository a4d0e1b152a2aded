//! Read-only matrix views.
//!
//! A view re-indexes a matrix it borrows and never copies entries. Views
//! implement the same [`MatrixRead`] contract as [`DenseMatrix`], so they
//! compose: the cofactor of a transposed sub-matrix is three borrows deep
//! and still costs nothing until it is read. The borrow ties every view to
//! the lifetime of its backing matrix, and since views only hand out shared
//! references the engine can never mutate through one.

use std::ops::Range;

use tessera_rings::Ring;

use crate::dense_matrix::DenseMatrix;
use crate::error::MatrixError;

/// Read access shared by owned matrices and views.
pub trait MatrixRead<R: Ring> {
    /// Number of rows.
    fn num_rows(&self) -> usize;

    /// Number of columns.
    fn num_cols(&self) -> usize;

    /// The entry at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    fn entry(&self, row: usize, col: usize) -> &R;

    /// Copies the entries into a new owned matrix.
    fn to_dense(&self) -> DenseMatrix<R> {
        DenseMatrix::from_fn(self.num_rows(), self.num_cols(), |i, j| {
            self.entry(i, j).clone()
        })
    }

    /// Value-wise equality with any other readable matrix.
    fn values_eq<M: MatrixRead<R> + ?Sized>(&self, other: &M) -> bool {
        self.num_rows() == other.num_rows()
            && self.num_cols() == other.num_cols()
            && (0..self.num_rows())
                .all(|i| (0..self.num_cols()).all(|j| self.entry(i, j) == other.entry(i, j)))
    }

    /// A transposed view.
    fn transposed(&self) -> Transpose<'_, Self>
    where
        Self: Sized,
    {
        Transpose { inner: self }
    }

    /// A view of the contiguous block `rows x cols`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for empty or out-of-range ranges.
    fn sub_matrix(
        &self,
        rows: Range<usize>,
        cols: Range<usize>,
    ) -> Result<SubMatrix<'_, Self>, MatrixError>
    where
        Self: Sized,
    {
        if rows.is_empty()
            || cols.is_empty()
            || rows.end > self.num_rows()
            || cols.end > self.num_cols()
        {
            return Err(MatrixError::shape(
                "sub_matrix",
                (self.num_rows(), self.num_cols()),
                (rows.end, cols.end),
            ));
        }
        Ok(SubMatrix {
            inner: self,
            row_offset: rows.start,
            col_offset: cols.start,
            num_rows: rows.len(),
            num_cols: cols.len(),
        })
    }

    /// A view selecting the given rows and columns, in the given order.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if a selection is empty or out of range.
    fn factor(&self, rows: Vec<usize>, cols: Vec<usize>) -> Result<Factor<'_, Self>, MatrixError>
    where
        Self: Sized,
    {
        let bad_row = rows.iter().copied().find(|&i| i >= self.num_rows());
        let bad_col = cols.iter().copied().find(|&j| j >= self.num_cols());
        if rows.is_empty() || cols.is_empty() || bad_row.is_some() || bad_col.is_some() {
            return Err(MatrixError::shape(
                "factor",
                (self.num_rows(), self.num_cols()),
                (bad_row.unwrap_or(0), bad_col.unwrap_or(0)),
            ));
        }
        Ok(Factor {
            inner: self,
            rows,
            cols,
        })
    }

    /// A view with one row and one column deleted.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the index is out of range or the result
    /// would be empty.
    fn cofactor(&self, row: usize, col: usize) -> Result<Cofactor<'_, Self>, MatrixError>
    where
        Self: Sized,
    {
        if row >= self.num_rows()
            || col >= self.num_cols()
            || self.num_rows() < 2
            || self.num_cols() < 2
        {
            return Err(MatrixError::shape(
                "cofactor",
                (self.num_rows(), self.num_cols()),
                (row, col),
            ));
        }
        Ok(Cofactor {
            inner: self,
            row,
            col,
        })
    }
}

impl<R: Ring> MatrixRead<R> for DenseMatrix<R> {
    fn num_rows(&self) -> usize {
        DenseMatrix::num_rows(self)
    }

    fn num_cols(&self) -> usize {
        DenseMatrix::num_cols(self)
    }

    fn entry(&self, row: usize, col: usize) -> &R {
        &self[(row, col)]
    }

    fn to_dense(&self) -> DenseMatrix<R> {
        self.clone()
    }
}

/// Transposed view.
#[derive(Debug)]
pub struct Transpose<'a, M> {
    inner: &'a M,
}

impl<R: Ring, M: MatrixRead<R>> MatrixRead<R> for Transpose<'_, M> {
    fn num_rows(&self) -> usize {
        self.inner.num_cols()
    }

    fn num_cols(&self) -> usize {
        self.inner.num_rows()
    }

    fn entry(&self, row: usize, col: usize) -> &R {
        self.inner.entry(col, row)
    }
}

/// Contiguous block view.
#[derive(Debug)]
pub struct SubMatrix<'a, M> {
    inner: &'a M,
    row_offset: usize,
    col_offset: usize,
    num_rows: usize,
    num_cols: usize,
}

impl<R: Ring, M: MatrixRead<R>> MatrixRead<R> for SubMatrix<'_, M> {
    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn entry(&self, row: usize, col: usize) -> &R {
        assert!(row < self.num_rows && col < self.num_cols, "sub-matrix index out of range");
        self.inner.entry(row + self.row_offset, col + self.col_offset)
    }
}

/// Row and column selection view.
///
/// # Panics
///
/// [`MatrixRead::entry`] panics if the index is past the selected rows or
/// columns.
#[derive(Debug)]
pub struct Factor<'a, M> {
    inner: &'a M,
    rows: Vec<usize>,
    cols: Vec<usize>,
}

impl<R: Ring, M: MatrixRead<R>> MatrixRead<R> for Factor<'_, M> {
    fn num_rows(&self) -> usize {
        self.rows.len()
    }

    fn num_cols(&self) -> usize {
        self.cols.len()
    }

    fn entry(&self, row: usize, col: usize) -> &R {
        assert!(row < self.rows.len() && col < self.cols.len(), "factor index out of range");
        self.inner.entry(self.rows[row], self.cols[col])
    }
}

/// View with one row and one column deleted.
///
/// # Panics
///
/// [`MatrixRead::entry`] panics if the index is outside the reduced shape.
#[derive(Debug)]
pub struct Cofactor<'a, M> {
    inner: &'a M,
    row: usize,
    col: usize,
}

impl<R: Ring, M: MatrixRead<R>> MatrixRead<R> for Cofactor<'_, M> {
    fn num_rows(&self) -> usize {
        self.inner.num_rows() - 1
    }

    fn num_cols(&self) -> usize {
        self.inner.num_cols() - 1
    }

    fn entry(&self, row: usize, col: usize) -> &R {
        assert!(
            row + 1 < self.inner.num_rows() && col + 1 < self.inner.num_cols(),
            "cofactor index out of range"
        );
        let i = if row < self.row { row } else { row + 1 };
        let j = if col < self.col { col } else { col + 1 };
        self.inner.entry(i, j)
    }
}

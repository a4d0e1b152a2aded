//! Elementary row and column operations.
//!
//! The public operations check their indices and return `ShapeMismatch`
//! instead of panicking. Each one has an `_in` variant that restricts the
//! span to a range of columns (for row operations) or rows (for column
//! operations), which the reductions use to skip prefixes that are already
//! zero. The unchecked `pub(crate)` forms are what the algorithms call in
//! their inner loops after validating shapes once.

use std::ops::Range;

use tessera_rings::{Field, Ring};

use crate::dense_matrix::DenseMatrix;
use crate::error::MatrixError;

impl<R: Ring> DenseMatrix<R> {
    fn check_rows(&self, operation: &'static str, a: usize, b: usize) -> Result<(), MatrixError> {
        let n = self.num_rows();
        if a < n && b < n {
            Ok(())
        } else {
            Err(MatrixError::shape(operation, self.shape(), (a.max(b), 0)))
        }
    }

    fn check_cols(&self, operation: &'static str, a: usize, b: usize) -> Result<(), MatrixError> {
        let n = self.num_cols();
        if a < n && b < n {
            Ok(())
        } else {
            Err(MatrixError::shape(operation, self.shape(), (0, a.max(b))))
        }
    }

    fn check_span(
        operation: &'static str,
        shape: (usize, usize),
        span: &Range<usize>,
        limit: usize,
    ) -> Result<(), MatrixError> {
        if span.start <= span.end && span.end <= limit {
            Ok(())
        } else {
            Err(MatrixError::shape(operation, shape, (span.start, span.end)))
        }
    }

    /// Swaps two rows.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if either row is out of range.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<(), MatrixError> {
        self.check_rows("swap_rows", a, b)?;
        self.swap_rows_raw(a, b, 0..self.num_cols());
        Ok(())
    }

    /// Swaps two rows within a column span.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for out-of-range rows or span.
    pub fn swap_rows_in(&mut self, a: usize, b: usize, span: Range<usize>) -> Result<(), MatrixError> {
        self.check_rows("swap_rows", a, b)?;
        Self::check_span("swap_rows", self.shape(), &span, self.num_cols())?;
        self.swap_rows_raw(a, b, span);
        Ok(())
    }

    /// Swaps two columns.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if either column is out of range.
    pub fn swap_cols(&mut self, a: usize, b: usize) -> Result<(), MatrixError> {
        self.check_cols("swap_cols", a, b)?;
        self.swap_cols_raw(a, b, 0..self.num_rows());
        Ok(())
    }

    /// Swaps two columns within a row span.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for out-of-range columns or span.
    pub fn swap_cols_in(&mut self, a: usize, b: usize, span: Range<usize>) -> Result<(), MatrixError> {
        self.check_cols("swap_cols", a, b)?;
        Self::check_span("swap_cols", self.shape(), &span, self.num_rows())?;
        self.swap_cols_raw(a, b, span);
        Ok(())
    }

    /// Multiplies a row by a scalar.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the row is out of range.
    pub fn scale_row(&mut self, row: usize, k: &R) -> Result<(), MatrixError> {
        self.check_rows("scale_row", row, row)?;
        self.scale_row_raw(row, k, 0..self.num_cols());
        Ok(())
    }

    /// Multiplies part of a row by a scalar.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for an out-of-range row or span.
    pub fn scale_row_in(&mut self, row: usize, k: &R, span: Range<usize>) -> Result<(), MatrixError> {
        self.check_rows("scale_row", row, row)?;
        Self::check_span("scale_row", self.shape(), &span, self.num_cols())?;
        self.scale_row_raw(row, k, span);
        Ok(())
    }

    /// Multiplies a column by a scalar.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the column is out of range.
    pub fn scale_col(&mut self, col: usize, k: &R) -> Result<(), MatrixError> {
        self.check_cols("scale_col", col, col)?;
        self.scale_col_raw(col, k, 0..self.num_rows());
        Ok(())
    }

    /// Multiplies part of a column by a scalar.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for an out-of-range column or span.
    pub fn scale_col_in(&mut self, col: usize, k: &R, span: Range<usize>) -> Result<(), MatrixError> {
        self.check_cols("scale_col", col, col)?;
        Self::check_span("scale_col", self.shape(), &span, self.num_rows())?;
        self.scale_col_raw(col, k, span);
        Ok(())
    }

    /// Adds `k` times row `source` to row `target`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if either row is out of range.
    pub fn add_scaled_row(&mut self, target: usize, source: usize, k: &R) -> Result<(), MatrixError> {
        self.check_rows("add_scaled_row", target, source)?;
        self.add_scaled_row_raw(target, source, k, 0..self.num_cols());
        Ok(())
    }

    /// Adds `k` times row `source` to row `target` within a column span.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for out-of-range rows or span.
    pub fn add_scaled_row_in(
        &mut self,
        target: usize,
        source: usize,
        k: &R,
        span: Range<usize>,
    ) -> Result<(), MatrixError> {
        self.check_rows("add_scaled_row", target, source)?;
        Self::check_span("add_scaled_row", self.shape(), &span, self.num_cols())?;
        self.add_scaled_row_raw(target, source, k, span);
        Ok(())
    }

    /// Adds `k` times column `source` to column `target`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if either column is out of range.
    pub fn add_scaled_col(&mut self, target: usize, source: usize, k: &R) -> Result<(), MatrixError> {
        self.check_cols("add_scaled_col", target, source)?;
        self.add_scaled_col_raw(target, source, k, 0..self.num_rows());
        Ok(())
    }

    /// Adds `k` times column `source` to column `target` within a row span.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for out-of-range columns or span.
    pub fn add_scaled_col_in(
        &mut self,
        target: usize,
        source: usize,
        k: &R,
        span: Range<usize>,
    ) -> Result<(), MatrixError> {
        self.check_cols("add_scaled_col", target, source)?;
        Self::check_span("add_scaled_col", self.shape(), &span, self.num_rows())?;
        self.add_scaled_col_raw(target, source, k, span);
        Ok(())
    }

    pub(crate) fn swap_rows_raw(&mut self, a: usize, b: usize, span: Range<usize>) {
        if a == b {
            return;
        }
        for j in span {
            self.swap_entries((a, j), (b, j));
        }
    }

    pub(crate) fn swap_cols_raw(&mut self, a: usize, b: usize, span: Range<usize>) {
        if a == b {
            return;
        }
        for i in span {
            self.swap_entries((i, a), (i, b));
        }
    }

    pub(crate) fn scale_row_raw(&mut self, row: usize, k: &R, span: Range<usize>) {
        for j in span {
            self[(row, j)] = self[(row, j)].clone() * k.clone();
        }
    }

    pub(crate) fn scale_col_raw(&mut self, col: usize, k: &R, span: Range<usize>) {
        for i in span {
            self[(i, col)] = self[(i, col)].clone() * k.clone();
        }
    }

    pub(crate) fn add_scaled_row_raw(&mut self, target: usize, source: usize, k: &R, span: Range<usize>) {
        if k.is_zero() {
            return;
        }
        for j in span {
            let delta = k.clone() * self[(source, j)].clone();
            self[(target, j)] = self[(target, j)].clone() + delta;
        }
    }

    pub(crate) fn add_scaled_col_raw(&mut self, target: usize, source: usize, k: &R, span: Range<usize>) {
        if k.is_zero() {
            return;
        }
        for i in span {
            let delta = k.clone() * self[(i, source)].clone();
            self[(i, target)] = self[(i, target)].clone() + delta;
        }
    }
}

impl<F: Field> DenseMatrix<F> {
    /// Divides a row by a non-zero scalar.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` for an out-of-range row and `NotInvertible`
    /// if `k` is zero.
    pub fn divide_row(&mut self, row: usize, k: &F) -> Result<(), MatrixError> {
        self.check_rows("divide_row", row, row)?;
        let inv = k.inv().ok_or(MatrixError::NotInvertible)?;
        self.scale_row_raw(row, &inv, 0..self.num_cols());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_rings::{UnitRing, Q, Z};

    fn sample() -> DenseMatrix<Z> {
        DenseMatrix::from_fn(2, 3, |i, j| Z::new((3 * i + j + 1) as i64))
    }

    #[test]
    fn test_swaps() {
        let mut m = sample();
        m.swap_rows(0, 1).unwrap();
        assert_eq!(m.row(0), &[Z::new(4), Z::new(5), Z::new(6)]);
        m.swap_cols(0, 2).unwrap();
        assert_eq!(m.col(0), vec![Z::new(6), Z::new(3)]);
        assert!(m.swap_rows(0, 2).is_err());
        assert!(m.swap_cols(3, 0).is_err());
    }

    #[test]
    fn test_swap_rows_in_span() {
        let mut m = sample();
        m.swap_rows_in(0, 1, 1..3).unwrap();
        assert_eq!(m.row(0), &[Z::new(1), Z::new(5), Z::new(6)]);
        assert!(m.swap_rows_in(0, 1, 2..4).is_err());
    }

    #[test]
    fn test_scale_and_add() {
        let mut m = sample();
        m.scale_row(0, &Z::new(2)).unwrap();
        assert_eq!(m.row(0), &[Z::new(2), Z::new(4), Z::new(6)]);

        // row1 += -2 * row0
        m.add_scaled_row(1, 0, &Z::new(-2)).unwrap();
        assert_eq!(m.row(1), &[Z::new(0), Z::new(-3), Z::new(-6)]);

        // col2 += -3 * col0
        m.add_scaled_col(2, 0, &Z::new(-3)).unwrap();
        assert_eq!(m.col(2), vec![Z::new(0), Z::new(-6)]);

        m.scale_col_in(1, &Z::new(0), 1..2).unwrap();
        assert_eq!(m.col(1), vec![Z::new(4), Z::new(0)]);
    }

    #[test]
    fn test_add_scaled_row_in_leaves_prefix() {
        let mut m = sample();
        m.add_scaled_row_in(1, 0, &Z::new(1), 2..3).unwrap();
        assert_eq!(m.row(1), &[Z::new(4), Z::new(5), Z::new(9)]);
    }

    #[test]
    fn test_divide_row() {
        let mut m: DenseMatrix<Q> = sample().map(|z| Q::from(z.clone()));
        m.divide_row(1, &Q::from_integer(4)).unwrap();
        assert_eq!(m.row(1), &[Q::one(), Q::new(5, 4), Q::new(3, 2)]);
        assert_eq!(m.divide_row(0, &Q::zero()), Err(MatrixError::NotInvertible));
    }
}

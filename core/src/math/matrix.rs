use crate::prelude::{MatrixError, MatrixResult};
use ndarray::{Array2, ArrayView2};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Dense row-major matrix of `f64` backed by one contiguous buffer.
///
/// Element `(row, col)` lives at `row * cols + col`. The shape is fixed at
/// construction. Storage is released on drop.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Allocates a zero-filled `rows x cols` matrix in a single request.
    ///
    /// Either the whole buffer is obtained or nothing is held and
    /// [`MatrixError::AllocationFailure`] is returned.
    pub fn allocate(rows: usize, cols: usize) -> MatrixResult<Self> {
        let len = rows
            .checked_mul(cols)
            .ok_or(MatrixError::AllocationFailure { rows, cols })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| MatrixError::AllocationFailure { rows, cols })?;
        data.resize(len, 0.0);
        Ok(Self { rows, cols, data })
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> MatrixResult<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(MatrixError::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from row slices. All rows must share one length.
    pub fn from_rows(rows: &[&[f64]]) -> MatrixResult<Self> {
        let cols = rows.first().map_or(0, |row| row.len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(MatrixError::ShapeMismatch {
                    rows: rows.len(),
                    cols,
                    len: data.len() + row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::from_vec(rows.len(), cols, data)
    }

    /// Copies an ndarray matrix into row-major storage, for callers that
    /// already hold their operands as `Array2`.
    pub fn from_array(array: Array2<f64>) -> Self {
        let (rows, cols) = array.dim();
        let data = array.iter().copied().collect();
        Self { rows, cols, data }
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn n_cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Contiguous slice of one row. Panics if `row >= n_rows`.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> MatrixResult<()> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Borrowed ndarray view over the same buffer, for handing a parsed
    /// matrix to ndarray-based code without copying.
    pub fn view(&self) -> MatrixResult<ArrayView2<'_, f64>> {
        ArrayView2::from_shape((self.rows, self.cols), &self.data).map_err(|_| {
            MatrixError::ShapeMismatch {
                rows: self.rows,
                cols: self.cols,
                len: self.data.len(),
            }
        })
    }
}

// Fast-path access: the column is only asserted in debug builds, an
// out-of-range flat offset still panics through the Vec index.
impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        debug_assert!(col < self.cols, "column {} out of {}", col, self.cols);
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        debug_assert!(col < self.cols, "column {} out of {}", col, self.cols);
        &mut self.data[row * self.cols + col]
    }
}

/// Diagnostic pretty-print: a shape header followed by one line per row.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows = {}, cols = {}", self.rows, self.cols)?;
        for row in 0..self.rows {
            for value in self.row(row) {
                write!(f, "{:.6} ", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

use serde::{Serialize, Deserialize};
use std::ops::{AddAssign, Index, IndexMut, Sub};

use crate::error::{RbmError, Result};
use crate::sampling::stream::RandomStream;

/// Dense row-major matrix backed by a single contiguous buffer.
///
/// The shape is fixed at construction; nothing in the crate resizes a matrix
/// after it has been allocated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Allocates a zero-filled `rows x cols` matrix, reporting exhaustion
    /// instead of aborting.
    pub fn try_zeros(rows: usize, cols: usize) -> Result<Matrix> {
        let len = rows
            .checked_mul(cols)
            .ok_or(RbmError::Allocation { rows, cols })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| RbmError::Allocation { rows, cols })?;
        data.resize(len, 0.0);

        Ok(Matrix { rows, cols, data })
    }

    /// Every cell drawn independently from N(0, 1), in row-major order.
    pub fn try_standard_normal(
        rows: usize,
        cols: usize,
        stream: &mut RandomStream,
    ) -> Result<Matrix> {
        let mut res = Matrix::try_zeros(rows, cols)?;
        for x in res.data.iter_mut() {
            *x = stream.standard_normal();
        }
        Ok(res)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, r: usize) -> &[f64] {
        let start = r * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterates column `c` from row 0 downwards.
    pub fn column(&self, c: usize) -> impl Iterator<Item = f64> + '_ {
        assert!(c < self.cols, "column {c} out of bounds for {} columns", self.cols);
        self.data.iter().skip(c).step_by(self.cols.max(1)).copied()
    }

    /// Row-major view of the whole buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| functor(x)).collect(),
        }
    }

    /// Row vectors, for callers that want the nested layout.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        assert!(
            r < self.rows && c < self.cols,
            "index ({r}, {c}) out of bounds for {}x{}",
            self.rows,
            self.cols
        );
        &self.data[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        assert!(
            r < self.rows && c < self.cols,
            "index ({r}, {c}) out of bounds for {}x{}",
            self.rows,
            self.cols
        );
        &mut self.data[r * self.cols + c]
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().zip(rhs.data.iter()).map(|(a, b)| a - b).collect(),
        }
    }
}

impl AddAssign<&Matrix> for Matrix {
    fn add_assign(&mut self, rhs: &Matrix) {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        for (a, b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a += b;
        }
    }
}

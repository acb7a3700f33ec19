//! Dense 2D matrices.
//!
//! `Matrix` is a flat, row-major `f64` buffer with explicit `rows`/`cols`.
//! Every arithmetic operation returns a newly allocated matrix; operands are
//! never aliased or mutated. The only in-place entry points are `set` and the
//! element accessors, so values flowing through the network keep value
//! semantics end to end.
//!
//! Shape rules are enforced at the API boundary with `Result`; per-element
//! access is a hot-path contract checked with `debug_assert!` only.

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    /// Row-major, `data.len() == rows * cols`.
    data: Vec<f64>,
}

impl Matrix {
    /// A `rows` x `cols` matrix filled with zeros.
    #[inline]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Build a matrix from a flat row-major buffer.
    ///
    /// Fails with [`Error::ShapeMismatch`] if `data.len() != rows * cols`.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix by evaluating `f` at every `(row, col)` position.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// A column vector (`values.len()` x 1).
    #[inline]
    pub fn from_column(values: &[f64]) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    /// Build a matrix from per-row slices of equal length.
    ///
    /// Fails with [`Error::InvalidData`] if `rows` is empty or ragged.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::InvalidData("rows must not be empty".to_owned()));
        }
        let cols = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::InvalidData(format!(
                    "row {i} has len {}, expected {cols}",
                    row.len()
                )));
            }
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The row-major backing buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Element at `(i, j)`.
    ///
    /// Out-of-range indices are the caller's responsibility; this is a
    /// hot-path accessor and only `debug_assert!`s the bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[i * self.cols + j]
    }

    /// Overwrite the element at `(i, j)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: f64) {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[i * self.cols + j] = v;
    }

    /// Elementwise sum. Requires identical shapes.
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        if self.shape() != other.shape() {
            return Err(Error::AddSubShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a + b)
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Elementwise difference. Requires identical shapes.
    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        if self.shape() != other.shape() {
            return Err(Error::AddSubShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a - b)
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Matrix product `self (m x n) · other (n x p) -> (m x p)`.
    ///
    /// Computed by definition, `out[i][j] = Σ_k self[i][k] · other[k][j]`.
    /// Requires `self.cols == other.rows`, else [`Error::MulShapeMismatch`].
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(Error::MulShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }

        let (m, n, p) = (self.rows, self.cols, other.cols);
        let mut data = vec![0.0; m * p];
        for i in 0..m {
            let a0 = i * n;
            for j in 0..p {
                let mut acc = 0.0_f64;
                for k in 0..n {
                    acc = self.data[a0 + k].mul_add(other.data[k * p + j], acc);
                }
                data[i * p + j] = acc;
            }
        }
        Ok(Matrix {
            rows: m,
            cols: p,
            data,
        })
    }

    /// Elementwise (Hadamard) product. Requires identical shapes.
    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix> {
        if self.shape() != other.shape() {
            return Err(Error::HadamardShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a * b)
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Elementwise scalar multiple.
    pub fn scale(&self, s: f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| v * s).collect(),
        }
    }

    /// A new matrix with swapped dimensions.
    ///
    /// Transposing twice reproduces the original exactly.
    pub fn transpose(&self) -> Matrix {
        let mut data = vec![0.0; self.rows * self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Apply a unary function positionally, returning a new matrix.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Add an n x 1 column vector to every column of this n x m matrix.
    ///
    /// Requires `vec.rows() == self.rows()` and `vec.cols() == 1`, else
    /// [`Error::BroadcastShapeMismatch`].
    pub fn add_broadcast_column(&self, vec: &Matrix) -> Result<Matrix> {
        if vec.rows != self.rows || vec.cols != 1 {
            return Err(Error::BroadcastShapeMismatch {
                left: self.shape(),
                right: vec.shape(),
            });
        }
        let mut data = Vec::with_capacity(self.data.len());
        for i in 0..self.rows {
            let b = vec.data[i];
            let row = i * self.cols;
            for j in 0..self.cols {
                data.push(self.data[row + j] + b);
            }
        }
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}

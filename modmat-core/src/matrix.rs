//! Dense row-major matrix of residues
//!
//! [`DenseMatrix`] owns its element buffer and caches the reduced sum of its
//! elements. The cache is computed whenever a matrix is built from new
//! contents; operations that only permute elements (transpose) carry it over.

use alloc::vec::Vec;

use crate::element::Residue;
use crate::error::{ModmatError, Result};

/// Compute `rows * cols` with overflow protection
pub(crate) fn checked_len(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or(ModmatError::ArraySizeOverflow)
}

/// Reserve an empty element buffer, reporting allocator failure instead of aborting
pub(crate) fn try_with_capacity(len: usize) -> Result<Vec<Residue>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| ModmatError::AllocationFailure)?;
    Ok(data)
}

/// Allocate a zeroed element buffer
pub(crate) fn try_alloc(len: usize) -> Result<Vec<Residue>> {
    let mut data = try_with_capacity(len)?;
    data.resize(len, Residue::ZERO);
    Ok(data)
}

/// Rectangular dense matrix over the integers modulo [`crate::MODULUS`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Residue>,
    aggregate: Residue,
}

impl DenseMatrix {
    /// Build a matrix from raw integers, reducing each into range
    ///
    /// `values` is read in row-major order and must hold exactly
    /// `rows * cols` entries.
    pub fn from_values(rows: usize, cols: usize, values: &[i64]) -> Result<Self> {
        let len = checked_len(rows, cols)?;
        if values.len() != len {
            return Err(ModmatError::DataLengthMismatch);
        }

        let mut data = try_with_capacity(len)?;
        data.extend(values.iter().map(|&v| Residue::new(v)));

        Ok(Self::from_parts(rows, cols, data))
    }

    /// Build a matrix from an already reduced row-major buffer
    pub fn from_residues(rows: usize, cols: usize, data: Vec<Residue>) -> Result<Self> {
        if data.len() != checked_len(rows, cols)? {
            return Err(ModmatError::DataLengthMismatch);
        }
        Ok(Self::from_parts(rows, cols, data))
    }

    /// Create a matrix of zeros
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let data = try_alloc(checked_len(rows, cols)?)?;
        Ok(Self {
            rows,
            cols,
            data,
            aggregate: Residue::ZERO,
        })
    }

    /// Wrap a buffer whose length is known to match, computing the aggregate
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<Residue>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        let aggregate = data.iter().sum();
        Self {
            rows,
            cols,
            data,
            aggregate,
        }
    }

    /// Wrap a buffer together with an aggregate that is already known
    pub(crate) fn with_aggregate(
        rows: usize,
        cols: usize,
        data: Vec<Residue>,
        aggregate: Residue,
    ) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self {
            rows,
            cols,
            data,
            aggregate,
        }
    }

    /// Clone the matrix, reporting allocator failure instead of aborting
    pub fn try_clone(&self) -> Result<Self> {
        let mut data = try_with_capacity(self.data.len())?;
        data.extend_from_slice(&self.data);
        Ok(Self::with_aggregate(self.rows, self.cols, data, self.aggregate))
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the matrix has no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when rows == cols
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Element at (row, col), or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Residue> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> Option<&[Residue]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    /// Iterate over rows in order
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[Residue]> + '_ {
        let cols = self.cols;
        (0..self.rows).map(move |r| &self.data[r * cols..(r + 1) * cols])
    }

    /// Row-major element buffer
    pub fn as_slice(&self) -> &[Residue] {
        &self.data
    }

    /// Row-major element buffer viewed as plain integers
    pub fn as_raw(&self) -> &[u32] {
        bytemuck::cast_slice(&self.data)
    }

    /// Reduced sum of all elements
    pub fn sum(&self) -> Residue {
        self.aggregate
    }
}

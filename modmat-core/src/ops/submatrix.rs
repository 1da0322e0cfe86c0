//! Submatrix extraction by explicit row and column index lists

use crate::error::{ModmatError, Result};
use crate::matrix::{checked_len, try_with_capacity, DenseMatrix};

/// Select rows and columns of `a` by index
///
/// The result has shape `row_indices.len() x col_indices.len()` with
/// `c[i][j] = a[row_indices[i]][col_indices[j]]`. Indices may repeat and
/// need not be sorted. Any index outside `a` fails with
/// [`ModmatError::IndexOutOfBounds`].
pub fn submatrix(
    a: &DenseMatrix,
    row_indices: &[usize],
    col_indices: &[usize],
) -> Result<DenseMatrix> {
    if row_indices.iter().any(|&r| r >= a.rows()) || col_indices.iter().any(|&c| c >= a.cols()) {
        return Err(ModmatError::IndexOutOfBounds);
    }

    let (rows, cols) = (row_indices.len(), col_indices.len());
    let mut data = try_with_capacity(checked_len(rows, cols)?)?;
    for &r in row_indices {
        let source = &a.as_slice()[r * a.cols()..(r + 1) * a.cols()];
        data.extend(col_indices.iter().map(|&c| source[c]));
    }

    Ok(DenseMatrix::from_parts(rows, cols, data))
}

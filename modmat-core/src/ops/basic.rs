//! Elementwise addition/subtraction and schoolbook multiplication

use alloc::vec::Vec;

use crate::element::Residue;
use crate::error::{ModmatError, Result};
use crate::matrix::{checked_len, try_alloc, try_with_capacity, DenseMatrix};

/// Combine two equal-length blocks element by element
///
/// Shapes are not checked here; callers inside the crate pass blocks they
/// built themselves.
fn zip_blocks<F>(a: &[Residue], b: &[Residue], op: F) -> Result<Vec<Residue>>
where
    F: Fn(Residue, Residue) -> Residue,
{
    debug_assert_eq!(a.len(), b.len());
    let mut out = try_with_capacity(a.len())?;
    out.extend(a.iter().zip(b).map(|(&x, &y)| op(x, y)));
    Ok(out)
}

/// Elementwise sum of two trusted blocks
pub(crate) fn add_blocks(a: &[Residue], b: &[Residue]) -> Result<Vec<Residue>> {
    zip_blocks(a, b, |x, y| x + y)
}

/// Elementwise difference of two trusted blocks
pub(crate) fn sub_blocks(a: &[Residue], b: &[Residue]) -> Result<Vec<Residue>> {
    zip_blocks(a, b, |x, y| x - y)
}

fn check_same_shape(a: &DenseMatrix, b: &DenseMatrix) -> Result<()> {
    if a.dimensions() != b.dimensions() {
        return Err(ModmatError::ShapeMismatch);
    }
    Ok(())
}

/// Elementwise sum `a + b`
///
/// Fails with [`ModmatError::ShapeMismatch`] if the operands differ in shape.
pub fn add(a: &DenseMatrix, b: &DenseMatrix) -> Result<DenseMatrix> {
    check_same_shape(a, b)?;
    let data = add_blocks(a.as_slice(), b.as_slice())?;
    Ok(DenseMatrix::from_parts(a.rows(), a.cols(), data))
}

/// Elementwise difference `a - b`
///
/// Fails with [`ModmatError::ShapeMismatch`] if the operands differ in shape.
pub fn subtract(a: &DenseMatrix, b: &DenseMatrix) -> Result<DenseMatrix> {
    check_same_shape(a, b)?;
    let data = sub_blocks(a.as_slice(), b.as_slice())?;
    Ok(DenseMatrix::from_parts(a.rows(), a.cols(), data))
}

/// Schoolbook product `a * b`
///
/// Requires `a.cols() == b.rows()`, otherwise fails with
/// [`ModmatError::DimensionMismatch`]. Each output row is accumulated in
/// `u64` and reduced once; every partial product is below `MODULUS^2`, so
/// the accumulator cannot wrap for any inner dimension that fits in memory.
pub fn multiply(a: &DenseMatrix, b: &DenseMatrix) -> Result<DenseMatrix> {
    if a.cols() != b.rows() {
        return Err(ModmatError::DimensionMismatch);
    }

    let (m, inner, n) = (a.rows(), a.cols(), b.cols());
    let mut data = try_alloc(checked_len(m, n)?)?;
    if n == 0 {
        return Ok(DenseMatrix::from_parts(m, n, data));
    }

    let mut acc: Vec<u64> = Vec::new();
    acc.try_reserve_exact(n)
        .map_err(|_| ModmatError::AllocationFailure)?;
    acc.resize(n, 0);

    let lhs = a.as_slice();
    let rhs = b.as_slice();

    for i in 0..m {
        acc.fill(0);
        for k in 0..inner {
            let aik = lhs[i * inner + k].wide();
            if aik == 0 {
                continue;
            }
            let b_row = &rhs[k * n..(k + 1) * n];
            for (slot, bkj) in acc.iter_mut().zip(b_row) {
                *slot += aik * bkj.wide();
            }
        }
        for (out, &sum) in data[i * n..(i + 1) * n].iter_mut().zip(&acc) {
            *out = Residue::from_unsigned(sum);
        }
    }

    Ok(DenseMatrix::from_parts(m, n, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: usize, cols: usize, values: &[i64]) -> DenseMatrix {
        DenseMatrix::from_values(rows, cols, values).unwrap()
    }

    #[test]
    fn test_multiply_small() {
        let a = matrix(2, 2, &[1, 2, 3, 4]);
        let b = matrix(2, 2, &[5, 6, 7, 8]);
        let c = multiply(&a, &b).unwrap();

        assert_eq!(c.as_raw(), &[19, 22, 43, 50]);
        assert_eq!(c.sum().value(), 134);
    }

    #[test]
    fn test_multiply_rectangular() {
        let a = matrix(2, 3, &[1, 2, 3, 4, 5, 6]);
        let b = matrix(3, 1, &[1, 0, -1]);
        let c = multiply(&a, &b).unwrap();

        assert_eq!(c.dimensions(), (2, 1));
        // 1 - 3 = -2 and 4 - 6 = -2, both reduce to MODULUS - 2
        assert_eq!(c.as_raw(), &[10005, 10005]);
        assert_eq!(c.sum().value(), 10003);
    }

    #[test]
    fn test_multiply_reduces() {
        let a = matrix(1, 2, &[10006, 10006]);
        let b = matrix(2, 1, &[10006, 10006]);
        // (-1)(-1) + (-1)(-1) = 2
        assert_eq!(multiply(&a, &b).unwrap().as_raw(), &[2]);
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = matrix(2, 3, &[0; 6]);
        let b = matrix(2, 3, &[0; 6]);
        assert_eq!(multiply(&a, &b), Err(ModmatError::DimensionMismatch));
    }

    #[test]
    fn test_multiply_degenerate_shapes() {
        let a = matrix(2, 0, &[]);
        let b = matrix(0, 3, &[]);
        let c = multiply(&a, &b).unwrap();
        assert_eq!(c.dimensions(), (2, 3));
        assert!(c.as_raw().iter().all(|&v| v == 0));

        let d = multiply(&b, &matrix(3, 0, &[])).unwrap();
        assert_eq!(d.dimensions(), (0, 0));
    }

    #[test]
    fn test_add_subtract() {
        let a = matrix(2, 2, &[10000, 1, 2, 3]);
        let b = matrix(2, 2, &[10, 1, 5, 0]);

        assert_eq!(add(&a, &b).unwrap().as_raw(), &[3, 2, 7, 3]);
        assert_eq!(subtract(&a, &b).unwrap().as_raw(), &[9990, 0, 10004, 3]);
        assert_eq!(add(&a, &b).unwrap().sum().value(), 15);
    }

    #[test]
    fn test_add_shape_mismatch() {
        let a = matrix(2, 2, &[0; 4]);
        let b = matrix(1, 4, &[0; 4]);
        assert_eq!(add(&a, &b), Err(ModmatError::ShapeMismatch));
        assert_eq!(subtract(&a, &b), Err(ModmatError::ShapeMismatch));
    }
}

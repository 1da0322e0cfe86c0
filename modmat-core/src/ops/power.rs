//! Matrix exponentiation by repeated squaring

use crate::error::{ModmatError, Result};
use crate::matrix::DenseMatrix;
use crate::ops::basic::multiply;

/// Raise a square matrix to a non-negative power
///
/// Uses `O(log exponent)` schoolbook multiplications. An exponent of `0`
/// returns a copy of `a` rather than the identity; `1` does the same.
///
/// Fails with [`ModmatError::InvalidExponent`] for negative exponents and
/// [`ModmatError::NotSquare`] for non-square input, checked in that order.
pub fn power(a: &DenseMatrix, exponent: i64) -> Result<DenseMatrix> {
    if exponent < 0 {
        return Err(ModmatError::InvalidExponent);
    }
    if !a.is_square() {
        return Err(ModmatError::NotSquare);
    }

    // acc * base^remaining == a^exponent holds on every iteration
    let mut acc = a.try_clone()?;
    let mut remaining = exponent.unsigned_abs().saturating_sub(1);
    if remaining == 0 {
        return Ok(acc);
    }

    let mut base = a.try_clone()?;
    while remaining > 0 {
        if remaining & 1 == 1 {
            acc = multiply(&acc, &base)?;
            remaining -= 1;
        } else {
            base = multiply(&base, &base)?;
            remaining >>= 1;
        }
    }

    Ok(acc)
}

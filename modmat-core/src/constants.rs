//! Arithmetic constants

/// Modulus every stored value is reduced by
pub const MODULUS: u32 = 10007;

/// Modulus widened to the accumulator type
pub const MODULUS_WIDE: i64 = MODULUS as i64;

//! Canonical modular reduction
//!
//! Every arithmetic path funnels through [`reduce`] so stored values stay in
//! `[0, MODULUS)` regardless of the sign or magnitude of the accumulator.

use crate::constants::{MODULUS, MODULUS_WIDE};

/// Reduce a wide integer into `[0, MODULUS)`
///
/// Negative remainders are shifted up by the modulus, so `reduce(-1)` is
/// `MODULUS - 1`.
pub const fn reduce(value: i64) -> u32 {
    value.rem_euclid(MODULUS_WIDE) as u32
}

/// Reduce an unsigned accumulator into `[0, MODULUS)`
pub const fn reduce_unsigned(value: u64) -> u32 {
    (value % MODULUS as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_range() {
        for value in [
            0,
            1,
            -1,
            10006,
            10007,
            10008,
            -10007,
            -10008,
            i64::MAX,
            i64::MIN,
        ] {
            let r = reduce(value);
            assert!(r < MODULUS, "reduce({value}) = {r}");
        }
    }

    #[test]
    fn test_reduce_values() {
        assert_eq!(reduce(10010), 3);
        assert_eq!(reduce(-1), 10006);
        assert_eq!(reduce(-10007), 0);
        assert_eq!(reduce(48), 48);
        assert_eq!(reduce_unsigned(10010), 3);
        assert_eq!(reduce_unsigned(u64::MAX), (u64::MAX % 10007) as u32);
    }

    #[test]
    fn test_reduce_periodic() {
        for value in -30_000i64..30_000 {
            assert_eq!(reduce(value), reduce(value + MODULUS_WIDE));
        }
    }
}

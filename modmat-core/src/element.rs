//! Residue element type
//!
//! A [`Residue`] is a `u32` known to lie in `[0, MODULUS)`. Arithmetic on
//! residues always reduces, so no operator can produce an out-of-range value.

use core::iter::Sum;
use core::ops::{Add, Mul, Sub};

use bytemuck::{NoUninit, Zeroable};

use crate::constants::MODULUS;
use crate::modular::{reduce, reduce_unsigned};

/// Integer modulo [`MODULUS`], stored as its canonical representative
///
/// Only `NoUninit` is derived: residues can be viewed as raw `u32`s, but
/// arbitrary bit patterns cannot be cast back into them.
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, NoUninit, Zeroable,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Residue(u32);

impl Residue {
    /// Additive identity
    pub const ZERO: Residue = Residue(0);

    /// Multiplicative identity
    pub const ONE: Residue = Residue(1);

    /// Reduce any signed value into a residue
    pub const fn new(value: i64) -> Self {
        Residue(reduce(value))
    }

    /// Reduce an unsigned accumulator into a residue
    pub const fn from_unsigned(value: u64) -> Self {
        Residue(reduce_unsigned(value))
    }

    /// Canonical representative in `[0, MODULUS)`
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Representative widened for accumulation
    pub const fn wide(self) -> u64 {
        self.0 as u64
    }
}

impl From<Residue> for u32 {
    fn from(residue: Residue) -> Self {
        residue.0
    }
}

impl From<i64> for Residue {
    fn from(value: i64) -> Self {
        Residue::new(value)
    }
}

impl Add for Residue {
    type Output = Residue;

    fn add(self, rhs: Residue) -> Residue {
        let sum = self.0 + rhs.0;
        Residue(if sum >= MODULUS { sum - MODULUS } else { sum })
    }
}

impl Sub for Residue {
    type Output = Residue;

    fn sub(self, rhs: Residue) -> Residue {
        let diff = self.0 + MODULUS - rhs.0;
        Residue(if diff >= MODULUS { diff - MODULUS } else { diff })
    }
}

impl Mul for Residue {
    type Output = Residue;

    fn mul(self, rhs: Residue) -> Residue {
        Residue::from_unsigned(self.wide() * rhs.wide())
    }
}

impl Sum for Residue {
    fn sum<I: Iterator<Item = Residue>>(iter: I) -> Residue {
        // Each term is below 2^14, so u64 holds 2^50 terms before wrapping.
        Residue::from_unsigned(iter.map(Residue::wide).sum())
    }
}

impl<'a> Sum<&'a Residue> for Residue {
    fn sum<I: Iterator<Item = &'a Residue>>(iter: I) -> Residue {
        iter.copied().sum()
    }
}

impl core::fmt::Display for Residue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

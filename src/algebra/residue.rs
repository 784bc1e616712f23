// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `Residue` type implementing arithmetic in the ring of integers modulo
//! an arbitrary-precision modulus chosen at runtime.

use std::fmt::{Display, Error, Formatter};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::AlgebraError;

/// An equivalence class of integers modulo `modulus`.
///
/// Unlike a compile-time modulus, the modulus here is discovered from data, so
/// it is stored alongside the canonical remainder in `[0, |modulus|)`. The
/// modulus need not be prime; [`Residue::invert`] returns `None` for classes
/// that are not units.
///
/// Combining residues with different moduli is a logic error and panics.
///
/// # Examples
/// ## Equality Modulo `modulus`
/// ```rust
/// use emergent_algebra::Residue;
/// use num_bigint::BigInt;
///
/// let five = BigInt::from(5);
/// assert_eq!(
///     Residue::new(&BigInt::from(8), &five).unwrap(),
///     Residue::new(&BigInt::from(-2), &five).unwrap()
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Residue {
    remainder: BigInt,
    modulus: BigInt,
}

impl Residue {
    /// Reduce `value` modulo `modulus`. Returns [`AlgebraError::ZeroModulus`]
    /// if `modulus` is zero; a negative modulus is replaced by its absolute
    /// value.
    pub fn new(value: &BigInt, modulus: &BigInt) -> Result<Self, AlgebraError> {
        if modulus.is_zero() {
            return Err(AlgebraError::ZeroModulus);
        }
        let modulus = modulus.abs();
        Ok(Self {
            remainder: value.mod_floor(&modulus),
            modulus,
        })
    }

    /// The canonical remainder in `[0, modulus)`.
    pub fn remainder(&self) -> &BigInt {
        &self.remainder
    }

    /// The (positive) modulus.
    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    /// Consume the residue, returning its canonical remainder.
    pub fn into_remainder(self) -> BigInt {
        self.remainder
    }

    /// Whether the class is a unit of the ring.
    pub fn is_invertible(&self) -> bool {
        self.remainder.gcd(&self.modulus).is_one()
    }

    /// The multiplicative inverse, if the class is a unit.
    pub fn invert(&self) -> Option<Self> {
        let extended = self.remainder.extended_gcd(&self.modulus);
        if !extended.gcd.is_one() {
            return None;
        }
        Some(Self {
            remainder: extended.x.mod_floor(&self.modulus),
            modulus: self.modulus.clone(),
        })
    }

    fn check_modulus(&self, rhs: &Self) {
        assert_eq!(
            self.modulus, rhs.modulus,
            "combining residues with different moduli"
        );
    }
}

impl Display for Residue {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} (mod {})", self.remainder, self.modulus)
    }
}

impl Neg for Residue {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            remainder: (-self.remainder).mod_floor(&self.modulus),
            modulus: self.modulus,
        }
    }
}

impl AddAssign for Residue {
    fn add_assign(&mut self, rhs: Self) {
        self.check_modulus(&rhs);
        self.remainder = (&self.remainder + rhs.remainder).mod_floor(&self.modulus);
    }
}

impl Add for Residue {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl SubAssign for Residue {
    fn sub_assign(&mut self, rhs: Self) {
        self.check_modulus(&rhs);
        self.remainder = (&self.remainder - rhs.remainder).mod_floor(&self.modulus);
    }
}

impl Sub for Residue {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self::Output {
        self -= rhs;
        self
    }
}

impl MulAssign for Residue {
    fn mul_assign(&mut self, rhs: Self) {
        self.check_modulus(&rhs);
        self.remainder = (&self.remainder * rhs.remainder).mod_floor(&self.modulus);
    }
}

impl Mul for Residue {
    type Output = Self;

    fn mul(mut self, rhs: Self) -> Self::Output {
        self *= rhs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residue(value: i64, modulus: i64) -> Residue {
        Residue::new(&BigInt::from(value), &BigInt::from(modulus)).unwrap()
    }

    #[test]
    fn construction() {
        assert_eq!(residue(-1, 7).remainder(), &BigInt::from(6));
        assert_eq!(residue(3, -5).modulus(), &BigInt::from(5));
        assert_eq!(
            Residue::new(&BigInt::from(3), &BigInt::zero()),
            Err(AlgebraError::ZeroModulus)
        );
    }

    #[test]
    fn negation() {
        assert_eq!(-residue(0, 7), residue(0, 7));
        assert_eq!(-residue(3, 5), residue(2, 5));
        assert_eq!(-residue(3, 2), residue(1, 2));
    }

    #[test]
    fn addition() {
        assert_eq!(residue(1, 5) + residue(2, 5), residue(3, 5));
        assert_eq!(residue(4, 3) + residue(2, 3), residue(0, 3));

        let mut a = residue(15, 11);
        a += residue(2, 11);
        assert_eq!(a, residue(6, 11));
    }

    #[test]
    fn subtraction() {
        assert_eq!(residue(11, 13) - residue(10, 13), residue(1, 13));
        assert_eq!(residue(0, 3) - residue(7, 3), residue(2, 3));

        let mut a = residue(11, 23);
        a -= residue(38, 23);
        assert_eq!(a, residue(19, 23));
    }

    #[test]
    fn multiplication() {
        assert_eq!(residue(4, 17) * residue(20, 17), residue(12, 17));
        assert_eq!(residue(61, 31) * residue(29, 31), residue(2, 31));

        let mut a = residue(21, 11);
        a *= residue(2, 11);
        assert_eq!(a, residue(9, 11));
        a *= residue(11, 11);
        assert_eq!(a, residue(0, 11));
    }

    #[test]
    fn inversion() {
        assert_eq!(residue(1, 2).invert(), Some(residue(1, 2)));
        assert_eq!(residue(3, 5).invert(), Some(residue(2, 5)));
        assert_eq!(residue(327, 541).invert(), Some(residue(316, 541)));
        assert!(residue(5, 6).is_invertible());
        assert!(!residue(2, 6).is_invertible());
        assert_eq!(residue(2, 6).invert(), None);
        assert_eq!(residue(0, 17).invert(), None);
    }

    #[test]
    fn arbitrary_precision() {
        let huge = BigInt::from(u64::MAX) * BigInt::from(u64::MAX);
        let a = Residue::new(&huge, &BigInt::from(7)).unwrap();
        // u64::MAX = 2^64 - 1 ≡ 1 (mod 7), so its square is 1 as well
        assert_eq!(a, residue(1, 7));
    }

    #[test]
    #[should_panic(expected = "combining residues with different moduli")]
    fn mismatched_moduli() {
        let _ = residue(1, 5) + residue(1, 7);
    }

    #[test]
    fn display() {
        assert_eq!(residue(16, 7).to_string(), "2 (mod 7)");
    }
}

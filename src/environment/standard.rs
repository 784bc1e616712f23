// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::{
    Artifact, ArtifactKind, FactorProvider, FieldArithmetic, FieldPattern, PartitionLocation,
    PartitionLocator, PatternSource, Product, SimilarityMetric,
};
use crate::AlgebraError;

/// The eight field constants weighted into the resonance of a number, one per
/// pattern bit: unity, the tribonacci constant, the golden ratio, one half,
/// `1/2π`, `2π`, and two small empirical constants.
pub const FIELD_CONSTANTS: [f64; 8] = [
    1.0,
    1.839_286_755_214_161,
    1.618_033_988_749_895,
    0.5,
    0.159_154_943_091_895_35,
    6.283_185_307_179_586,
    0.199_612,
    0.014_134_725,
];

/// Largest divisor tried before the cofactor is reported as-is.
const TRIAL_DIVISION_LIMIT: u64 = 1 << 20;

/// Deterministic default collaborators.
///
/// The pattern of `n` is the bits of `n mod 256`, its resonance the product of
/// [`FIELD_CONSTANTS`] over the active bits, and its partition `floor(n / 48)`
/// (for the default block size). Factorization is trial division and field
/// arithmetic is ordinary integer arithmetic.
///
/// # Examples
///
/// ```rust
/// use emergent_algebra::{PartitionLocator, PatternSource, SimilarityMetric, StandardEnvironment};
/// use num_bigint::BigInt;
///
/// let environment = StandardEnvironment::default();
/// let n = BigInt::from(-1);
/// assert_eq!(environment.field_pattern(&n).active_count(), 8);
/// assert_eq!(environment.locate(&n).partition, BigInt::from(-1));
/// assert_eq!(environment.resonance(&BigInt::from(1)), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StandardEnvironment {
    partition_size: u32,
}

impl StandardEnvironment {
    /// Create an environment with the given partition block size. Panics if
    /// `partition_size` is zero.
    pub fn new(partition_size: u32) -> Self {
        assert!(partition_size > 0, "partition size must be positive");
        Self { partition_size }
    }

    /// Partition block size.
    pub fn partition_size(&self) -> u32 {
        self.partition_size
    }
}

impl Default for StandardEnvironment {
    fn default() -> Self {
        Self::new(48)
    }
}

fn low_byte(n: &BigInt) -> u8 {
    n.mod_floor(&BigInt::from(256)).to_u8().unwrap_or(0)
}

impl PatternSource for StandardEnvironment {
    fn field_pattern(&self, n: &BigInt) -> FieldPattern {
        FieldPattern::from_byte(low_byte(n))
    }
}

impl SimilarityMetric for StandardEnvironment {
    fn resonance(&self, n: &BigInt) -> f64 {
        self.field_pattern(n)
            .0
            .iter()
            .zip(FIELD_CONSTANTS)
            .filter(|(bit, _)| **bit)
            .map(|(_, constant)| constant)
            .product()
    }
}

impl PartitionLocator for StandardEnvironment {
    fn locate(&self, n: &BigInt) -> PartitionLocation {
        let size = BigInt::from(self.partition_size);
        let (partition, offset) = n.div_mod_floor(&size);
        PartitionLocation {
            partition,
            offset: offset.to_u32().unwrap_or(0),
            size: self.partition_size,
        }
    }
}

impl FactorProvider for StandardEnvironment {
    fn factorize(&self, n: &BigInt) -> Result<Vec<BigInt>, AlgebraError> {
        if n.is_zero() {
            return Err(AlgebraError::Collaborator("zero has no factorization".into()));
        }

        let mut factors = Vec::new();
        if n.is_negative() {
            factors.push(-BigInt::one());
        }
        let mut remaining = n.abs();
        let mut divisor = BigInt::from(2);
        let limit = BigInt::from(TRIAL_DIVISION_LIMIT);
        while &divisor * &divisor <= remaining && divisor <= limit {
            while (&remaining % &divisor).is_zero() {
                factors.push(divisor.clone());
                remaining /= &divisor;
            }
            divisor += 1;
        }
        if !remaining.is_one() || factors.is_empty() {
            factors.push(remaining);
        }
        Ok(factors)
    }

    fn multiply(&self, a: &BigInt, b: &BigInt) -> Result<Product, AlgebraError> {
        let result = a * b;
        let combined = low_byte(a) | low_byte(b);
        let produced = low_byte(&result);

        let mut artifacts = Vec::new();
        for bit in 0..8 {
            let mask = 1u8 << bit;
            match (combined & mask != 0, produced & mask != 0) {
                (true, false) => artifacts.push(Artifact {
                    kind: ArtifactKind::Vanishing,
                    bit,
                }),
                (false, true) => artifacts.push(Artifact {
                    kind: ArtifactKind::Emergent,
                    bit,
                }),
                _ => {}
            }
        }
        Ok(Product { result, artifacts })
    }
}

impl FieldArithmetic for StandardEnvironment {
    fn field_add(&self, a: &BigInt, b: &BigInt) -> Result<BigInt, AlgebraError> {
        Ok(a + b)
    }

    fn field_multiply(&self, a: &BigInt, b: &BigInt) -> Result<BigInt, AlgebraError> {
        Ok(a * b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::artifact_signature;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn resonance_is_product_of_active_constants() {
        let environment = StandardEnvironment::default();
        assert_eq!(environment.resonance(&big(0)), 1.0);
        assert_eq!(environment.resonance(&big(4)), FIELD_CONSTANTS[2]);
        let unity = environment.resonance(&big(0b0011_0000));
        assert!((unity - 1.0).abs() < 1e-12, "1/2π · 2π should be unity");
        // resonance only depends on the residue modulo 256
        assert_eq!(environment.resonance(&big(5)), environment.resonance(&big(261)));
    }

    #[test]
    fn locate_negative_numbers() {
        let environment = StandardEnvironment::default();
        let location = environment.locate(&big(-1));
        assert_eq!(location.partition, big(-1));
        assert_eq!(location.offset, 47);
        let location = environment.locate(&big(100));
        assert_eq!(location.partition, big(2));
        assert_eq!(location.offset, 4);
    }

    #[test]
    fn factorization() {
        let environment = StandardEnvironment::default();
        assert_eq!(
            environment.factorize(&big(360)).unwrap(),
            vec![big(2), big(2), big(2), big(3), big(3), big(5)]
        );
        assert_eq!(environment.factorize(&big(-7)).unwrap(), vec![big(-1), big(7)]);
        assert_eq!(environment.factorize(&big(1)).unwrap(), vec![big(1)]);
        assert!(environment.factorize(&big(0)).is_err());
    }

    #[test]
    fn multiplication_artifacts() {
        let environment = StandardEnvironment::default();
        // 3 * 5 = 15: factors cover bits {0, 1, 2}, product covers {0, 1, 2, 3}
        let product = environment.multiply(&big(3), &big(5)).unwrap();
        assert_eq!(product.result, big(15));
        assert_eq!(
            product.artifacts,
            vec![Artifact {
                kind: ArtifactKind::Emergent,
                bit: 3
            }]
        );

        assert_eq!(artifact_signature(&environment, &big(15)), Some("v0e1".into()));
        assert_eq!(artifact_signature(&environment, &big(7)), None);
        // 2 * 2 = 4 loses bit 1 and gains bit 2
        assert_eq!(artifact_signature(&environment, &big(4)), Some("v1e1".into()));
    }
}

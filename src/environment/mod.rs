// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! External collaborators consumed by the discovery algorithms.
//!
//! Each capability is a separate trait so that tests can script one of them
//! while keeping the others standard. [`Environment`] bundles all of them and
//! is implemented automatically for any type providing every capability.

use num_bigint::BigInt;
use num_traits::{One, Signed};
use serde::Serialize;

use crate::AlgebraError;

pub use standard::{FIELD_CONSTANTS, StandardEnvironment};

mod standard;

/// Number of bits in a field pattern.
pub const PATTERN_BITS: usize = 8;

/// Per-integer structural fingerprint of [`PATTERN_BITS`] booleans.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct FieldPattern(pub [bool; PATTERN_BITS]);

impl FieldPattern {
    /// Pattern whose bit `i` is bit `i` of `byte`.
    pub fn from_byte(byte: u8) -> Self {
        let mut bits = [false; PATTERN_BITS];
        for (index, bit) in bits.iter_mut().enumerate() {
            *bit = byte & (1 << index) != 0;
        }
        Self(bits)
    }

    /// Inverse of [`FieldPattern::from_byte`].
    pub fn to_byte(&self) -> u8 {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, bit)| **bit)
            .fold(0, |byte, (index, _)| byte | (1 << index))
    }

    /// Number of active bits.
    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|bit| **bit).count()
    }

    /// Cyclic shift by `shift` positions.
    pub fn rotated(&self, shift: usize) -> Self {
        let mut bits = [false; PATTERN_BITS];
        for (index, bit) in self.0.iter().enumerate() {
            bits[(index + shift) % PATTERN_BITS] = *bit;
        }
        Self(bits)
    }

    /// Reflection mapping position `i` to `2 * axis - i` (cyclically).
    pub fn reflected(&self, axis: usize) -> Self {
        let mut bits = [false; PATTERN_BITS];
        for (index, bit) in self.0.iter().enumerate() {
            let target = (2 * axis + PATTERN_BITS - index) % PATTERN_BITS;
            bits[target] = *bit;
        }
        Self(bits)
    }

    /// Full reversal of the bit order.
    pub fn reversed(&self) -> Self {
        let mut bits = self.0;
        bits.reverse();
        Self(bits)
    }

    /// Fraction of positions on which the two patterns agree.
    pub fn similarity(&self, other: &Self) -> f64 {
        let matching = self.0.iter().zip(other.0.iter()).filter(|(a, b)| a == b).count();
        matching as f64 / PATTERN_BITS as f64
    }
}

/// Where a number sits in the partition lattice.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PartitionLocation {
    /// Index of the partition block (floor division by the block size).
    pub partition: BigInt,
    /// Offset of the number inside its block.
    pub offset: u32,
    /// Block size.
    pub size: u32,
}

impl PartitionLocation {
    /// First number of the block.
    pub fn base(&self) -> BigInt {
        &self.partition * BigInt::from(self.size)
    }

    /// Whether the number is the first or last of its block.
    pub fn is_boundary(&self) -> bool {
        self.offset == 0 || self.offset + 1 == self.size
    }
}

/// Direction of a pattern-bit change reported by a multiplication.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ArtifactKind {
    /// A bit active in the factors that is missing from the product.
    Vanishing,
    /// A bit active in the product that no factor carried.
    Emergent,
}

/// A single pattern-bit change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Artifact {
    /// Direction of the change.
    pub kind: ArtifactKind,
    /// Affected bit position.
    pub bit: usize,
}

/// Result of a multiplication together with its artifacts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Product {
    /// The product itself.
    pub result: BigInt,
    /// Pattern changes observed while multiplying.
    pub artifacts: Vec<Artifact>,
}

/// Source of per-integer field patterns.
pub trait PatternSource {
    /// The field pattern of `n`.
    fn field_pattern(&self, n: &BigInt) -> FieldPattern;
}

/// Real-valued similarity metric ("resonance") of an integer.
pub trait SimilarityMetric {
    /// The metric value of `n`.
    fn resonance(&self, n: &BigInt) -> f64;
}

/// Locality classification of integers.
pub trait PartitionLocator {
    /// The partition block containing `n`.
    fn locate(&self, n: &BigInt) -> PartitionLocation;
}

/// Factorization and multiplication with artifacts.
pub trait FactorProvider {
    /// Factors of `n` whose product is `n`.
    fn factorize(&self, n: &BigInt) -> Result<Vec<BigInt>, AlgebraError>;
    /// Multiply `a` and `b`, reporting pattern artifacts.
    fn multiply(&self, a: &BigInt, b: &BigInt) -> Result<Product, AlgebraError>;
}

/// Field-aware arithmetic used by field-aware and partition-bounded operations.
pub trait FieldArithmetic {
    /// Field-aware addition.
    fn field_add(&self, a: &BigInt, b: &BigInt) -> Result<BigInt, AlgebraError>;
    /// Field-aware multiplication.
    fn field_multiply(&self, a: &BigInt, b: &BigInt) -> Result<BigInt, AlgebraError>;
}

/// Every collaborator capability the discovery algorithms consume.
pub trait Environment:
    PatternSource + SimilarityMetric + PartitionLocator + FactorProvider + FieldArithmetic
{
}

impl<T> Environment for T where
    T: PatternSource + SimilarityMetric + PartitionLocator + FactorProvider + FieldArithmetic
{
}

/// Key summarizing the artifacts produced when `n` is rebuilt from its
/// factors, e.g. `"v2e1"` for two vanishing and one emergent bit.
///
/// Returns `None` for numbers with fewer than two factors, for products
/// without artifacts, and whenever the factoring collaborator fails.
pub fn artifact_signature<E: FactorProvider>(environment: &E, n: &BigInt) -> Option<String> {
    let factors = environment.factorize(n).ok()?;
    let (first, rest) = factors.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let remainder = rest.iter().fold(BigInt::one(), |product, factor| product * factor);
    let product = environment.multiply(first, &remainder).ok()?;
    if product.artifacts.is_empty() {
        return None;
    }
    let vanishing = product
        .artifacts
        .iter()
        .filter(|artifact| artifact.kind == ArtifactKind::Vanishing)
        .count();
    let emergent = product.artifacts.len() - vanishing;
    Some(format!("v{vanishing}e{emergent}"))
}

/// Trial-division primality test on the absolute value of `n`.
pub fn is_prime(n: &BigInt) -> bool {
    let n = n.abs();
    let two = BigInt::from(2);
    if n < two {
        return false;
    }
    let mut divisor = two;
    while &divisor * &divisor <= n {
        if (&n % &divisor) == BigInt::from(0) {
            return false;
        }
        divisor += 1;
    }
    true
}

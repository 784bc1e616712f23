// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use num_bigint::BigInt;
use serde::Serialize;

use crate::environment::Environment;
use crate::{AlgebraicStructure, DiscoveryContext, ElementSet, Operation};

/// Lattice size a modular ring's modulus coincides with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NaturalBoundary {
    /// The modulus equals the partition size.
    Partition,
    /// The modulus equals the cycle size.
    Cycle,
}

/// The natural ring type suggested by an integer collection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum RingKind {
    /// Consecutive integers from zero, read modulo their count.
    Modular {
        /// The count of the integers.
        modulus: BigInt,
        /// Named lattice size equal to the modulus, if any.
        boundary: Option<NaturalBoundary>,
    },
    /// A dominant cluster of equal quantized metric value.
    Similarity {
        /// The dominant metric value.
        metric: f64,
        /// The partition most of the cluster lives in.
        partition: BigInt,
    },
    /// Most integers carry factoring artifacts.
    Artifact,
    /// Most integers live in one partition.
    PartitionLocal {
        /// The dominant partition.
        partition: BigInt,
    },
    /// No dominant feature.
    General,
    /// Classes of a parent ring modulo an ideal.
    Quotient,
}

/// How an ideal was found.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum IdealKind {
    /// The ideal `{0}`.
    Zero,
    /// The whole ring.
    Whole,
    /// Generated by a single small element.
    Principal,
    /// Grown from integers sharing a factoring artifact signature.
    ArtifactSignature(String),
    /// Grown from integers sharing a quantized metric value.
    Similarity(f64),
    /// Grown from the integers of one partition.
    Partition(BigInt),
}

/// An ideal of a [`RingStructure`].
///
/// Absorption holds on the sampled elements: whenever `r * i` lies in the
/// ring for a sampled ring element `r` and ideal element `i`, it lies in the
/// ideal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ideal {
    /// Members, a subset of the parent ring.
    pub elements: ElementSet,
    /// The elements the ideal was grown from.
    pub generators: Vec<BigInt>,
    /// Whether a single generator suffices.
    pub is_principal: bool,
    /// Whether no sampled pair outside the ideal multiplies into it.
    pub is_prime: bool,
    /// Whether the ideal was judged maximal.
    pub is_maximal: bool,
    /// How the ideal was found.
    pub kind: IdealKind,
}

/// A ring emerging from a finite set of integers.
///
/// The additive identity is always a member of `elements`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RingStructure {
    /// The carrier set.
    pub elements: ElementSet,
    /// Identity of `addition`.
    pub additive_identity: BigInt,
    /// Identity of `multiplication`, if one was found.
    pub multiplicative_identity: Option<BigInt>,
    /// Ring addition.
    pub addition: Operation,
    /// Ring multiplication.
    pub multiplication: Operation,
    /// Whether sampled products commute.
    pub is_commutative: bool,
    /// Ideals, the zero ideal and the whole ring first.
    pub ideals: Vec<Ideal>,
    /// Commutative, with unity and without sampled zero divisors.
    pub is_integral_domain: bool,
    /// An integral domain whose sampled nonzero elements are invertible.
    pub is_field: bool,
    /// The natural type the ring was grown from.
    pub kind: RingKind,
}

impl RingStructure {
    /// Whether a multiplicative identity was found.
    pub fn has_unity(&self) -> bool {
        self.multiplicative_identity.is_some()
    }

    /// Ring sum, `None` where undefined.
    pub fn add<E: Environment>(
        &self,
        context: &DiscoveryContext<E>,
        a: &BigInt,
        b: &BigInt,
    ) -> Option<BigInt> {
        context.try_apply(&self.addition, a, b)
    }

    /// Ring product, `None` where undefined.
    pub fn mul<E: Environment>(
        &self,
        context: &DiscoveryContext<E>,
        a: &BigInt,
        b: &BigInt,
    ) -> Option<BigInt> {
        context.try_apply(&self.multiplication, a, b)
    }

    /// An element `y` of the ring with `x + y` equal to the additive identity.
    pub fn additive_inverse<E: Environment>(
        &self,
        context: &DiscoveryContext<E>,
        x: &BigInt,
    ) -> Option<BigInt> {
        self.elements
            .iter()
            .find(|y| self.add(context, x, y).as_ref() == Some(&self.additive_identity))
            .cloned()
    }

    /// The zero ideal.
    pub fn zero_ideal(&self) -> Option<&Ideal> {
        self.ideals.iter().find(|ideal| ideal.kind == IdealKind::Zero)
    }
}

impl AlgebraicStructure for RingStructure {
    fn elements(&self) -> &ElementSet {
        &self.elements
    }

    fn properties(&self) -> Vec<&'static str> {
        let mut properties = vec!["ring"];
        if self.is_commutative {
            properties.push("commutative");
        }
        if self.has_unity() {
            properties.push("unital");
        }
        if self.is_integral_domain {
            properties.push("integral-domain");
        }
        if self.is_field {
            properties.push("field");
        }
        properties
    }
}

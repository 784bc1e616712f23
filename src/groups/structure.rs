// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use num_bigint::BigInt;
use serde::Serialize;

use crate::environment::Environment;
use crate::{AlgebraicStructure, DiscoveryContext, ElementSet, Operation};

/// The discovery route that produced a group.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum GroupOrigin {
    /// Integers under addition, found because `0` was present.
    Additive,
    /// Integers under multiplication, found because `1` was present.
    Multiplicative,
    /// A bucket of integers sharing a quantized metric value.
    Similarity {
        /// The quantized metric value of the bucket.
        metric: f64,
    },
    /// A bucket of integers sharing the number of active pattern bits.
    Harmonic {
        /// Active pattern bits shared by the bucket.
        active_bits: usize,
    },
    /// Integers of one partition block under block-local modular addition.
    PartitionLocal {
        /// Index of the block.
        partition: BigInt,
    },
    /// Integers close to the anchor offsets of one partition block.
    AnchorPoint {
        /// Index of the block.
        partition: BigInt,
    },
    /// Integers sharing a factoring artifact signature.
    ArtifactSignature {
        /// The shared signature.
        signature: String,
    },
    /// The subgroup containing only the identity.
    Trivial,
    /// The subgroup generated by repeatedly applying the operation to one
    /// element.
    Cyclic {
        /// The generating element.
        generator: BigInt,
    },
}

/// A candidate group emerging from a finite set of integers.
///
/// The flags record what bounded sampling observed; a group whose closure was
/// truncated reports `is_closed == false` rather than failing discovery. The
/// identity is always a member of `elements`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupStructure {
    /// The carrier set.
    pub elements: ElementSet,
    /// Two-sided identity of `operation` on the sampled elements.
    pub identity: BigInt,
    /// The group operation.
    pub operation: Operation,
    /// Whether every sampled product stays inside `elements`.
    pub is_closed: bool,
    /// Whether every sampled element has an inverse in `elements`.
    pub has_inverses: bool,
    /// Whether every sampled pair commutes.
    pub is_abelian: bool,
    /// Subgroups, populated by [`crate::GroupDetector::with_subgroups`].
    pub subgroups: Vec<GroupStructure>,
    /// How the group was found.
    pub origin: GroupOrigin,
    /// Fraction of sampled products preserving the target metric, in `[0, 1]`.
    pub stability: f64,
}

impl GroupStructure {
    /// Number of elements.
    pub fn order(&self) -> usize {
        self.elements.len()
    }

    /// Whether the group consists of its identity alone.
    pub fn is_trivial(&self) -> bool {
        self.elements.len() == 1
    }

    /// Whether the sampled group axioms all held.
    pub fn is_group(&self) -> bool {
        self.is_closed && self.has_inverses
    }

    /// Evaluate the group operation, `None` where it is undefined.
    pub fn operate<E: Environment>(
        &self,
        context: &DiscoveryContext<E>,
        a: &BigInt,
        b: &BigInt,
    ) -> Option<BigInt> {
        context.try_apply(&self.operation, a, b)
    }

    /// An element `y` of the group with `x · y` equal to the identity.
    pub fn inverse_of<E: Environment>(
        &self,
        context: &DiscoveryContext<E>,
        x: &BigInt,
    ) -> Option<BigInt> {
        self.elements
            .iter()
            .find(|y| self.operate(context, x, y).as_ref() == Some(&self.identity))
            .cloned()
    }
}

impl AlgebraicStructure for GroupStructure {
    fn elements(&self) -> &ElementSet {
        &self.elements
    }

    fn properties(&self) -> Vec<&'static str> {
        let mut properties = Vec::new();
        if self.is_closed {
            properties.push("closed");
        }
        if self.has_inverses {
            properties.push("invertible");
        }
        if self.is_abelian {
            properties.push("abelian");
        }
        if self.is_group() {
            properties.push("group");
        }
        properties
    }
}

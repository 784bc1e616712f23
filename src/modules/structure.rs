// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::rc::Rc;

use num_bigint::BigInt;
use serde::Serialize;

use crate::environment::Environment;
use crate::{AlgebraicStructure, DiscoveryContext, ElementSet, Operation, RingStructure};

/// A module over a discovered ring.
///
/// The scalar ring is shared, never owned: two modules are "over the same
/// ring" only when they hold the same [`Rc`]. The zero is always a member of
/// `elements`, and the zero scalar annihilates every sampled element.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Module {
    /// The carrier set.
    pub elements: ElementSet,
    /// The ring acting on the module.
    pub scalar_ring: Rc<RingStructure>,
    /// Module addition.
    pub addition: Operation,
    /// Action of the scalar ring, evaluated as `scalar · element`.
    pub scalar_multiplication: Operation,
    /// Identity of `addition`.
    pub zero: BigInt,
    /// Greedy generator cover, in ascending magnitude.
    pub generators: Vec<BigInt>,
    /// Whether the generators were found independent.
    pub is_free: bool,
    /// Number of generators of a free module, `0` otherwise.
    pub rank: usize,
    /// Nonzero elements annihilated by some sampled nonzero scalar.
    pub torsion_elements: ElementSet,
}

impl Module {
    /// Module sum, `None` where undefined.
    pub fn add<E: Environment>(
        &self,
        context: &DiscoveryContext<E>,
        a: &BigInt,
        b: &BigInt,
    ) -> Option<BigInt> {
        context.try_apply(&self.addition, a, b)
    }

    /// Scalar action `r · m`, `None` where undefined.
    pub fn scale<E: Environment>(
        &self,
        context: &DiscoveryContext<E>,
        r: &BigInt,
        m: &BigInt,
    ) -> Option<BigInt> {
        context.try_apply(&self.scalar_multiplication, r, m)
    }

    /// Whether `other` is a module over the identical ring object.
    pub fn shares_scalar_ring(&self, other: &Module) -> bool {
        Rc::ptr_eq(&self.scalar_ring, &other.scalar_ring)
    }

    /// Whether no torsion was found.
    pub fn is_torsion_free(&self) -> bool {
        self.torsion_elements.is_empty()
    }
}

impl AlgebraicStructure for Module {
    fn elements(&self) -> &ElementSet {
        &self.elements
    }

    fn properties(&self) -> Vec<&'static str> {
        let mut properties = vec!["module"];
        if self.is_free {
            properties.push("free");
        }
        if self.is_torsion_free() {
            properties.push("torsion-free");
        }
        if self.scalar_ring.is_field {
            properties.push("vector-space");
        }
        properties
    }
}

/// How a submodule was found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SubmoduleKind {
    /// `{0}`.
    Trivial,
    /// The whole module.
    Whole,
    /// Spanned by one generator.
    Cyclic(BigInt),
    /// Elements sharing the number of active pattern bits.
    Pattern(usize),
    /// Elements of one partition block.
    Partition(BigInt),
}

/// A read-only view of a subset of a [`Module`] closed under its operations
/// on the sample.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Submodule<'m> {
    /// The parent module.
    #[serde(skip)]
    pub parent: &'m Module,
    /// Members, a subset of the parent's elements.
    pub elements: ElementSet,
    /// The elements the submodule was grown from.
    pub generators: Vec<BigInt>,
    /// How the submodule was found.
    pub kind: SubmoduleKind,
}

impl Submodule<'_> {
    /// Whether this is `{0}`.
    pub fn is_trivial(&self) -> bool {
        self.elements.len() == 1 && self.elements.contains(&self.parent.zero)
    }

    /// Whether this is all of the parent.
    pub fn is_whole(&self) -> bool {
        self.elements == self.parent.elements
    }
}

/// A module over a field seen as a vector space.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VectorSpace<'m> {
    /// The underlying module.
    pub module: &'m Module,
    /// Number of basis vectors.
    pub dimension: usize,
    /// A maximal independent set found by sampling.
    pub basis: Vec<BigInt>,
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use num_bigint::BigInt;

use crate::ElementSet;

/// How the element sets of two structures relate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Overlap {
    /// One set is contained in the other.
    Nested,
    /// The sets share some, but not all, elements of either.
    Partial,
    /// The sets share no element.
    Disjoint,
}

/// Expected functionality of every discovered structure: a finite carrier set
/// and a list of emergent property tags.
pub trait AlgebraicStructure {
    /// The carrier set.
    fn elements(&self) -> &ElementSet;

    /// Tags naming the properties the structure was found to have, such as
    /// `"closed"` or `"field"`.
    fn properties(&self) -> Vec<&'static str>;

    /// Number of elements.
    fn size(&self) -> usize {
        self.elements().len()
    }

    /// Whether `x` belongs to the carrier set.
    fn contains(&self, x: &BigInt) -> bool {
        self.elements().contains(x)
    }

    /// Relation between the carrier sets of `self` and `other`.
    fn overlap<S: AlgebraicStructure + ?Sized>(&self, other: &S) -> Overlap {
        overlap(self.elements(), other.elements())
    }
}

/// Relation between two element sets. Two empty sets are nested.
pub fn overlap(a: &ElementSet, b: &ElementSet) -> Overlap {
    if a.is_subset(b) || b.is_subset(a) {
        Overlap::Nested
    } else if a.is_disjoint(b) {
        Overlap::Disjoint
    } else {
        Overlap::Partial
    }
}

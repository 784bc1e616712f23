// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::{BTreeMap, BTreeSet};

use num_bigint::BigInt;
use num_traits::Signed;
use serde::Serializer;
use serde::ser::SerializeSeq;

pub use closure::{Closure, ClosureLimits, Sampling, bounded_closure};
pub use context::DiscoveryContext;
pub use map::ElementMap;
pub use operation::{OpKind, Operation};
pub use residue::Residue;
pub use traits::{AlgebraicStructure, Overlap, overlap};

mod closure;
mod context;
mod map;
mod operation;
mod residue;
mod traits;

/// A finite set of arbitrary-precision integers, iterated in ascending order.
///
/// Every "sampled" subset used by the discovery algorithms is a prefix of this
/// order, which keeps all bounded searches deterministic.
pub type ElementSet = BTreeSet<BigInt>;

/// Build an [`ElementSet`] from anything convertible to [`BigInt`].
///
/// ```rust
/// use emergent_algebra::element_set;
///
/// let set = element_set([3, 1, 2, 1]);
/// assert_eq!(set.len(), 3);
/// ```
pub fn element_set<I, T>(values: I) -> ElementSet
where
    I: IntoIterator<Item = T>,
    T: Into<BigInt>,
{
    values.into_iter().map(Into::into).collect()
}

/// The first `k` elements in ascending order.
pub(crate) fn sample(elements: &ElementSet, k: usize) -> Vec<&BigInt> {
    elements.iter().take(k).collect()
}

/// Elements ordered by ascending magnitude, ties broken by value.
pub(crate) fn by_magnitude(elements: &ElementSet) -> Vec<BigInt> {
    let mut sorted: Vec<BigInt> = elements.iter().cloned().collect();
    sorted.sort_by(|a, b| a.abs().cmp(&b.abs()).then(a.cmp(b)));
    sorted
}

/// Serialize a map with integer keys as a sequence of `(key, value)` pairs,
/// since integer keys are not representable in every data format.
pub(crate) fn serialize_pairs<S>(
    map: &BTreeMap<BigInt, BigInt>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut sequence = serializer.serialize_seq(Some(map.len()))?;
    for pair in map {
        sequence.serialize_element(&pair)?;
    }
    sequence.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_order() {
        let sorted = by_magnitude(&element_set([-3, 2, -1, 1, 0]));
        let expected: Vec<BigInt> = [0, -1, 1, 2, -3].into_iter().map(BigInt::from).collect();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn pairs_serialize_as_sequence() {
        let map = BTreeMap::from([(BigInt::from(1), BigInt::from(4))]);
        let mut serializer = serde_json::Serializer::new(Vec::new());
        serialize_pairs(&map, &mut serializer).unwrap();
        let json = String::from_utf8(serializer.into_inner()).unwrap();
        assert!(json.starts_with("[["));
    }
}

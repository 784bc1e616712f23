// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_traits::Signed;
use serde::Serialize;
use serde::ser::SerializeMap;

use crate::environment::Environment;
use crate::rings::{Ideal, IdealKind, RingKind, RingStructure};
use crate::{DiscoveryContext, ElementSet, Operation};

/// A ring of equivalence classes modulo an ideal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuotientRing {
    /// The quotient, whose elements are the class representatives and whose
    /// operations act through representative lookup.
    pub structure: RingStructure,
    /// Each class keyed by its representative.
    #[serde(serialize_with = "serialize_classes")]
    pub classes: BTreeMap<BigInt, ElementSet>,
}

impl QuotientRing {
    /// Number of classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Representative of the class containing `x`.
    pub fn representative(&self, x: &BigInt) -> Option<&BigInt> {
        self.classes
            .iter()
            .find(|(_, members)| members.contains(x))
            .map(|(representative, _)| representative)
    }
}

/// The quotient of `ring` by `ideal`.
///
/// Each class is keyed by its member of least magnitude among `x - i` for `i`
/// in the ideal, computed with the ring's own addition so representatives
/// always lie in the ring.
pub(crate) fn quotient<E: Environment>(
    context: &DiscoveryContext<E>,
    ring: &RingStructure,
    ideal: &Ideal,
) -> QuotientRing {
    let negatives: Vec<BigInt> = ideal
        .elements
        .iter()
        .filter_map(|i| ring.additive_inverse(context, i))
        .collect();

    let mut representatives = BTreeMap::new();
    let mut classes: BTreeMap<BigInt, ElementSet> = BTreeMap::new();
    for x in &ring.elements {
        let representative = negatives
            .iter()
            .filter_map(|negative| ring.add(context, x, negative))
            .filter(|candidate| ring.elements.contains(candidate))
            .chain(std::iter::once(x.clone()))
            .min_by(|a, b| a.abs().cmp(&b.abs()).then(a.cmp(b)))
            .unwrap_or_else(|| x.clone());
        classes
            .entry(representative.clone())
            .or_default()
            .insert(x.clone());
        representatives.insert(x.clone(), representative);
    }

    let lookup = |x: &BigInt| representatives.get(x).cloned();
    let additive_identity = lookup(&ring.additive_identity).unwrap_or_default();
    let multiplicative_identity = ring.multiplicative_identity.as_ref().and_then(lookup);
    let elements: ElementSet = classes.keys().cloned().collect();

    let structure = RingStructure {
        addition: Operation::Quotient {
            base: Box::new(ring.addition.clone()),
            representatives: representatives.clone(),
        },
        multiplication: Operation::Quotient {
            base: Box::new(ring.multiplication.clone()),
            representatives,
        },
        is_commutative: ring.is_commutative,
        ideals: vec![
            Ideal {
                elements: ElementSet::from([additive_identity.clone()]),
                generators: vec![additive_identity.clone()],
                is_principal: true,
                is_prime: ideal.is_prime,
                is_maximal: ideal.is_maximal,
                kind: IdealKind::Zero,
            },
            Ideal {
                elements: elements.clone(),
                generators: multiplicative_identity.iter().cloned().collect(),
                is_principal: multiplicative_identity.is_some(),
                is_prime: false,
                is_maximal: false,
                kind: IdealKind::Whole,
            },
        ],
        is_integral_domain: ideal.is_prime,
        is_field: ideal.is_maximal,
        kind: RingKind::Quotient,
        elements,
        additive_identity,
        multiplicative_identity,
    };
    QuotientRing { structure, classes }
}

fn serialize_classes<S>(
    classes: &BTreeMap<BigInt, ElementSet>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let mut map = serializer.serialize_map(Some(classes.len()))?;
    for (representative, members) in classes {
        map.serialize_entry(&representative.to_string(), members)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OpKind, element_set};

    fn z6() -> RingStructure {
        RingStructure {
            elements: element_set(0..6),
            additive_identity: BigInt::from(0),
            multiplicative_identity: Some(BigInt::from(1)),
            addition: Operation::modular(6, OpKind::Add),
            multiplication: Operation::modular(6, OpKind::Mul),
            is_commutative: true,
            ideals: Vec::new(),
            is_integral_domain: false,
            is_field: false,
            kind: RingKind::Modular {
                modulus: BigInt::from(6),
                boundary: None,
            },
        }
    }

    fn ideal(elements: ElementSet, is_prime: bool, is_maximal: bool) -> Ideal {
        Ideal {
            generators: elements.iter().take(1).cloned().collect(),
            elements,
            is_principal: true,
            is_prime,
            is_maximal,
            kind: IdealKind::Principal,
        }
    }

    #[test]
    fn z6_modulo_three() {
        let context = DiscoveryContext::standard();
        let quotient = quotient(&context, &z6(), &ideal(element_set([0, 3]), true, true));

        assert_eq!(quotient.structure.elements, element_set([0, 1, 2]));
        assert_eq!(quotient.classes[&BigInt::from(1)], element_set([1, 4]));
        assert_eq!(quotient.representative(&BigInt::from(5)), Some(&BigInt::from(2)));
        assert!(quotient.structure.is_field);

        let ring = &quotient.structure;
        assert_eq!(
            ring.add(&context, &BigInt::from(2), &BigInt::from(2)),
            Some(BigInt::from(1))
        );
        assert_eq!(
            ring.mul(&context, &BigInt::from(2), &BigInt::from(2)),
            Some(BigInt::from(1))
        );
        assert_eq!(ring.multiplicative_identity, Some(BigInt::from(1)));
    }

    #[test]
    fn trivial_ideals() {
        let context = DiscoveryContext::standard();
        let ring = z6();
        let by_zero = quotient(&context, &ring, &ideal(element_set([0]), false, false));
        assert_eq!(by_zero.class_count(), 6);

        let by_whole = quotient(&context, &ring, &ideal(ring.elements.clone(), false, false));
        assert_eq!(by_whole.structure.elements, element_set([0]));
    }
}

use emergent_algebra::{
    DiscoveryContext, ElementMap, ElementSet, IdealKind, NaturalBoundary, OpKind, Operation,
    RingDetector, RingKind, RingStructure, element_set,
};
use num_bigint::BigInt;
use test_utilities::{FailingFactorizer, consecutive, context_with};

fn rings(context: &DiscoveryContext) -> Vec<RingStructure> {
    let detector = RingDetector::new(context);
    [
        consecutive(5),
        consecutive(6),
        consecutive(12),
        element_set([5, 97]),
        element_set([5, 97, 101, 103, 107, 109, 113]),
    ]
    .iter()
    .filter_map(|numbers| detector.detect_ring_structure(numbers))
    .collect()
}

#[test]
fn distributivity_on_sampled_triples() {
    let context = DiscoveryContext::standard();
    for ring in rings(&context) {
        let sampled: Vec<&BigInt> = ring.elements.iter().take(5).collect();
        for a in &sampled {
            for b in &sampled {
                for c in &sampled {
                    let lhs = ring
                        .add(&context, b, c)
                        .and_then(|sum| ring.mul(&context, a, &sum));
                    let rhs = ring
                        .mul(&context, a, b)
                        .zip(ring.mul(&context, a, c))
                        .and_then(|(ab, ac)| ring.add(&context, &ab, &ac));
                    assert_eq!(lhs, rhs);
                }
            }
        }
        assert!(ring.elements.contains(&ring.additive_identity));
    }
}

#[test]
fn ideals_absorb_ring_multiples() {
    let context = DiscoveryContext::standard();
    for ring in rings(&context) {
        assert_eq!(ring.ideals[0].kind, IdealKind::Zero);
        assert_eq!(ring.ideals[1].kind, IdealKind::Whole);
        for ideal in &ring.ideals {
            assert!(ideal.elements.is_subset(&ring.elements));
            for i in ideal.elements.iter().take(32) {
                for r in ring.elements.iter().take(32) {
                    if let Some(product) = ring.mul(&context, r, i) {
                        if ring.elements.contains(&product) {
                            assert!(ideal.elements.contains(&product));
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn z6_is_modular_but_not_a_field() {
    let context = DiscoveryContext::standard();
    let ring = RingDetector::new(&context)
        .detect_ring_structure(&consecutive(6))
        .unwrap();

    assert_eq!(
        ring.kind,
        RingKind::Modular {
            modulus: BigInt::from(6),
            boundary: None
        }
    );
    assert_eq!(ring.multiplication, Operation::modular(6, OpKind::Mul));
    assert!(!ring.is_field);
    assert!(ring.ideals.iter().any(|ideal| ideal.elements == element_set([0])));
    assert!(ring.ideals.iter().any(|ideal| ideal.elements == ring.elements));
    assert!(!ring.ideals[1].is_prime);
}

#[test]
fn z5_is_a_field() {
    let context = DiscoveryContext::standard();
    let ring = RingDetector::new(&context)
        .find_ring_structure(&consecutive(5))
        .unwrap();
    assert!(ring.is_field);
    assert!(ring.is_integral_domain);
    assert!(ring.ideals[0].is_prime);
}

#[test]
fn partition_sized_rings_are_named() {
    let context = DiscoveryContext::standard();
    let detector = RingDetector::new(&context);
    assert_eq!(
        detector.classify(&consecutive(48)),
        RingKind::Modular {
            modulus: BigInt::from(48),
            boundary: Some(NaturalBoundary::Partition)
        }
    );
    assert_eq!(
        detector.classify(&consecutive(256)),
        RingKind::Modular {
            modulus: BigInt::from(256),
            boundary: Some(NaturalBoundary::Cycle)
        }
    );
}

#[test]
fn empty_input_has_no_ring() {
    let context = DiscoveryContext::standard();
    assert!(
        RingDetector::new(&context)
            .find_ring_structure(&ElementSet::new())
            .is_none()
    );
}

#[test]
fn quotients_shrink_by_proper_ideals() {
    let context = DiscoveryContext::standard();
    let detector = RingDetector::new(&context);
    let ring = detector.detect_ring_structure(&consecutive(12)).unwrap();

    for ideal in &ring.ideals {
        let quotient = detector.quotient(&ring, ideal);
        assert!(quotient.structure.elements.len() <= ring.elements.len());
        assert_eq!(quotient.class_count(), quotient.structure.elements.len());
        let proper = ideal.elements.len() > 1 && ideal.elements.len() < ring.elements.len();
        if proper {
            assert!(quotient.structure.elements.len() < ring.elements.len());
        }
        assert_eq!(quotient.structure.kind, RingKind::Quotient);
        assert_eq!(quotient.structure.is_field, ideal.is_maximal);
    }

    let fours = ring
        .ideals
        .iter()
        .find(|ideal| ideal.elements == element_set([0, 4, 8]))
        .unwrap();
    let quotient = detector.quotient(&ring, fours);
    assert_eq!(quotient.class_count(), 4);
    assert_eq!(quotient.representative(&BigInt::from(9)), Some(&BigInt::from(1)));
    let sum = quotient
        .structure
        .add(&context, &BigInt::from(3), &BigInt::from(2))
        .unwrap();
    assert_eq!(sum, BigInt::from(1));
}

#[test]
fn reduction_homomorphism() {
    let context = DiscoveryContext::standard();
    let detector = RingDetector::new(&context);
    let z12 = detector.detect_ring_structure(&consecutive(12)).unwrap();
    let z4 = detector.detect_ring_structure(&consecutive(4)).unwrap();

    let reduction = detector.analyze_homomorphism(
        &z12,
        &z4,
        ElementMap::Reduce {
            modulus: BigInt::from(4),
        },
    );
    assert_eq!(reduction.kernel, element_set([0, 4, 8]));
    assert_eq!(reduction.image, z4.elements);
    assert!(!reduction.is_injective);
    assert!(reduction.is_surjective);
    assert!(reduction.preserves_addition && reduction.preserves_multiplication);
    assert!(!reduction.is_isomorphism());
}

#[test]
fn failing_collaborators_still_find_modular_rings() {
    let context = context_with(FailingFactorizer::default());
    let ring = RingDetector::new(&context)
        .detect_ring_structure(&consecutive(7))
        .unwrap();
    assert!(ring.is_field);
    assert!(
        !ring
            .ideals
            .iter()
            .any(|ideal| matches!(ideal.kind, IdealKind::ArtifactSignature(_)))
    );
}

use std::rc::Rc;

use emergent_algebra::{
    DiscoveryContext, ElementMap, ElementSet, ModuleAnalyzer, OpKind, Operation, RingDetector,
    RingKind, SubmoduleKind, element_set,
};
use num_bigint::BigInt;
use test_utilities::{consecutive, modular_ring, symmetric};

#[test]
fn zero_scalar_annihilates_every_module() {
    let context = DiscoveryContext::standard();
    let analyzer = ModuleAnalyzer::new(&context);
    let ring = modular_ring(&context, 7);
    let inputs = [
        element_set([1, 2, 3]),
        symmetric(4),
        element_set([10, 20, 30, 1000]),
    ];
    for elements in &inputs {
        for action in [None, Some(Operation::modular(7, OpKind::Mul))] {
            let module = analyzer.create_module(elements, &ring, action).unwrap();
            assert!(module.elements.contains(&module.zero));
            for x in module.elements.iter().take(3) {
                assert_eq!(
                    module.scale(&context, &ring.additive_identity, x),
                    Some(module.zero.clone())
                );
            }
        }
    }
}

#[test]
fn empty_elements_have_no_module() {
    let context = DiscoveryContext::standard();
    let ring = modular_ring(&context, 5);
    assert!(
        ModuleAnalyzer::new(&context)
            .create_module(&ElementSet::new(), &ring, None)
            .is_none()
    );
}

#[test]
fn modules_extend_beyond_the_ring() {
    let context = DiscoveryContext::standard();
    let analyzer = ModuleAnalyzer::new(&context);
    let ring = modular_ring(&context, 5);
    let module = analyzer
        .create_module(&element_set([100, 200]), &ring, None)
        .unwrap();
    assert_eq!(module.elements, element_set([0, 100, 200]));
    assert_eq!(module.scalar_multiplication, Operation::Plain(OpKind::Mul));
    assert!(Rc::ptr_eq(&module.scalar_ring, &ring));
}

#[test]
fn modules_over_a_partition_local_ring() {
    let context = DiscoveryContext::standard();
    let analyzer = ModuleAnalyzer::new(&context);
    let ring = RingDetector::new(&context)
        .detect_ring_structure(&element_set([97, 101, 103, 107, 109, 113]))
        .unwrap();
    assert_eq!(
        ring.kind,
        RingKind::PartitionLocal {
            partition: BigInt::from(2)
        }
    );
    assert_eq!(ring.additive_identity, BigInt::from(96));
    let ring = Rc::new(ring);

    let regular = analyzer
        .create_module(&ring.elements, &ring, Some(ring.multiplication.clone()))
        .unwrap();
    assert_eq!(regular.zero, BigInt::from(96));
    assert_eq!(regular.addition, ring.addition);
    assert_eq!(regular.elements, ring.elements);
    for x in regular.elements.iter().take(5) {
        assert_eq!(
            regular.scale(&context, &regular.zero, x),
            Some(BigInt::from(96))
        );
    }

    let plain = analyzer.create_module(&ring.elements, &ring, None).unwrap();
    assert_eq!(plain.zero, BigInt::from(0));
    assert!(plain.elements.contains(&BigInt::from(0)));
    for x in plain.elements.iter().take(5) {
        assert_eq!(
            plain.scale(&context, &BigInt::from(0), x),
            Some(BigInt::from(0))
        );
    }
}

#[test]
fn regular_module_of_z6() {
    let context = DiscoveryContext::standard();
    let analyzer = ModuleAnalyzer::new(&context);
    let ring = modular_ring(&context, 6);
    let module = analyzer
        .create_module(&ring.elements, &ring, Some(ring.multiplication.clone()))
        .unwrap();

    assert!(module.torsion_elements.contains(&BigInt::from(2)));
    assert!(module.torsion_elements.contains(&BigInt::from(3)));
    assert!(!module.torsion_elements.contains(&BigInt::from(1)));
    assert!(!module.is_torsion_free());
    assert!(analyzer.as_vector_space(&module).is_none());

    let submodules = analyzer.find_submodules(&module);
    assert!(submodules[0].is_trivial());
    assert!(submodules[1].is_whole());
    for submodule in &submodules {
        assert!(submodule.elements.is_subset(&module.elements));
        assert!(submodule.elements.contains(&module.zero));
    }
    // 1 generates the whole module, so its cyclic submodule is not repeated
    assert_eq!(module.generators, vec![BigInt::from(1)]);
    assert!(
        !submodules
            .iter()
            .any(|submodule| matches!(submodule.kind, SubmoduleKind::Cyclic(_)))
    );
}

#[test]
fn vector_space_over_z5() {
    let context = DiscoveryContext::standard();
    let analyzer = ModuleAnalyzer::new(&context);
    let ring = modular_ring(&context, 5);
    let module = analyzer
        .create_module(&ring.elements, &ring, Some(ring.multiplication.clone()))
        .unwrap();

    assert_eq!(module.generators, vec![BigInt::from(1)]);
    let space = analyzer.as_vector_space(&module).unwrap();
    assert_eq!(space.dimension, 1);
    assert_eq!(space.basis, vec![BigInt::from(1)]);
}

#[test]
fn homomorphisms_need_the_same_ring_object() {
    let context = DiscoveryContext::standard();
    let analyzer = ModuleAnalyzer::new(&context);
    let ring = modular_ring(&context, 7);
    let twin = Rc::new((*ring).clone());
    let first = analyzer.create_module(&consecutive(7), &ring, None).unwrap();
    let second = analyzer.create_module(&consecutive(7), &ring, None).unwrap();
    let foreign = analyzer.create_module(&consecutive(7), &twin, None).unwrap();

    let map = analyzer.analyze_homomorphism(&first, &second, ElementMap::Identity);
    assert!(map.is_module_map());
    assert!(map.is_injective && map.is_surjective);

    let across = analyzer.analyze_homomorphism(&first, &foreign, ElementMap::Identity);
    assert!(across.is_linear);
    assert!(!across.preserves_scalars);
    assert!(analyzer.tensor_product(&first, &foreign).is_none());
}

#[test]
fn tensor_products_over_z5() {
    let context = DiscoveryContext::standard();
    let analyzer = ModuleAnalyzer::new(&context);
    let ring = modular_ring(&context, 5);
    let whole = analyzer.create_module(&ring.elements, &ring, None).unwrap();

    let square = analyzer.tensor_product(&whole, &whole).unwrap();
    assert_eq!(square.elements, ring.elements);
    assert_eq!(square.generators, vec![BigInt::from(1)]);
    assert!(square.is_free);
    assert_eq!(square.rank, 1);

    let part = analyzer.create_module(&element_set([2]), &ring, None).unwrap();
    let product = analyzer.tensor_product(&part, &whole).unwrap();
    assert!(product.elements.is_subset(&ring.elements));
    assert_eq!(product.scalar_multiplication, ring.multiplication);
    assert!(Rc::ptr_eq(&product.scalar_ring, &ring));
}

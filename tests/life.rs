use emergent_algebra::{
    AlgebraicStructureDetector, DiscoveryConfig, DiscoveryContext, ElementSet, InteractionKind,
    LifeConfig, MorphismKind, StructureId, element_set,
};
use test_utilities::{ConstantMetric, consecutive, small_pool, symmetric};

const POOL_CAP: usize = 24;

fn small_context() -> DiscoveryContext {
    DiscoveryContext::standard_with_config(small_pool(POOL_CAP))
}

#[test]
fn life_of_z7() {
    let context = small_context();
    let detector = AlgebraicStructureDetector::new(&context);
    let life = detector.detect_algebraic_life(&consecutive(7));

    let ring = life.ring.as_ref().unwrap();
    assert!(ring.is_field);
    assert!(!life.modules.is_empty());
    for module in &life.modules {
        assert!(module.shares_scalar_ring(&life.modules[0]));
    }

    let pairs = life.groups.len() + 1 + life.modules.len();
    assert_eq!(life.ecology.interactions.len(), pairs * (pairs - 1) / 2);
    let additive = life
        .groups
        .iter()
        .position(|group| group.operation == ring.addition || group.elements == ring.elements);
    if let Some(index) = additive {
        assert!(life.ecology.interactions.iter().any(|interaction| {
            interaction.first == StructureId::Group(index)
                && interaction.second == StructureId::Ring
                && interaction.kind == InteractionKind::Enhancing
        }));
    }
}

#[test]
fn evolution_respects_its_caps() {
    let context = small_context();
    let life = AlgebraicStructureDetector::new(&context).detect_algebraic_life(&symmetric(3));
    let evolution = &life.evolution;

    assert_eq!(evolution.generations.len(), 5);
    assert!(evolution.final_pool.len() <= POOL_CAP);
    assert!(evolution.final_pool.is_superset(&symmetric(3)));
    for (index, generation) in evolution.generations.iter().enumerate() {
        assert_eq!(generation.index, index);
        assert!(generation.fitness <= evolution.best_fitness);
        assert!(generation.fitness >= 10.0 * generation.structure_count as f64);
    }
}

#[test]
fn configured_generations() {
    let config = DiscoveryConfig::builder()
        .life(LifeConfig {
            generations: 1,
            pool_cap: POOL_CAP,
            ..LifeConfig::default()
        })
        .build();
    let context = DiscoveryContext::standard_with_config(config);
    let life = AlgebraicStructureDetector::new(&context).detect_algebraic_life(&consecutive(5));
    assert_eq!(life.evolution.generations.len(), 1);
}

#[test]
fn category_of_discovered_structures() {
    let context = small_context();
    let detector = AlgebraicStructureDetector::new(&context);
    let life = detector.detect_algebraic_life(&consecutive(6));
    let category = detector.detect_category_structure(life.category_objects());

    let identities = category
        .morphisms
        .iter()
        .filter(|morphism| morphism.kind == MorphismKind::Identity)
        .count();
    assert_eq!(identities, category.objects.len());
    for morphism in &category.morphisms {
        let domain = &category.objects[morphism.domain];
        let codomain = &category.objects[morphism.codomain];
        assert!(!domain.elements.is_disjoint(&codomain.elements));
        assert!(
            morphism
                .preserved
                .iter()
                .all(|tag| domain.properties.contains(tag) && codomain.properties.contains(tag))
        );
    }
}

#[test]
fn scripted_metric() {
    let context = DiscoveryContext::new(ConstantMetric::new(1.0), small_pool(POOL_CAP));
    let life = AlgebraicStructureDetector::new(&context).detect_algebraic_life(&consecutive(4));
    assert!(!life.groups.is_empty());
    assert!(life.ring.is_some());
}

#[test]
fn empty_input() {
    let context = small_context();
    let detector = AlgebraicStructureDetector::new(&context);
    let life = detector.detect_algebraic_life(&ElementSet::new());
    assert!(life.groups.is_empty() && life.ring.is_none() && life.modules.is_empty());
    assert!(life.evolution.final_pool.is_empty());
}

#[test]
fn reports_serialize() {
    let context = small_context();
    let detector = AlgebraicStructureDetector::new(&context);
    let life = detector.detect_algebraic_life(&element_set([0, 1, 2]));
    let report = serde_json::to_value(&life).unwrap();
    assert!(report["groups"].is_array());
    assert!(report["ring"]["elements"].is_array());
    assert_eq!(report["evolution"]["generations"].as_array().unwrap().len(), 5);

    let config = DiscoveryConfig::builder().partition_size(24).build();
    let json = serde_json::to_string(&config).unwrap();
    let restored: DiscoveryConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}

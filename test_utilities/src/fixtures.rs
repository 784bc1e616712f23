use std::rc::Rc;

use emergent_algebra::{
    DiscoveryConfig, DiscoveryContext, ElementSet, Environment, LifeConfig, RingDetector,
    RingStructure, element_set,
};

/// `{0, 1, ..., n - 1}`.
pub fn consecutive(n: i64) -> ElementSet {
    element_set(0..n)
}

/// `{-radius, ..., radius}`.
pub fn symmetric(radius: i64) -> ElementSet {
    element_set(-radius..=radius)
}

/// `{1, -1}`.
pub fn units() -> ElementSet {
    element_set([1, -1])
}

/// The ring discovered in `{0, ..., n - 1}`, shared so modules can be built
/// over it.
pub fn modular_ring<E: Environment>(context: &DiscoveryContext<E>, n: i64) -> Rc<RingStructure> {
    let ring = RingDetector::new(context)
        .detect_ring_structure(&consecutive(n))
        .expect("consecutive integers from zero form a modular ring");
    Rc::new(ring)
}

/// Default limits, except that evolution pools stop growing at `pool_cap`.
pub fn small_pool(pool_cap: usize) -> DiscoveryConfig {
    DiscoveryConfig::builder()
        .life(LifeConfig {
            pool_cap,
            ..LifeConfig::default()
        })
        .build()
}

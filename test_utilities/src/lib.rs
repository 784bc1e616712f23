pub use environments::{ConstantMetric, FailingFactorizer, context_with};
pub use fixtures::{consecutive, modular_ring, small_pool, symmetric, units};

mod environments;
mod fixtures;

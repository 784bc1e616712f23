use emergent_algebra::{
    AlgebraError, DiscoveryConfig, DiscoveryContext, Environment, FactorProvider,
    FieldArithmetic, FieldPattern, PartitionLocation, PartitionLocator, PatternSource, Product,
    SimilarityMetric, StandardEnvironment,
};
use num_bigint::BigInt;

/// Standard collaborators, except that every integer has the same metric.
#[derive(Clone, Debug)]
pub struct ConstantMetric {
    standard: StandardEnvironment,
    value: f64,
}

impl ConstantMetric {
    pub fn new(value: f64) -> Self {
        Self {
            standard: StandardEnvironment::default(),
            value,
        }
    }
}

impl PatternSource for ConstantMetric {
    fn field_pattern(&self, n: &BigInt) -> FieldPattern {
        self.standard.field_pattern(n)
    }
}

impl SimilarityMetric for ConstantMetric {
    fn resonance(&self, _n: &BigInt) -> f64 {
        self.value
    }
}

impl PartitionLocator for ConstantMetric {
    fn locate(&self, n: &BigInt) -> PartitionLocation {
        self.standard.locate(n)
    }
}

impl FactorProvider for ConstantMetric {
    fn factorize(&self, n: &BigInt) -> Result<Vec<BigInt>, AlgebraError> {
        self.standard.factorize(n)
    }

    fn multiply(&self, a: &BigInt, b: &BigInt) -> Result<Product, AlgebraError> {
        self.standard.multiply(a, b)
    }
}

impl FieldArithmetic for ConstantMetric {
    fn field_add(&self, a: &BigInt, b: &BigInt) -> Result<BigInt, AlgebraError> {
        self.standard.field_add(a, b)
    }

    fn field_multiply(&self, a: &BigInt, b: &BigInt) -> Result<BigInt, AlgebraError> {
        self.standard.field_multiply(a, b)
    }
}

/// Standard collaborators whose factoring and field arithmetic always fail.
#[derive(Clone, Debug, Default)]
pub struct FailingFactorizer {
    standard: StandardEnvironment,
}

fn unavailable() -> AlgebraError {
    AlgebraError::Collaborator(String::from("collaborator unavailable"))
}

impl PatternSource for FailingFactorizer {
    fn field_pattern(&self, n: &BigInt) -> FieldPattern {
        self.standard.field_pattern(n)
    }
}

impl SimilarityMetric for FailingFactorizer {
    fn resonance(&self, n: &BigInt) -> f64 {
        self.standard.resonance(n)
    }
}

impl PartitionLocator for FailingFactorizer {
    fn locate(&self, n: &BigInt) -> PartitionLocation {
        self.standard.locate(n)
    }
}

impl FactorProvider for FailingFactorizer {
    fn factorize(&self, _n: &BigInt) -> Result<Vec<BigInt>, AlgebraError> {
        Err(unavailable())
    }

    fn multiply(&self, _a: &BigInt, _b: &BigInt) -> Result<Product, AlgebraError> {
        Err(unavailable())
    }
}

impl FieldArithmetic for FailingFactorizer {
    fn field_add(&self, _a: &BigInt, _b: &BigInt) -> Result<BigInt, AlgebraError> {
        Err(unavailable())
    }

    fn field_multiply(&self, _a: &BigInt, _b: &BigInt) -> Result<BigInt, AlgebraError> {
        Err(unavailable())
    }
}

/// `environment` with the default limits.
pub fn context_with<E: Environment>(environment: E) -> DiscoveryContext<E> {
    DiscoveryContext::new(environment, DiscoveryConfig::default())
}

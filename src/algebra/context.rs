// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use num_bigint::BigInt;
use tracing::trace;

use crate::algebra::residue::Residue;
use crate::environment::{Environment, FieldPattern, PartitionLocation, StandardEnvironment};
use crate::{AlgebraError, DiscoveryConfig, OpKind, Operation};

/// The collaborators and limits shared by every detector.
///
/// The context is the single evaluator of [`Operation`] descriptors, so
/// structures never capture detector state: a structure plus a context is
/// enough to evaluate any of its operations.
///
/// # Examples
///
/// ```rust
/// use emergent_algebra::{DiscoveryContext, OpKind, Operation};
/// use num_bigint::BigInt;
///
/// let context = DiscoveryContext::standard();
/// let add = Operation::modular(5, OpKind::Add);
/// let sum = context.apply(&add, &BigInt::from(3), &BigInt::from(4));
/// assert_eq!(sum, Ok(BigInt::from(2)));
/// ```
#[derive(Clone, Debug)]
pub struct DiscoveryContext<E = StandardEnvironment> {
    environment: E,
    config: DiscoveryConfig,
}

impl DiscoveryContext<StandardEnvironment> {
    /// Standard collaborators with default limits.
    pub fn standard() -> Self {
        Self::standard_with_config(DiscoveryConfig::default())
    }

    /// Standard collaborators whose partition size follows `config`.
    pub fn standard_with_config(config: DiscoveryConfig) -> Self {
        let environment = StandardEnvironment::new(config.lattice.partition_size);
        Self::new(environment, config)
    }
}

impl Default for DiscoveryContext<StandardEnvironment> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<E: Environment> DiscoveryContext<E> {
    /// Combine an environment with discovery limits.
    pub fn new(environment: E, config: DiscoveryConfig) -> Self {
        Self {
            environment,
            config,
        }
    }

    /// The collaborators.
    pub fn environment(&self) -> &E {
        &self.environment
    }

    /// The discovery limits.
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Evaluate `operation` at `(a, b)`.
    pub fn apply(
        &self,
        operation: &Operation,
        a: &BigInt,
        b: &BigInt,
    ) -> Result<BigInt, AlgebraError> {
        match operation {
            Operation::Plain(kind) => Ok(kind.plain(a, b)),
            Operation::Modular { modulus, kind } => {
                let lhs = Residue::new(a, modulus)?;
                let rhs = Residue::new(b, modulus)?;
                let result = match kind {
                    OpKind::Add => lhs + rhs,
                    OpKind::Mul => lhs * rhs,
                };
                Ok(result.into_remainder())
            }
            Operation::PartitionModular { partition, kind } => {
                self.partition_modular(partition, *kind, a, b)
            }
            Operation::PartitionBounded { partition, kind } => {
                let result = self.field_apply(*kind, a, b)?;
                if self.environment.locate(&result).partition == *partition {
                    Ok(result)
                } else {
                    self.partition_modular(partition, *kind, a, b)
                }
            }
            Operation::FieldAware(kind) => self.field_apply(*kind, a, b),
            Operation::Quotient {
                base,
                representatives,
            } => {
                let result = self.apply(base, a, b)?;
                representatives
                    .get(&result)
                    .cloned()
                    .ok_or(AlgebraError::MissingRepresentative(result))
            }
        }
    }

    /// Evaluate `operation`, mapping failure to `None`.
    pub fn try_apply(&self, operation: &Operation, a: &BigInt, b: &BigInt) -> Option<BigInt> {
        match self.apply(operation, a, b) {
            Ok(result) => Some(result),
            Err(error) => {
                trace!("{operation} undefined at ({a}, {b}): {error}");
                None
            }
        }
    }

    /// Metric value of `n`.
    pub fn resonance(&self, n: &BigInt) -> f64 {
        self.environment.resonance(n)
    }

    /// Field pattern of `n`.
    pub fn pattern(&self, n: &BigInt) -> FieldPattern {
        self.environment.field_pattern(n)
    }

    /// Partition block of `n`.
    pub fn locate(&self, n: &BigInt) -> PartitionLocation {
        self.environment.locate(n)
    }

    /// First number of partition block `partition`.
    pub fn partition_base(&self, partition: &BigInt) -> BigInt {
        partition * BigInt::from(self.config.lattice.partition_size)
    }

    /// Metric value quantized to the configured number of decimal places.
    pub fn quantized_resonance(&self, n: &BigInt) -> i64 {
        let scale = 10f64.powi(self.config.groups.metric_precision as i32);
        (self.resonance(n) * scale).round() as i64
    }

    fn field_apply(&self, kind: OpKind, a: &BigInt, b: &BigInt) -> Result<BigInt, AlgebraError> {
        match kind {
            OpKind::Add => self.environment.field_add(a, b),
            OpKind::Mul => self.environment.field_multiply(a, b),
        }
    }

    fn partition_modular(
        &self,
        partition: &BigInt,
        kind: OpKind,
        a: &BigInt,
        b: &BigInt,
    ) -> Result<BigInt, AlgebraError> {
        let size = BigInt::from(self.config.lattice.partition_size);
        let base = self.partition_base(partition);
        let offset = kind.plain(&(a - &base), &(b - &base));
        Ok(Residue::new(&offset, &size)?.into_remainder() + base)
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use num_bigint::BigInt;

use crate::config::DiscoveryConfig;
use crate::environment::{Environment, artifact_signature};
use crate::groups::buckets;
use crate::rings::{NaturalBoundary, RingKind};
use crate::{DiscoveryContext, ElementSet, OpKind, Operation};

/// The natural ring type of `numbers`, checked in order: consecutive from
/// zero, dominant metric cluster, artifact majority, dominant partition.
pub(crate) fn classify<E: Environment>(
    context: &DiscoveryContext<E>,
    numbers: &ElementSet,
) -> RingKind {
    let config = context.config();
    let count = numbers.len();
    if count == 0 {
        return RingKind::General;
    }

    let consecutive = numbers
        .iter()
        .zip(0u64..)
        .all(|(n, expected)| *n == BigInt::from(expected));
    if consecutive {
        let boundary = if count == config.lattice.partition_size as usize {
            Some(NaturalBoundary::Partition)
        } else if count == config.lattice.cycle_size as usize {
            Some(NaturalBoundary::Cycle)
        } else {
            None
        };
        return RingKind::Modular {
            modulus: BigInt::from(count),
            boundary,
        };
    }

    let share = |size: usize| size as f64 / count as f64;

    let by_metric = buckets(numbers, |n| context.quantized_resonance(n));
    if let Some((key, cluster)) = by_metric
        .into_iter()
        .max_by_key(|(key, cluster)| (cluster.len(), std::cmp::Reverse(*key)))
    {
        if share(cluster.len()) > config.rings.dominant_metric_share {
            let scale = 10f64.powi(config.groups.metric_precision as i32);
            let partition = buckets(&cluster, |n| context.locate(n).partition)
                .into_iter()
                .max_by_key(|(partition, members)| {
                    (members.len(), std::cmp::Reverse(partition.clone()))
                })
                .map(|(partition, _)| partition)
                .unwrap_or_default();
            return RingKind::Similarity {
                metric: key as f64 / scale,
                partition,
            };
        }
    }

    let with_artifacts = numbers
        .iter()
        .filter(|n| artifact_signature(context.environment(), n).is_some())
        .count();
    if share(with_artifacts) > config.rings.artifact_share {
        return RingKind::Artifact;
    }

    let by_partition = buckets(numbers, |n| context.locate(n).partition);
    if let Some((partition, members)) = by_partition
        .into_iter()
        .max_by_key(|(partition, members)| (members.len(), std::cmp::Reverse(partition.clone())))
    {
        if share(members.len()) > config.rings.dominant_partition_share {
            return RingKind::PartitionLocal { partition };
        }
    }

    RingKind::General
}

/// Addition and multiplication for rings of `kind`.
pub(crate) fn operations(kind: &RingKind) -> (Operation, Operation) {
    match kind {
        RingKind::Modular { modulus, .. } => (
            Operation::modular(modulus.clone(), OpKind::Add),
            Operation::modular(modulus.clone(), OpKind::Mul),
        ),
        RingKind::Similarity { partition, .. } | RingKind::PartitionLocal { partition } => (
            Operation::PartitionBounded {
                partition: partition.clone(),
                kind: OpKind::Add,
            },
            Operation::PartitionBounded {
                partition: partition.clone(),
                kind: OpKind::Mul,
            },
        ),
        RingKind::Artifact | RingKind::General | RingKind::Quotient => (
            Operation::Plain(OpKind::Add),
            Operation::Plain(OpKind::Mul),
        ),
    }
}

/// Size cap of the closure growing a ring of `kind`.
pub(crate) fn boundary_size(config: &DiscoveryConfig, kind: &RingKind) -> usize {
    let cycle = config.lattice.cycle_size as usize;
    match kind {
        RingKind::Modular { modulus, .. } => usize::try_from(modulus).unwrap_or(cycle),
        RingKind::PartitionLocal { .. } => config.lattice.partition_size as usize,
        RingKind::Similarity { .. } => 2 * config.lattice.correlation_length as usize,
        RingKind::Artifact | RingKind::General | RingKind::Quotient => cycle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element_set;

    #[test]
    fn consecutive_integers_are_modular() {
        let context = DiscoveryContext::standard();
        assert_eq!(
            classify(&context, &element_set(0..6)),
            RingKind::Modular {
                modulus: BigInt::from(6),
                boundary: None
            }
        );
        assert_eq!(
            classify(&context, &element_set(0..48)),
            RingKind::Modular {
                modulus: BigInt::from(48),
                boundary: Some(NaturalBoundary::Partition)
            }
        );
        assert_eq!(
            classify(&context, &element_set(0..256)),
            RingKind::Modular {
                modulus: BigInt::from(256),
                boundary: Some(NaturalBoundary::Cycle)
            }
        );
        assert_ne!(
            classify(&context, &element_set(1..6)),
            RingKind::Modular {
                modulus: BigInt::from(5),
                boundary: None
            }
        );
    }

    #[test]
    fn dominant_partition() {
        let context = DiscoveryContext::standard();
        // primes carry no artifacts and have pairwise distinct metric values;
        // six of the seven live in partition 2
        let numbers = element_set([5, 97, 101, 103, 107, 109, 113]);
        assert_eq!(
            classify(&context, &numbers),
            RingKind::PartitionLocal {
                partition: BigInt::from(2)
            }
        );
        assert_eq!(classify(&context, &element_set([5, 97])), RingKind::General);
    }

    #[test]
    fn modular_operations_and_boundaries() {
        let config = DiscoveryConfig::default();
        let kind = RingKind::Modular {
            modulus: BigInt::from(7),
            boundary: None,
        };
        assert_eq!(
            operations(&kind),
            (
                Operation::modular(7, OpKind::Add),
                Operation::modular(7, OpKind::Mul)
            )
        );
        assert_eq!(boundary_size(&config, &kind), 7);
        assert_eq!(
            boundary_size(
                &config,
                &RingKind::Similarity {
                    metric: 1.0,
                    partition: BigInt::from(0)
                }
            ),
            150
        );
        assert_eq!(boundary_size(&config, &RingKind::General), 256);
    }
}

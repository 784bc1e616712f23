// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::algebra::{ClosureLimits, Sampling, bounded_closure};
use crate::environment::{Environment, artifact_signature};
use crate::groups::crystallize::{Cluster, crystallize, has_inverses, is_closed};
use crate::groups::{GroupOrigin, GroupStructure};
use crate::{DiscoveryContext, ElementSet, OpKind, Operation};

/// One independent route to candidate groups.
///
/// [`crate::GroupDetector`] runs a list of strategies over the same input and
/// concatenates their results. Strategies never fail: a cluster that cannot
/// be crystallized is silently dropped.
pub trait GroupDiscovery<E: Environment> {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Candidate groups emerging from `numbers`.
    fn discover(&self, context: &DiscoveryContext<E>, numbers: &ElementSet)
    -> Vec<GroupStructure>;
}

/// The additive group when `0` is present and the multiplicative group when
/// `1` is present, both under plain integer arithmetic.
#[derive(Copy, Clone, Debug, Default)]
pub struct BasicGroups;

/// Groups crystallized from buckets of equal quantized metric value.
#[derive(Copy, Clone, Debug, Default)]
pub struct SimilarityClusters;

/// Groups crystallized from buckets of equal active pattern-bit count,
/// targeting each bucket's mean metric.
#[derive(Copy, Clone, Debug, Default)]
pub struct HarmonicClusters;

/// One group per partition block under block-local modular addition.
#[derive(Copy, Clone, Debug, Default)]
pub struct PartitionLocalGroups;

/// Groups crystallized from integers near the anchor offsets of a block.
#[derive(Copy, Clone, Debug, Default)]
pub struct AnchorPointGroups;

/// Groups crystallized from buckets of equal factoring artifact signature.
#[derive(Copy, Clone, Debug, Default)]
pub struct ArtifactSignatureGroups;

/// The standard strategy list, in discovery order.
pub fn standard_strategies<E: Environment>() -> Vec<Box<dyn GroupDiscovery<E>>> {
    vec![
        Box::new(BasicGroups),
        Box::new(SimilarityClusters),
        Box::new(HarmonicClusters),
        Box::new(PartitionLocalGroups),
        Box::new(AnchorPointGroups),
        Box::new(ArtifactSignatureGroups),
    ]
}

impl<E: Environment> GroupDiscovery<E> for BasicGroups {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn discover(
        &self,
        context: &DiscoveryContext<E>,
        numbers: &ElementSet,
    ) -> Vec<GroupStructure> {
        let mut groups = Vec::new();
        let zero = BigInt::zero();
        let one = BigInt::one();

        if numbers.contains(&zero) {
            let operation = Operation::Plain(OpKind::Add);
            groups.push(GroupStructure {
                is_closed: is_closed(context, numbers, &operation),
                has_inverses: numbers.iter().all(|a| numbers.contains(&-a)),
                is_abelian: true,
                elements: numbers.clone(),
                identity: zero,
                operation,
                subgroups: Vec::new(),
                origin: GroupOrigin::Additive,
                stability: 1.0,
            });
        }

        if numbers.contains(&one) {
            let operation = Operation::Plain(OpKind::Mul);
            let minus_one = -BigInt::one();
            let units_only = numbers.iter().all(|a| *a == one || *a == minus_one);
            let (is_closed, has_inverses) = if units_only {
                (true, true)
            } else {
                (
                    is_closed(context, numbers, &operation),
                    has_inverses(context, numbers, &one, &operation),
                )
            };
            groups.push(GroupStructure {
                is_closed,
                has_inverses,
                is_abelian: true,
                elements: numbers.clone(),
                identity: one,
                operation,
                subgroups: Vec::new(),
                origin: GroupOrigin::Multiplicative,
                stability: 1.0,
            });
        }
        groups
    }
}

impl<E: Environment> GroupDiscovery<E> for SimilarityClusters {
    fn name(&self) -> &'static str {
        "similarity"
    }

    fn discover(
        &self,
        context: &DiscoveryContext<E>,
        numbers: &ElementSet,
    ) -> Vec<GroupStructure> {
        let scale = 10f64.powi(context.config().groups.metric_precision as i32);
        buckets(numbers, |n| context.quantized_resonance(n))
            .into_iter()
            .filter(|(_, bucket)| bucket.len() >= context.config().groups.min_cluster_size)
            .filter_map(|(key, bucket)| {
                let metric = key as f64 / scale;
                crystallize(
                    context,
                    Cluster::new(bucket, metric, GroupOrigin::Similarity { metric }),
                )
            })
            .collect()
    }
}

impl<E: Environment> GroupDiscovery<E> for HarmonicClusters {
    fn name(&self) -> &'static str {
        "harmonic"
    }

    fn discover(
        &self,
        context: &DiscoveryContext<E>,
        numbers: &ElementSet,
    ) -> Vec<GroupStructure> {
        buckets(numbers, |n| context.pattern(n).active_count())
            .into_iter()
            .filter(|(_, bucket)| bucket.len() >= context.config().groups.min_cluster_size)
            .filter_map(|(active_bits, bucket)| {
                let target = mean_resonance(context, &bucket);
                crystallize(
                    context,
                    Cluster::new(bucket, target, GroupOrigin::Harmonic { active_bits }),
                )
            })
            .collect()
    }
}

impl<E: Environment> GroupDiscovery<E> for PartitionLocalGroups {
    fn name(&self) -> &'static str {
        "partition-local"
    }

    fn discover(
        &self,
        context: &DiscoveryContext<E>,
        numbers: &ElementSet,
    ) -> Vec<GroupStructure> {
        let config = context.config();
        buckets(numbers, |n| context.locate(n).partition)
            .into_iter()
            .filter(|(_, bucket)| bucket.len() >= config.groups.min_cluster_size)
            .map(|(partition, bucket)| {
                let identity = context.partition_base(&partition);
                let operation = Operation::PartitionModular {
                    partition: partition.clone(),
                    kind: OpKind::Add,
                };
                let limits = ClosureLimits {
                    iterations: config.closure.iterations,
                    sample: config.closure.sample,
                    max_size: config.lattice.partition_size as usize,
                    sampling: Sampling::Elements,
                };
                let apply = |a: &BigInt, b: &BigInt| context.try_apply(&operation, a, b);
                let mut seed = bucket;
                seed.insert(identity.clone());
                let elements = bounded_closure(seed, &limits, &[&apply], |_| true).elements;
                GroupStructure {
                    is_closed: is_closed(context, &elements, &operation),
                    has_inverses: true,
                    is_abelian: true,
                    elements,
                    identity,
                    operation,
                    subgroups: Vec::new(),
                    origin: GroupOrigin::PartitionLocal { partition },
                    stability: 1.0,
                }
            })
            .collect()
    }
}

impl<E: Environment> GroupDiscovery<E> for AnchorPointGroups {
    fn name(&self) -> &'static str {
        "anchor-point"
    }

    fn discover(
        &self,
        context: &DiscoveryContext<E>,
        numbers: &ElementSet,
    ) -> Vec<GroupStructure> {
        let config = context.config();
        let anchored: ElementSet = numbers
            .iter()
            .filter(|n| is_anchored(context, n))
            .cloned()
            .collect();
        buckets(&anchored, |n| context.locate(n).partition)
            .into_iter()
            .filter(|(_, bucket)| bucket.len() >= config.groups.min_cluster_size)
            .filter_map(|(partition, bucket)| {
                let target = mean_resonance(context, &bucket);
                let mut cluster =
                    Cluster::new(bucket, target, GroupOrigin::AnchorPoint { partition });
                cluster.stability_factor = config.groups.anchor_stability_factor;
                crystallize(context, cluster)
            })
            .collect()
    }
}

impl<E: Environment> GroupDiscovery<E> for ArtifactSignatureGroups {
    fn name(&self) -> &'static str {
        "artifact-signature"
    }

    fn discover(
        &self,
        context: &DiscoveryContext<E>,
        numbers: &ElementSet,
    ) -> Vec<GroupStructure> {
        let config = context.config();
        let mut signed: BTreeMap<String, ElementSet> = BTreeMap::new();
        for n in numbers {
            if let Some(signature) = artifact_signature(context.environment(), n) {
                signed.entry(signature).or_default().insert(n.clone());
            }
        }
        signed
            .into_iter()
            .filter(|(_, bucket)| bucket.len() >= config.groups.min_cluster_size)
            .filter_map(|(signature, bucket)| {
                crystallize(
                    context,
                    Cluster::new(
                        bucket,
                        config.groups.artifact_target_metric,
                        GroupOrigin::ArtifactSignature { signature },
                    ),
                )
            })
            .collect()
    }
}

/// Group `numbers` by `key`.
pub(crate) fn buckets<K: Ord, F: Fn(&BigInt) -> K>(
    numbers: &ElementSet,
    key: F,
) -> BTreeMap<K, ElementSet> {
    let mut buckets: BTreeMap<K, ElementSet> = BTreeMap::new();
    for n in numbers {
        buckets.entry(key(n)).or_default().insert(n.clone());
    }
    buckets
}

fn mean_resonance<E: Environment>(context: &DiscoveryContext<E>, elements: &ElementSet) -> f64 {
    if elements.is_empty() {
        return 0.0;
    }
    elements.iter().map(|n| context.resonance(n)).sum::<f64>() / elements.len() as f64
}

/// Whether `n`, reduced modulo the cycle size, lies within the anchor radius
/// of an anchor offset.
pub(crate) fn is_anchored<E: Environment>(context: &DiscoveryContext<E>, n: &BigInt) -> bool {
    let config = context.config();
    let position = n
        .mod_floor(&BigInt::from(config.lattice.cycle_size))
        .to_i64()
        .unwrap_or_default();
    config
        .groups
        .anchor_offsets
        .iter()
        .any(|offset| {
            (position - i64::from(*offset)).abs() <= i64::from(config.groups.anchor_radius)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element_set;
    use crate::environment::StandardEnvironment;

    #[test]
    fn additive_group() {
        let context = DiscoveryContext::standard();
        let groups = BasicGroups.discover(&context, &element_set([0, 1, -1, 2, -2]));
        let additive = groups
            .iter()
            .find(|group| group.origin == GroupOrigin::Additive)
            .unwrap();
        assert_eq!(additive.identity, BigInt::from(0));
        assert!(additive.has_inverses);
        assert!(additive.is_abelian);
        assert!(!additive.is_closed);
    }

    #[test]
    fn multiplicative_units() {
        let context = DiscoveryContext::standard();
        let groups = BasicGroups.discover(&context, &element_set([1, -1]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].origin, GroupOrigin::Multiplicative);
        assert!(groups[0].is_closed && groups[0].has_inverses);

        let groups = BasicGroups.discover(&context, &element_set([1, 2]));
        assert!(!groups[0].is_closed);
        assert!(!groups[0].has_inverses);
    }

    #[test]
    fn partition_local() {
        let context = DiscoveryContext::standard();
        let groups = PartitionLocalGroups.discover(&context, &element_set([49, 50, 51, 2]));
        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.identity, BigInt::from(48));
        assert!(group.contains_all(48..96));
        assert!(group.is_closed && group.has_inverses);
    }

    #[test]
    fn anchors() {
        let context = DiscoveryContext::standard();
        let anchored: Vec<i64> = (0..60)
            .filter(|n| is_anchored(&context, &BigInt::from(*n)))
            .collect();
        assert_eq!(anchored, vec![0, 1, 2, 3, 46, 47, 48, 49, 50, 51]);
        assert!(is_anchored(&context, &BigInt::from(257)));
    }

    #[test]
    fn empty_input() {
        let context = DiscoveryContext::standard();
        for strategy in standard_strategies::<StandardEnvironment>() {
            assert!(strategy.discover(&context, &ElementSet::new()).is_empty());
        }
    }

    impl GroupStructure {
        fn contains_all(&self, range: std::ops::Range<i64>) -> bool {
            range.map(BigInt::from).all(|n| self.elements.contains(&n))
        }
    }
}

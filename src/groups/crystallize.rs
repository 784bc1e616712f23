// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turning a raw cluster of integers into a candidate group: find an operation
//! preserving the cluster's metric, find its identity, grow the cluster by
//! bounded closure and verify the group laws on a sample.

use num_bigint::BigInt;
use tracing::trace;

use crate::algebra::{ClosureLimits, Sampling, bounded_closure, sample};
use crate::config::DiscoveryConfig;
use crate::environment::Environment;
use crate::groups::{GroupOrigin, GroupStructure};
use crate::{DiscoveryContext, ElementSet, OpKind, Operation};

/// A cluster of integers awaiting crystallization.
pub(crate) struct Cluster {
    pub elements: ElementSet,
    pub target: f64,
    pub origin: GroupOrigin,
    pub stability_factor: f64,
}

impl Cluster {
    pub fn new(elements: ElementSet, target: f64, origin: GroupOrigin) -> Self {
        Self {
            elements,
            target,
            origin,
            stability_factor: 1.0,
        }
    }
}

/// Crystallize `cluster`, or `None` if no preserving operation or identity
/// exists.
pub(crate) fn crystallize<E: Environment>(
    context: &DiscoveryContext<E>,
    cluster: Cluster,
) -> Option<GroupStructure> {
    let Some((operation, preservation)) =
        preserving_operation(context, &cluster.elements, cluster.target)
    else {
        trace!("{:?}: no metric-preserving operation", cluster.origin);
        return None;
    };
    let Some(identity) = find_identity(context, &cluster.elements, &operation) else {
        trace!("{:?}: no identity for {operation}", cluster.origin);
        return None;
    };

    let config = context.config();
    let limits = ClosureLimits {
        iterations: config.closure.iterations,
        sample: config.closure.sample,
        max_size: config.closure.max_group_size,
        sampling: Sampling::Elements,
    };
    let tolerance = config.groups.closure_tolerance;
    let target = cluster.target;
    let apply = |a: &BigInt, b: &BigInt| context.try_apply(&operation, a, b);

    let mut seed = cluster.elements;
    seed.insert(identity.clone());
    let closure = bounded_closure(seed, &limits, &[&apply], |x| {
        (context.resonance(x) - target).abs() <= tolerance
    });
    if !closure.converged {
        trace!(
            "{:?}: closure truncated at {} elements",
            cluster.origin,
            closure.elements.len()
        );
    }
    let elements = closure.elements;

    Some(GroupStructure {
        is_closed: is_closed(context, &elements, &operation),
        has_inverses: has_inverses(context, &elements, &identity, &operation),
        is_abelian: is_abelian(context, &elements, &operation),
        elements,
        identity,
        operation,
        subgroups: Vec::new(),
        origin: cluster.origin,
        stability: (preservation * cluster.stability_factor).min(1.0),
    })
}

/// Modulus derived from a metric value, kept within `[2, cycle_size]`.
pub(crate) fn metric_modulus(config: &DiscoveryConfig, metric: f64) -> BigInt {
    let partition = f64::from(config.lattice.partition_size);
    let cycle = i64::from(config.lattice.cycle_size);
    let modulus = (metric * partition).round();
    let modulus = if modulus.is_finite() { modulus as i64 } else { cycle };
    BigInt::from(modulus.clamp(2, cycle.max(2)))
}

/// Operations tried during crystallization, in order of preference.
fn candidate_operations(config: &DiscoveryConfig, target: f64) -> Vec<Operation> {
    let mut candidates = vec![
        Operation::Modular {
            modulus: metric_modulus(config, target),
            kind: OpKind::Add,
        },
        Operation::FieldAware(OpKind::Add),
    ];
    if (target - 1.0).abs() <= config.groups.unity_tolerance {
        candidates.push(Operation::Plain(OpKind::Add));
    }
    candidates
}

/// First candidate operation preserving `target` on enough sampled pairs,
/// together with the observed preservation ratio.
fn preserving_operation<E: Environment>(
    context: &DiscoveryContext<E>,
    elements: &ElementSet,
    target: f64,
) -> Option<(Operation, f64)> {
    let minimum = context.config().groups.min_preservation;
    candidate_operations(context.config(), target)
        .into_iter()
        .find_map(|operation| {
            let ratio = preservation(context, elements, &operation, target)?;
            (ratio >= minimum).then_some((operation, ratio))
        })
}

/// Fraction of sampled unordered pairs whose result stays within the metric
/// tolerance of `target`. Undefined results count as failures; `None` if
/// there is nothing to sample.
pub(crate) fn preservation<E: Environment>(
    context: &DiscoveryContext<E>,
    elements: &ElementSet,
    operation: &Operation,
    target: f64,
) -> Option<f64> {
    let tolerance = context.config().groups.metric_tolerance;
    let sampled = sample(elements, context.config().closure.sample);
    let mut total = 0usize;
    let mut preserved = 0usize;
    for (index, a) in sampled.iter().enumerate() {
        for b in &sampled[index..] {
            total += 1;
            if let Some(result) = context.try_apply(operation, a, b) {
                if (context.resonance(&result) - target).abs() <= tolerance {
                    preserved += 1;
                }
            }
        }
    }
    (total > 0).then(|| preserved as f64 / total as f64)
}

/// A two-sided identity among `elements`, else among the configured
/// fallback constants.
pub(crate) fn find_identity<E: Environment>(
    context: &DiscoveryContext<E>,
    elements: &ElementSet,
    operation: &Operation,
) -> Option<BigInt> {
    let sampled = sample(elements, context.config().closure.sample);
    if sampled.is_empty() {
        return None;
    }
    let is_identity = |candidate: &BigInt| {
        sampled.iter().all(|x| {
            context.try_apply(operation, candidate, x).as_ref() == Some(*x)
                && context.try_apply(operation, x, candidate).as_ref() == Some(*x)
        })
    };
    elements.iter().find(|e| is_identity(e)).cloned().or_else(|| {
        context
            .config()
            .groups
            .identity_fallbacks
            .iter()
            .map(|fallback| BigInt::from(*fallback))
            .find(|e| is_identity(e))
    })
}

/// Whether every sampled ordered pair has a defined product inside `elements`.
pub(crate) fn is_closed<E: Environment>(
    context: &DiscoveryContext<E>,
    elements: &ElementSet,
    operation: &Operation,
) -> bool {
    let sampled = sample(elements, context.config().closure.sample);
    sampled.iter().all(|a| {
        sampled.iter().all(|b| {
            context
                .try_apply(operation, a, b)
                .is_some_and(|result| elements.contains(&result))
        })
    })
}

/// Whether every sampled element has a right inverse inside `elements`.
pub(crate) fn has_inverses<E: Environment>(
    context: &DiscoveryContext<E>,
    elements: &ElementSet,
    identity: &BigInt,
    operation: &Operation,
) -> bool {
    sample(elements, context.config().closure.sample)
        .into_iter()
        .all(|x| {
            elements
                .iter()
                .any(|y| context.try_apply(operation, x, y).as_ref() == Some(identity))
        })
}

/// Whether every sampled pair commutes.
pub(crate) fn is_abelian<E: Environment>(
    context: &DiscoveryContext<E>,
    elements: &ElementSet,
    operation: &Operation,
) -> bool {
    let sampled = sample(elements, context.config().closure.sample);
    sampled.iter().enumerate().all(|(index, a)| {
        sampled[index + 1..]
            .iter()
            .all(|b| context.try_apply(operation, a, b) == context.try_apply(operation, b, a))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element_set;

    #[test]
    fn modulus_is_clamped() {
        let config = DiscoveryConfig::default();
        assert_eq!(metric_modulus(&config, 1.0), BigInt::from(48));
        assert_eq!(metric_modulus(&config, 0.01), BigInt::from(2));
        assert_eq!(metric_modulus(&config, 100.0), BigInt::from(256));
        assert_eq!(metric_modulus(&config, f64::NAN), BigInt::from(256));
    }

    #[test]
    fn plain_addition_only_near_unity() {
        let config = DiscoveryConfig::default();
        assert_eq!(candidate_operations(&config, 1.1).len(), 3);
        assert_eq!(candidate_operations(&config, 1.618).len(), 2);
    }

    #[test]
    fn identity_search() {
        let context = DiscoveryContext::standard();
        let elements = element_set([1, 2, 3]);
        // 0 is not a member, so it is found among the fallbacks
        assert_eq!(
            find_identity(&context, &elements, &Operation::modular(5, OpKind::Add)),
            Some(BigInt::from(0))
        );
        assert_eq!(
            find_identity(&context, &elements, &Operation::Plain(OpKind::Mul)),
            Some(BigInt::from(1))
        );
        assert_eq!(
            find_identity(&context, &ElementSet::new(), &Operation::Plain(OpKind::Mul)),
            None
        );
    }

    #[test]
    fn sampled_laws() {
        let context = DiscoveryContext::standard();
        let operation = Operation::modular(5, OpKind::Add);
        let zmod5 = element_set(0..5);
        assert!(is_closed(&context, &zmod5, &operation));
        assert!(has_inverses(&context, &zmod5, &BigInt::from(0), &operation));
        assert!(is_abelian(&context, &zmod5, &operation));

        let partial = element_set(0..3);
        assert!(!is_closed(&context, &partial, &operation));
        assert!(!has_inverses(&context, &partial, &BigInt::from(0), &operation));
    }
}

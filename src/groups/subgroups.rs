// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeSet;

use num_bigint::BigInt;
use tracing::trace;

use crate::algebra::{ClosureLimits, Sampling, bounded_closure};
use crate::environment::Environment;
use crate::groups::crystallize::{has_inverses, is_abelian, is_closed};
use crate::groups::strategies::buckets;
use crate::groups::{GroupOrigin, GroupStructure};
use crate::{DiscoveryContext, ElementSet};

/// Subgroups of `group`: the trivial subgroup and the whole group first,
/// then cyclic subgroups, then metric and partition re-clusters. Candidates
/// repeating an earlier element set are dropped, except the whole group.
pub(crate) fn detect_subgroups<E: Environment>(
    context: &DiscoveryContext<E>,
    group: &GroupStructure,
) -> Vec<GroupStructure> {
    let mut subgroups = vec![trivial(context, group), whole(group)];
    let mut seen: BTreeSet<ElementSet> = subgroups
        .iter()
        .map(|subgroup| subgroup.elements.clone())
        .collect();

    let config = context.config();
    let generators = group
        .elements
        .iter()
        .filter(|element| **element != group.identity);
    let mut candidates: Vec<GroupStructure> = generators
        .filter_map(|generator| cyclic(context, group, generator))
        .collect();

    let scale = 10f64.powi(config.groups.metric_precision as i32);
    for (key, bucket) in buckets(&group.elements, |n| context.quantized_resonance(n)) {
        let metric = key as f64 / scale;
        let mut elements = bucket;
        elements.insert(group.identity.clone());
        if is_closed(context, &elements, &group.operation) {
            candidates.push(restrict(
                context,
                group,
                elements,
                GroupOrigin::Similarity { metric },
            ));
        }
    }

    for (partition, bucket) in buckets(&group.elements, |n| context.locate(n).partition) {
        if let Some(elements) = absorb(context, group, bucket) {
            candidates.push(restrict(
                context,
                group,
                elements,
                GroupOrigin::PartitionLocal { partition },
            ));
        }
    }

    for candidate in candidates {
        if seen.insert(candidate.elements.clone()) {
            subgroups.push(candidate);
        }
    }
    subgroups
}

fn trivial<E: Environment>(
    context: &DiscoveryContext<E>,
    group: &GroupStructure,
) -> GroupStructure {
    let identity = group.identity.clone();
    let closed = group.operate(context, &identity, &identity).as_ref() == Some(&identity);
    GroupStructure {
        elements: ElementSet::from([identity.clone()]),
        identity,
        operation: group.operation.clone(),
        is_closed: closed,
        has_inverses: closed,
        is_abelian: true,
        subgroups: Vec::new(),
        origin: GroupOrigin::Trivial,
        stability: group.stability,
    }
}

fn whole(group: &GroupStructure) -> GroupStructure {
    GroupStructure {
        subgroups: Vec::new(),
        ..group.clone()
    }
}

/// Powers of `generator` until one repeats, or `None` if a power is undefined
/// or leaves the parent group before the step cap.
fn cyclic<E: Environment>(
    context: &DiscoveryContext<E>,
    group: &GroupStructure,
    generator: &BigInt,
) -> Option<GroupStructure> {
    let mut elements = ElementSet::from([group.identity.clone(), generator.clone()]);
    let mut current = generator.clone();
    for _ in 0..context.config().groups.cyclic_step_cap {
        let next = group.operate(context, &current, generator)?;
        if !group.elements.contains(&next) {
            return None;
        }
        if !elements.insert(next.clone()) {
            return Some(GroupStructure {
                origin: GroupOrigin::Cyclic {
                    generator: generator.clone(),
                },
                ..restrict(context, group, elements, GroupOrigin::Trivial)
            });
        }
        current = next;
    }
    trace!("powers of {generator} did not repeat within the step cap");
    None
}

/// Grow a partition bucket inside the parent until closed, absorbing parent
/// elements while under half the parent's size.
fn absorb<E: Environment>(
    context: &DiscoveryContext<E>,
    group: &GroupStructure,
    bucket: ElementSet,
) -> Option<ElementSet> {
    let config = context.config();
    let mut seed = bucket;
    seed.insert(group.identity.clone());
    let limit = (group.elements.len() / 2).max(seed.len());
    let limits = ClosureLimits {
        iterations: config.closure.iterations,
        sample: config.closure.sample,
        max_size: limit,
        sampling: Sampling::Elements,
    };
    let operation = |a: &BigInt, b: &BigInt| group.operate(context, a, b);
    let closure = bounded_closure(seed, &limits, &[&operation], |n| group.elements.contains(n));
    let closed = closure.converged && is_closed(context, &closure.elements, &group.operation);
    closed.then_some(closure.elements)
}

/// `group` restricted to `elements`, with the laws re-checked.
fn restrict<E: Environment>(
    context: &DiscoveryContext<E>,
    group: &GroupStructure,
    elements: ElementSet,
    origin: GroupOrigin,
) -> GroupStructure {
    let sampled_inverses = has_inverses(context, &elements, &group.identity, &group.operation);
    GroupStructure {
        is_closed: is_closed(context, &elements, &group.operation),
        has_inverses: sampled_inverses,
        is_abelian: group.is_abelian || is_abelian(context, &elements, &group.operation),
        elements,
        identity: group.identity.clone(),
        operation: group.operation.clone(),
        subgroups: Vec::new(),
        origin,
        stability: group.stability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OpKind, Operation, element_set};

    fn group(elements: ElementSet, operation: Operation) -> GroupStructure {
        GroupStructure {
            elements,
            identity: BigInt::from(0),
            operation,
            is_closed: true,
            has_inverses: true,
            is_abelian: true,
            subgroups: Vec::new(),
            origin: GroupOrigin::Additive,
            stability: 1.0,
        }
    }

    #[test]
    fn trivial_group_has_two_entries() {
        let context = DiscoveryContext::standard();
        let trivial = group(element_set([0]), Operation::Plain(OpKind::Add));
        let subgroups = detect_subgroups(&context, &trivial);
        assert_eq!(subgroups.len(), 2);
        assert_eq!(subgroups[0].origin, GroupOrigin::Trivial);
        assert_eq!(subgroups[1], trivial);
    }

    #[test]
    fn cyclic_subgroups_of_z6() {
        let context = DiscoveryContext::standard();
        let z6 = group(element_set(0..6), Operation::modular(6, OpKind::Add));
        let subgroups = detect_subgroups(&context, &z6);

        assert_eq!(subgroups[0].elements, element_set([0]));
        assert_eq!(subgroups[1].elements, z6.elements);
        let cyclic: Vec<&ElementSet> = subgroups
            .iter()
            .filter(|s| matches!(s.origin, GroupOrigin::Cyclic { .. }))
            .map(|s| &s.elements)
            .collect();
        assert_eq!(cyclic, vec![&element_set([0, 2, 4]), &element_set([0, 3])]);
        for subgroup in &subgroups {
            assert!(subgroup.elements.contains(&subgroup.identity));
            assert!(subgroup.is_closed);
        }
    }

    #[test]
    fn every_element_generates_a_candidate() {
        let context = DiscoveryContext::standard();
        let z48 = group(element_set(0..48), Operation::modular(48, OpKind::Add));
        let subgroups = detect_subgroups(&context, &z48);

        let cyclic: Vec<&ElementSet> = subgroups
            .iter()
            .filter(|s| matches!(s.origin, GroupOrigin::Cyclic { .. }))
            .map(|s| &s.elements)
            .collect();
        // one proper nontrivial cyclic subgroup per divisor 2, 3, 4, 6, 8, 12, 16, 24
        assert_eq!(cyclic.len(), 8);
        for order in [2, 3, 4, 6, 8, 12, 16, 24] {
            let step = 48 / order;
            let expected = element_set((0..order).map(|k| k * step));
            assert!(cyclic.contains(&&expected));
        }
        assert!(cyclic.contains(&&element_set([0, 24])));
    }

    #[test]
    fn escaping_powers_are_rejected() {
        let context = DiscoveryContext::standard();
        let integers = group(element_set(-3..=3), Operation::Plain(OpKind::Add));
        assert!(cyclic(&context, &integers, &BigInt::from(1)).is_none());
    }
}

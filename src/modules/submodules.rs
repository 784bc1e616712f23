// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeSet;

use num_bigint::BigInt;

use crate::algebra::{ClosureLimits, Sampling, bounded_closure, sample};
use crate::environment::Environment;
use crate::groups::buckets;
use crate::modules::{Module, Submodule, SubmoduleKind};
use crate::{DiscoveryContext, ElementSet};

pub(crate) fn find_submodules<'m, E: Environment>(
    context: &DiscoveryContext<E>,
    module: &'m Module,
) -> Vec<Submodule<'m>> {
    let view = |elements: ElementSet, generators: Vec<BigInt>, kind: SubmoduleKind| Submodule {
        parent: module,
        elements,
        generators,
        kind,
    };
    let mut submodules = vec![
        view(
            ElementSet::from([module.zero.clone()]),
            vec![module.zero.clone()],
            SubmoduleKind::Trivial,
        ),
        view(
            module.elements.clone(),
            module.generators.clone(),
            SubmoduleKind::Whole,
        ),
    ];
    let mut seen: BTreeSet<ElementSet> = submodules.iter().map(|s| s.elements.clone()).collect();
    let mut candidates = Vec::new();

    for generator in module.generators.iter().filter(|g| **g != module.zero) {
        let elements = cyclic(context, module, generator);
        candidates.push(view(
            elements,
            vec![generator.clone()],
            SubmoduleKind::Cyclic(generator.clone()),
        ));
    }

    for (active_bits, bucket) in buckets(&module.elements, |n| context.pattern(n).active_count()) {
        if let Some(elements) = validated(context, module, bucket) {
            let generators = elements.iter().cloned().collect();
            candidates.push(view(elements, generators, SubmoduleKind::Pattern(active_bits)));
        }
    }

    let by_partition = buckets(&module.elements, |n| context.locate(n).partition);
    if by_partition.len() > 1 {
        for (partition, bucket) in by_partition {
            if let Some(elements) = validated(context, module, bucket) {
                let generators = elements.iter().cloned().collect();
                candidates.push(view(elements, generators, SubmoduleKind::Partition(partition)));
            }
        }
    }

    for candidate in candidates {
        if seen.insert(candidate.elements.clone()) {
            submodules.push(candidate);
        }
    }
    submodules
}

/// Scalar multiples of `generator` closed under module addition, within the
/// module's elements.
fn cyclic<E: Environment>(
    context: &DiscoveryContext<E>,
    module: &Module,
    generator: &BigInt,
) -> ElementSet {
    let config = context.config();
    let mut seed: ElementSet = sample(&module.scalar_ring.elements, config.modules.scalar_sample)
        .into_iter()
        .filter_map(|r| module.scale(context, r, generator))
        .filter(|m| module.elements.contains(m))
        .collect();
    seed.insert(module.zero.clone());
    seed.insert(generator.clone());

    let limits = ClosureLimits {
        iterations: config.closure.iterations,
        sample: config.closure.sample,
        max_size: module.elements.len(),
        sampling: Sampling::Elements,
    };
    let add = |a: &BigInt, b: &BigInt| module.add(context, a, b);
    bounded_closure(seed, &limits, &[&add], |m| module.elements.contains(m)).elements
}

/// `bucket` with zero, if closed under sampled sums and absorbing sampled
/// scalar multiples.
fn validated<E: Environment>(
    context: &DiscoveryContext<E>,
    module: &Module,
    bucket: ElementSet,
) -> Option<ElementSet> {
    let config = context.config();
    let mut elements = bucket;
    elements.insert(module.zero.clone());
    if elements.len() < 2 {
        return None;
    }
    let valid = {
        let sampled = sample(&elements, config.modules.element_sample);
        let closed = sampled.iter().all(|&a| {
            sampled.iter().all(|&b| {
                module
                    .add(context, a, b)
                    .is_some_and(|sum| elements.contains(&sum))
            })
        });
        let scalars = sample(&module.scalar_ring.elements, config.modules.submodule_scalar_sample);
        closed
            && scalars.iter().all(|&r| {
                sampled.iter().all(|&m| {
                    module
                        .scale(context, r, m)
                        .is_some_and(|product| elements.contains(&product))
                })
            })
    };
    valid.then_some(elements)
}

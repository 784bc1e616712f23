// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ideal discovery: the zero and whole-ring ideals, plus candidates grown
//! from artifact, metric and partition clusters and from small principal
//! generators, each extended by bounded additive closure and absorption.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use num_bigint::BigInt;
use num_traits::Signed;
use tracing::trace;

use crate::algebra::sample;
use crate::environment::{Environment, artifact_signature, is_prime};
use crate::groups::buckets;
use crate::rings::{Ideal, IdealKind, RingStructure};
use crate::{DiscoveryContext, ElementSet};

/// All ideals found for `ring`, the zero ideal and the whole ring first.
pub(crate) fn discover_ideals<E: Environment>(
    context: &DiscoveryContext<E>,
    ring: &RingStructure,
) -> Vec<Ideal> {
    let zero = &ring.additive_identity;
    let mut ideals = vec![
        Ideal {
            elements: ElementSet::from([zero.clone()]),
            generators: vec![zero.clone()],
            is_principal: true,
            is_prime: ring.elements.len() > 1,
            is_maximal: ring.is_field,
            kind: IdealKind::Zero,
        },
        Ideal {
            elements: ring.elements.clone(),
            generators: ring.multiplicative_identity.iter().cloned().collect(),
            is_principal: ring.has_unity(),
            is_prime: false,
            is_maximal: false,
            kind: IdealKind::Whole,
        },
    ];
    let mut seen: BTreeSet<ElementSet> =
        ideals.iter().map(|ideal| ideal.elements.clone()).collect();

    for (seed, kind) in candidates(context, ring) {
        let generators: Vec<BigInt> = seed.iter().cloned().collect();
        let Some(elements) = extend_to_ideal(context, ring, seed) else {
            continue;
        };
        if !seen.insert(elements.clone()) {
            continue;
        }
        let is_principal = kind == IdealKind::Principal;
        let prime = is_prime_ideal(context, ring, &elements);
        let is_maximal = if is_principal {
            generators.first().is_some_and(is_prime)
        } else {
            let share = elements.len() as f64 / ring.elements.len() as f64;
            share > context.config().rings.maximal_ideal_share && prime
        };
        ideals.push(Ideal {
            elements,
            generators,
            is_principal,
            is_prime: prime,
            is_maximal,
            kind,
        });
    }
    trace!("found {} ideals in a ring of {}", ideals.len(), ring.elements.len());
    ideals
}

/// Seeds of candidate ideals, in discovery order.
fn candidates<E: Environment>(
    context: &DiscoveryContext<E>,
    ring: &RingStructure,
) -> Vec<(ElementSet, IdealKind)> {
    let config = context.config();
    let minimum = config.groups.min_cluster_size;
    let mut candidates = Vec::new();

    let mut signed: BTreeMap<String, ElementSet> = BTreeMap::new();
    for n in &ring.elements {
        if let Some(signature) = artifact_signature(context.environment(), n) {
            signed.entry(signature).or_default().insert(n.clone());
        }
    }
    candidates.extend(
        signed
            .into_iter()
            .filter(|(_, bucket)| bucket.len() >= minimum)
            .map(|(signature, bucket)| (bucket, IdealKind::ArtifactSignature(signature))),
    );

    let scale = 10f64.powi(config.groups.metric_precision as i32);
    candidates.extend(
        buckets(&ring.elements, |n| context.quantized_resonance(n))
            .into_iter()
            .filter(|(_, bucket)| bucket.len() >= minimum)
            .map(|(key, bucket)| (bucket, IdealKind::Similarity(key as f64 / scale))),
    );

    let by_partition = buckets(&ring.elements, |n| context.locate(n).partition);
    if by_partition.len() > 1 {
        candidates.extend(
            by_partition
                .into_iter()
                .map(|(partition, bucket)| (bucket, IdealKind::Partition(partition))),
        );
    }

    let bound = BigInt::from(config.rings.principal_generator_bound);
    candidates.extend(
        ring.elements
            .iter()
            .filter(|n| **n != ring.additive_identity && n.abs() <= bound)
            .map(|n| (ElementSet::from([n.clone()]), IdealKind::Principal)),
    );
    candidates
}

/// Grow `seed` into an ideal of `ring` by bounded additive closure and
/// absorption of sampled ring multiples, or `None` if the result does not
/// absorb on the sample.
pub(crate) fn extend_to_ideal<E: Environment>(
    context: &DiscoveryContext<E>,
    ring: &RingStructure,
    seed: ElementSet,
) -> Option<ElementSet> {
    let config = context.config();
    let multipliers = sample(&ring.elements, config.rings.ideal_sample);
    let mut ideal: ElementSet = seed
        .into_iter()
        .filter(|n| ring.elements.contains(n))
        .collect();
    ideal.insert(ring.additive_identity.clone());
    let mut frontier: VecDeque<BigInt> = ideal.iter().cloned().collect();

    for _ in 0..config.closure.iterations {
        if frontier.is_empty() || ideal.len() >= ring.elements.len() {
            break;
        }
        let active: Vec<BigInt> = frontier
            .drain(..config.rings.ideal_sample.min(frontier.len()))
            .collect();
        for i in &active {
            let partners: Vec<BigInt> = sample(&ideal, config.rings.ideal_sample)
                .into_iter()
                .cloned()
                .collect();
            let sums = partners.iter().filter_map(|j| ring.add(context, i, j));
            let multiples = multipliers.iter().filter_map(|r| ring.mul(context, r, i));
            let found: Vec<BigInt> = sums.chain(multiples).collect();
            for result in found {
                if ring.elements.contains(&result) && ideal.insert(result.clone()) {
                    frontier.push_back(result);
                }
            }
        }
    }

    absorbs(context, ring, &ideal).then_some(ideal)
}

/// Sampled absorption: every in-ring product `r * i` lies in the ideal.
pub(crate) fn absorbs<E: Environment>(
    context: &DiscoveryContext<E>,
    ring: &RingStructure,
    ideal: &ElementSet,
) -> bool {
    let sample_size = context.config().rings.ideal_sample;
    sample(ideal, sample_size).into_iter().all(|i| {
        sample(&ring.elements, sample_size).into_iter().all(|r| {
            ring.mul(context, r, i)
                .is_none_or(|product| !ring.elements.contains(&product) || ideal.contains(&product))
        })
    })
}

/// Sampled primality: a proper ideal into which no pair of sampled outside
/// elements multiplies.
fn is_prime_ideal<E: Environment>(
    context: &DiscoveryContext<E>,
    ring: &RingStructure,
    ideal: &ElementSet,
) -> bool {
    if ideal.len() >= ring.elements.len() {
        return false;
    }
    let outside: Vec<&BigInt> = ring
        .elements
        .iter()
        .filter(|n| !ideal.contains(n))
        .take(context.config().rings.ideal_sample)
        .collect();
    outside.iter().all(|a| {
        outside.iter().all(|b| {
            ring.mul(context, a, b)
                .is_none_or(|product| !ideal.contains(&product))
        })
    })
}

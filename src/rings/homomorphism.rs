// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use num_bigint::BigInt;
use serde::Serialize;

use crate::algebra::sample;
use crate::environment::Environment;
use crate::rings::RingStructure;
use crate::{DiscoveryContext, ElementMap, ElementSet};

/// A map between two rings together with what sampling observed about it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RingHomomorphism<'r> {
    /// Source ring.
    pub domain: &'r RingStructure,
    /// Target ring.
    pub codomain: &'r RingStructure,
    /// The underlying map.
    pub map: ElementMap,
    /// Domain elements mapped to the codomain's additive identity.
    pub kernel: ElementSet,
    /// Forward image of the domain.
    pub image: ElementSet,
    /// Whether the kernel is trivial.
    pub is_injective: bool,
    /// Whether the image is as large as the codomain.
    pub is_surjective: bool,
    /// `f(a + b) == f(a) + f(b)` on sampled pairs.
    pub preserves_addition: bool,
    /// `f(a * b) == f(a) * f(b)` on sampled pairs.
    pub preserves_multiplication: bool,
    /// Sampled field patterns of `x` and `f(x)` agree on average.
    pub preserves_patterns: bool,
    /// Sampled metric values of `x` and `f(x)` mostly agree.
    pub preserves_metric: bool,
    /// Mean cost per sampled element: the cross-partition penalty when
    /// `f(x)` changes partition, else `1.0`.
    pub energy_cost: f64,
}

impl RingHomomorphism<'_> {
    /// Whether the map is a bijective homomorphism on the sample.
    pub fn is_isomorphism(&self) -> bool {
        self.is_injective
            && self.is_surjective
            && self.preserves_addition
            && self.preserves_multiplication
    }
}

pub(crate) fn analyze<'r, E: Environment>(
    context: &DiscoveryContext<E>,
    domain: &'r RingStructure,
    codomain: &'r RingStructure,
    map: ElementMap,
) -> RingHomomorphism<'r> {
    let config = context.config();
    let kernel: ElementSet = domain
        .elements
        .iter()
        .filter(|x| map.apply(x).as_ref() == Some(&codomain.additive_identity))
        .cloned()
        .collect();
    let image: ElementSet = domain.elements.iter().filter_map(|x| map.apply(x)).collect();

    let sampled = sample(&domain.elements, config.rings.identity_sample);
    let preserves = |domain_op: &dyn Fn(&BigInt, &BigInt) -> Option<BigInt>,
                     codomain_op: &dyn Fn(&BigInt, &BigInt) -> Option<BigInt>| {
        sampled.iter().all(|&a| {
            sampled.iter().all(|&b| {
                let lhs = domain_op(a, b).and_then(|x| map.apply(&x));
                let rhs = map
                    .apply(a)
                    .zip(map.apply(b))
                    .and_then(|(fa, fb)| codomain_op(&fa, &fb));
                lhs.is_some() && lhs == rhs
            })
        })
    };
    let preserves_addition = preserves(
        &|a, b| domain.add(context, a, b),
        &|a, b| codomain.add(context, a, b),
    );
    let preserves_multiplication = preserves(
        &|a, b| domain.mul(context, a, b),
        &|a, b| codomain.mul(context, a, b),
    );

    let mapped: Vec<(&BigInt, BigInt)> = sampled
        .iter()
        .filter_map(|x| map.apply(x).map(|y| (*x, y)))
        .collect();
    let count = mapped.len() as f64;
    let (preserves_patterns, preserves_metric, energy_cost) = if mapped.is_empty() {
        (false, false, 0.0)
    } else {
        let similarity = mapped
            .iter()
            .map(|(x, y)| context.pattern(x).similarity(&context.pattern(y)))
            .sum::<f64>()
            / count;
        let metric_kept = mapped
            .iter()
            .filter(|(x, y)| {
                (context.resonance(x) - context.resonance(y)).abs()
                    <= config.groups.metric_tolerance
            })
            .count() as f64
            / count;
        let energy = mapped
            .iter()
            .map(|(x, y)| {
                if context.locate(x).partition == context.locate(y).partition {
                    1.0
                } else {
                    config.rings.cross_partition_penalty
                }
            })
            .sum::<f64>()
            / count;
        (
            similarity >= config.groups.min_preservation,
            metric_kept >= config.groups.min_preservation,
            energy,
        )
    };

    RingHomomorphism {
        domain,
        codomain,
        is_injective: kernel.len() <= 1,
        is_surjective: image.len() == codomain.elements.len(),
        map,
        kernel,
        image,
        preserves_addition,
        preserves_multiplication,
        preserves_patterns,
        preserves_metric,
        energy_cost,
    }
}

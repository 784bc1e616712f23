// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Greedy generator cover, independence and torsion.

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::algebra::{by_magnitude, sample};
use crate::environment::Environment;
use crate::modules::Module;
use crate::{DiscoveryContext, ElementSet};

/// Greedy cover: the smallest element not yet generated becomes a new
/// generator, and the generated set is expanded by scalar multiples and
/// pairwise sums within the configured bounds.
pub(crate) fn find_generators<E: Environment>(
    context: &DiscoveryContext<E>,
    module: &Module,
) -> Vec<BigInt> {
    let config = &context.config().modules;
    let scalars = sample(&module.scalar_ring.elements, config.scalar_sample);
    let mut generated = ElementSet::from([module.zero.clone()]);
    let mut generators = Vec::new();

    for candidate in by_magnitude(&module.elements) {
        if generated.contains(&candidate) {
            continue;
        }
        generated.insert(candidate.clone());
        generators.push(candidate.clone());

        for _ in 0..config.generator_iterations {
            if generated.len() >= config.max_generated {
                break;
            }
            let mut existing = vec![candidate.clone()];
            existing.extend(
                by_magnitude(&generated)
                    .into_iter()
                    .filter(|m| *m != candidate)
                    .take(config.element_sample.saturating_sub(1)),
            );

            let multiples = scalars
                .iter()
                .flat_map(|r| existing.iter().map(move |m| (*r, m)))
                .filter_map(|(r, m)| module.scale(context, r, m));
            let sums = existing.iter().enumerate().flat_map(|(index, a)| {
                existing[index..]
                    .iter()
                    .filter_map(move |b| module.add(context, a, b))
            });
            let found: Vec<BigInt> = multiples.chain(sums).collect();

            let before = generated.len();
            for result in found {
                if generated.len() >= config.max_generated {
                    break;
                }
                generated.insert(result);
            }
            if generated.len() == before {
                break;
            }
        }
    }
    generators
}

/// Whether the scalar ring contains `0`, `1` and `-1`.
pub(crate) fn is_integer_like(module: &Module) -> bool {
    let ring = &module.scalar_ring.elements;
    ring.contains(&BigInt::zero())
        && ring.contains(&BigInt::one())
        && ring.contains(&-BigInt::one())
}

/// Whether `target` equals `r · a` or, with few enough scalars, `r · a + s · b`
/// for sampled scalars and members `a`, `b` of `basis`.
pub(crate) fn is_combination<E: Environment>(
    context: &DiscoveryContext<E>,
    module: &Module,
    target: &BigInt,
    basis: &[BigInt],
) -> bool {
    let config = &context.config().modules;
    let scalars = sample(&module.scalar_ring.elements, config.scalar_sample);
    let single = scalars.iter().any(|r| {
        basis
            .iter()
            .any(|a| module.scale(context, r, a).as_ref() == Some(target))
    });
    if single || scalars.len() > config.pair_scalar_cap {
        return single;
    }
    basis.iter().enumerate().any(|(index, a)| {
        basis[index + 1..].iter().any(|b| {
            scalars.iter().any(|r| {
                scalars.iter().any(|s| {
                    module
                        .scale(context, r, a)
                        .zip(module.scale(context, s, b))
                        .and_then(|(ra, sb)| module.add(context, &ra, &sb))
                        .as_ref()
                        == Some(target)
                })
            })
        })
    })
}

/// Freeness of the module's generators.
///
/// Over integer-like rings no nonzero sampled scalar may annihilate a nonzero
/// generator; over other rings no generator may be a combination of the
/// others.
pub(crate) fn is_free<E: Environment>(context: &DiscoveryContext<E>, module: &Module) -> bool {
    if is_integer_like(module) {
        let scalars = sample(&module.scalar_ring.elements, context.config().modules.scalar_sample);
        module
            .generators
            .iter()
            .filter(|g| **g != module.zero)
            .all(|g| {
                scalars
                    .iter()
                    .filter(|r| **r != &module.zero)
                    .all(|r| module.scale(context, r, g).as_ref() != Some(&module.zero))
            })
    } else {
        module.generators.iter().enumerate().all(|(index, g)| {
            let others: Vec<BigInt> = module
                .generators
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != index)
                .map(|(_, h)| h.clone())
                .collect();
            !is_combination(context, module, g, &others)
        })
    }
}

/// Nonzero elements annihilated by a nonzero sampled scalar.
pub(crate) fn torsion<E: Environment>(
    context: &DiscoveryContext<E>,
    module: &Module,
) -> ElementSet {
    let scalars = sample(&module.scalar_ring.elements, context.config().modules.scalar_sample);
    module
        .elements
        .iter()
        .filter(|m| **m != module.zero)
        .filter(|m| {
            scalars
                .iter()
                .filter(|r| **r != &module.zero)
                .any(|r| module.scale(context, r, m).as_ref() == Some(&module.zero))
        })
        .cloned()
        .collect()
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use num_bigint::BigInt;
use num_traits::One;
use serde::Serialize;
use tracing::debug;

use crate::algebra::sample;
use crate::environment::{Environment, PATTERN_BITS};
use crate::{
    DiscoveryContext, ElementSet, GroupDetector, GroupStructure, RingDetector, RingStructure,
};

/// Snapshot of one simulated generation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Generation {
    /// Zero-based generation number.
    pub index: usize,
    /// Size of the number pool the generation ran on.
    pub pool_size: usize,
    /// Groups plus the ring, if any.
    pub structure_count: usize,
    /// Score of the structures found.
    pub fitness: f64,
}

/// Outcome of the generational simulation.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Evolution {
    /// One entry per generation, in order.
    pub generations: Vec<Generation>,
    /// Highest fitness over all generations.
    pub best_fitness: f64,
    /// The pool after the last generation grew it.
    pub final_pool: ElementSet,
}

/// `10` per structure, `5` per closed and per invertible group, `20` for a
/// field, plus the natural logarithm of every structure's size.
pub(crate) fn fitness(groups: &[GroupStructure], ring: Option<&RingStructure>) -> f64 {
    let count = groups.len() + usize::from(ring.is_some());
    let mut score = 10.0 * count as f64;
    for group in groups {
        if group.is_closed {
            score += 5.0;
        }
        if group.has_inverses {
            score += 5.0;
        }
    }
    if ring.is_some_and(|ring| ring.is_field) {
        score += 20.0;
    }
    let sizes = groups
        .iter()
        .map(|group| group.elements.len())
        .chain(ring.map(|ring| ring.elements.len()));
    score
        + sizes
            .filter(|size| *size > 0)
            .map(|size| (size as f64).ln())
            .sum::<f64>()
}

/// Run discovery on a pool seeded with `numbers` for the configured number
/// of generations, feeding operation outputs and mutations back into the
/// pool after each one.
pub(crate) fn simulate_evolution<E: Environment>(
    context: &DiscoveryContext<E>,
    numbers: &ElementSet,
) -> Evolution {
    let config = &context.config().life;
    let group_detector = GroupDetector::new(context);
    let ring_detector = RingDetector::new(context);
    let mut pool = numbers.clone();
    let mut evolution = Evolution::default();

    for index in 0..config.generations {
        let groups = group_detector.detect_groups(&pool);
        let ring = ring_detector.detect_ring_structure(&pool);
        let generation = Generation {
            index,
            pool_size: pool.len(),
            structure_count: groups.len() + usize::from(ring.is_some()),
            fitness: fitness(&groups, ring.as_ref()),
        };
        debug!(
            "generation {index}: {} structures in {} numbers, fitness {:.3}",
            generation.structure_count, generation.pool_size, generation.fitness
        );
        evolution.best_fitness = evolution.best_fitness.max(generation.fitness);
        evolution.generations.push(generation);

        let mut offspring = Vec::new();
        for group in &groups {
            let sampled = sample(&group.elements, config.output_sample);
            for a in &sampled {
                offspring.extend(sampled.iter().filter_map(|b| group.operate(context, a, b)));
            }
        }
        if let Some(ring) = &ring {
            let sampled = sample(&ring.elements, config.output_sample);
            for a in &sampled {
                for b in &sampled {
                    offspring.extend(ring.add(context, a, b));
                    offspring.extend(ring.mul(context, a, b));
                }
            }
        }
        offspring.extend(mutations(numbers, config.mutation_seeds));

        for child in offspring {
            if pool.len() >= config.pool_cap {
                break;
            }
            pool.insert(child);
        }
    }
    evolution.final_pool = pool;
    evolution
}

/// Every single-bit pattern flip of the first `seeds` numbers.
fn mutations(numbers: &ElementSet, seeds: usize) -> impl Iterator<Item = BigInt> + '_ {
    numbers
        .iter()
        .take(seeds)
        .flat_map(|n| (0..PATTERN_BITS).map(move |bit| n ^ &(BigInt::one() << bit)))
}

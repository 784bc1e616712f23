// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded fixed-point closure shared by every "grow until capped" loop.
//!
//! The element set doubles as the visited set: only results not yet present
//! are admitted and queued on the frontier, and a round only combines
//! frontier elements with a bounded sample of the current set. Termination is
//! guaranteed by the round count and the size cap alone.

use std::collections::VecDeque;

use num_bigint::BigInt;
use tracing::trace;

use crate::ElementSet;

/// How the pairs of a closure round are sampled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sampling {
    /// Up to `sample` frontier elements are combined, in both orders, with
    /// themselves and the first `sample` elements of the set.
    Elements,
    /// Up to `sample` ordered pairs (frontier × set) are combined per
    /// operation.
    Pairs,
}

/// Termination limits of a closure computation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClosureLimits {
    /// Maximum number of rounds.
    pub iterations: usize,
    /// Per-round sample size, interpreted according to `sampling`.
    pub sample: usize,
    /// Hard cap on the number of elements.
    pub max_size: usize,
    /// Pair sampling strategy.
    pub sampling: Sampling,
}

/// Result of a bounded closure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Closure {
    /// The grown element set (a superset of the seed).
    pub elements: ElementSet,
    /// Whether the frontier drained before any limit was hit.
    pub converged: bool,
}

/// Grow `seed` under `operations` within `limits`.
///
/// Each operation maps a pair to a result, or `None` where it is undefined.
/// Results are admitted only if `accept` approves them. Operations are
/// applied in the order given, so a ring passes addition before
/// multiplication.
pub fn bounded_closure<A>(
    seed: ElementSet,
    limits: &ClosureLimits,
    operations: &[&dyn Fn(&BigInt, &BigInt) -> Option<BigInt>],
    accept: A,
) -> Closure
where
    A: Fn(&BigInt) -> bool,
{
    let mut elements = seed;
    let mut frontier: VecDeque<BigInt> = elements.iter().cloned().collect();
    let mut capped = elements.len() >= limits.max_size;

    for round in 0..limits.iterations {
        if frontier.is_empty() || capped {
            break;
        }

        let active: Vec<BigInt> = frontier
            .drain(..limits.sample.min(frontier.len()))
            .collect();
        let pairs = round_pairs(&active, &elements, limits);
        let before = elements.len();

        'operations: for operation in operations {
            let budget = match limits.sampling {
                Sampling::Elements => pairs.len(),
                Sampling::Pairs => limits.sample,
            };
            for (a, b) in pairs.iter().take(budget) {
                if elements.len() >= limits.max_size {
                    capped = true;
                    break 'operations;
                }
                if let Some(result) = operation(a, b) {
                    if !elements.contains(&result) && accept(&result) {
                        frontier.push_back(result.clone());
                        elements.insert(result);
                    }
                }
            }
        }
        trace!(
            "closure round {round}: {} new elements, {} pending",
            elements.len() - before,
            frontier.len()
        );
    }

    Closure {
        converged: frontier.is_empty() && !capped,
        elements,
    }
}

fn round_pairs(
    active: &[BigInt],
    elements: &ElementSet,
    limits: &ClosureLimits,
) -> Vec<(BigInt, BigInt)> {
    let mut partners: Vec<&BigInt> = elements.iter().take(limits.sample).collect();
    if limits.sampling == Sampling::Elements {
        for element in active {
            if !partners.contains(&element) {
                partners.push(element);
            }
        }
    }

    let mut pairs = Vec::with_capacity(active.len() * partners.len() * 2);
    for a in active {
        for b in &partners {
            pairs.push((a.clone(), (*b).clone()));
            if limits.sampling == Sampling::Elements && a != *b {
                pairs.push(((*b).clone(), a.clone()));
            }
        }
    }
    pairs
}

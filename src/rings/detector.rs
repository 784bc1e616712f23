// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use num_bigint::BigInt;
use num_traits::{One, Zero};
use tracing::{debug, trace};

use crate::algebra::{ClosureLimits, Sampling, bounded_closure, sample};
use crate::environment::{Environment, StandardEnvironment};
use crate::rings::classify::{boundary_size, classify, operations};
use crate::rings::homomorphism::analyze;
use crate::rings::ideals::discover_ideals;
use crate::rings::quotient::quotient;
use crate::rings::{Ideal, QuotientRing, RingHomomorphism, RingKind, RingStructure};
use crate::{DiscoveryContext, ElementMap, ElementSet, OpKind, Operation};

/// Discovers a ring structure in an integer collection.
///
/// Discovery classifies the collection into a [`RingKind`], chooses the
/// operations that kind suggests, grows the collection toward the kind's
/// natural boundary by bounded additive-then-multiplicative closure and
/// verifies the ring laws on a sample. Emergent properties and ideals are
/// then read off the grown ring.
///
/// # Examples
///
/// ```rust
/// use emergent_algebra::{DiscoveryContext, RingDetector, element_set};
///
/// let context = DiscoveryContext::standard();
/// let detector = RingDetector::new(&context);
///
/// let z5 = detector.detect_ring_structure(&element_set(0..5)).unwrap();
/// assert!(z5.is_field);
///
/// let z6 = detector.detect_ring_structure(&element_set(0..6)).unwrap();
/// assert!(!z6.is_field);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct RingDetector<'c, E: Environment = StandardEnvironment> {
    context: &'c DiscoveryContext<E>,
}

impl<'c, E: Environment> RingDetector<'c, E> {
    /// A detector evaluating operations through `context`.
    pub fn new(context: &'c DiscoveryContext<E>) -> Self {
        Self { context }
    }

    /// The shared discovery context.
    pub fn context(&self) -> &'c DiscoveryContext<E> {
        self.context
    }

    /// The natural ring type of `numbers`.
    pub fn classify(&self, numbers: &ElementSet) -> RingKind {
        classify(self.context, numbers)
    }

    /// The ring emerging from `numbers`, or `None` for empty input and when
    /// the sampled ring laws fail.
    pub fn detect_ring_structure(&self, numbers: &ElementSet) -> Option<RingStructure> {
        if numbers.is_empty() {
            return None;
        }
        let kind = self.classify(numbers);
        let (addition, multiplication) = operations(&kind);
        let additive_identity = match &kind {
            RingKind::Similarity { partition, .. } | RingKind::PartitionLocal { partition } => {
                self.context.partition_base(partition)
            }
            _ => BigInt::zero(),
        };

        let config = self.context.config();
        let limits = ClosureLimits {
            iterations: config.closure.iterations,
            sample: config.closure.sample,
            max_size: boundary_size(config, &kind),
            sampling: Sampling::Pairs,
        };
        let add = |a: &BigInt, b: &BigInt| self.context.try_apply(&addition, a, b);
        let mul = |a: &BigInt, b: &BigInt| self.context.try_apply(&multiplication, a, b);
        let mut seed = numbers.clone();
        seed.insert(additive_identity.clone());
        let closure = bounded_closure(seed, &limits, &[&add, &mul], |_| true);
        trace!(
            "grew {} numbers to {} under {kind:?} (converged: {})",
            numbers.len(),
            closure.elements.len(),
            closure.converged
        );

        let mut ring = RingStructure {
            elements: closure.elements,
            additive_identity,
            multiplicative_identity: None,
            addition,
            multiplication,
            is_commutative: false,
            ideals: Vec::new(),
            is_integral_domain: false,
            is_field: false,
            kind,
        };

        if !self.satisfies_ring_laws(&ring) {
            match ring.kind {
                RingKind::General | RingKind::Artifact => {
                    ring.addition = Operation::Plain(OpKind::Add);
                    ring.multiplication = Operation::Plain(OpKind::Mul);
                    ring.additive_identity = BigInt::zero();
                    ring.elements.insert(BigInt::zero());
                    if !self.is_distributive(&ring) {
                        debug!("no ring structure in {} numbers", numbers.len());
                        return None;
                    }
                    trace!("accepted as a general ring without closure");
                }
                _ => {
                    debug!("ring laws failed for {:?}", ring.kind);
                    return None;
                }
            }
        }

        self.read_emergent_properties(&mut ring);
        ring.ideals = discover_ideals(self.context, &ring);
        debug!(
            "detected {:?} ring of {} elements with {} ideals (field: {})",
            ring.kind,
            ring.elements.len(),
            ring.ideals.len(),
            ring.is_field
        );
        Some(ring)
    }

    /// Alias of [`RingDetector::detect_ring_structure`].
    pub fn find_ring_structure(&self, numbers: &ElementSet) -> Option<RingStructure> {
        self.detect_ring_structure(numbers)
    }

    /// Kernel, image and sampled preservation properties of `map` viewed as
    /// a map from `domain` to `codomain`.
    pub fn analyze_homomorphism<'r>(
        &self,
        domain: &'r RingStructure,
        codomain: &'r RingStructure,
        map: ElementMap,
    ) -> RingHomomorphism<'r> {
        analyze(self.context, domain, codomain, map)
    }

    /// The quotient of `ring` by `ideal`.
    pub fn quotient(&self, ring: &RingStructure, ideal: &Ideal) -> QuotientRing {
        quotient(self.context, ring, ideal)
    }

    /// Additive identity and additive closure on the identity sample,
    /// additive inverses for modular rings, and distributivity.
    fn satisfies_ring_laws(&self, ring: &RingStructure) -> bool {
        let context = self.context;
        let sampled = sample(&ring.elements, context.config().rings.identity_sample);
        let zero = &ring.additive_identity;

        let identity = sampled.iter().all(|&x| {
            ring.add(context, zero, x).as_ref() == Some(x)
                && ring.add(context, x, zero).as_ref() == Some(x)
        });
        let closed = sampled.iter().all(|&a| {
            sampled.iter().all(|&b| {
                ring.add(context, a, b)
                    .is_some_and(|sum| ring.elements.contains(&sum))
            })
        });
        let inverses = !matches!(ring.kind, RingKind::Modular { .. })
            || sampled
                .iter()
                .all(|&x| ring.additive_inverse(context, x).is_some());

        if !(identity && closed && inverses) {
            trace!("sampled additive laws failed for {:?}", ring.kind);
            return false;
        }
        self.is_distributive(ring)
    }

    /// `a * (b + c) == a * b + a * c` on sampled triples.
    fn is_distributive(&self, ring: &RingStructure) -> bool {
        let context = self.context;
        let sampled = sample(&ring.elements, context.config().rings.distributivity_sample);
        sampled.iter().all(|&a| {
            sampled.iter().all(|&b| {
                sampled.iter().all(|&c| {
                    let lhs = ring
                        .add(context, b, c)
                        .and_then(|sum| ring.mul(context, a, &sum));
                    let rhs = ring
                        .mul(context, a, b)
                        .zip(ring.mul(context, a, c))
                        .and_then(|(ab, ac)| ring.add(context, &ab, &ac));
                    lhs.is_some() && lhs == rhs
                })
            })
        })
    }

    fn read_emergent_properties(&self, ring: &mut RingStructure) {
        let context = self.context;
        let config = context.config();
        let sampled = sample(&ring.elements, config.rings.identity_sample);
        let zero = &ring.additive_identity;

        ring.is_commutative = sampled.iter().enumerate().all(|(index, &a)| {
            sampled[index + 1..]
                .iter()
                .all(|&b| ring.mul(context, a, b) == ring.mul(context, b, a))
        });

        let is_unity = |u: &BigInt| {
            sampled.iter().all(|&x| {
                ring.mul(context, u, x).as_ref() == Some(x)
                    && ring.mul(context, x, u).as_ref() == Some(x)
            })
        };
        let one = BigInt::one();
        let unity = if ring.elements.contains(&one) && is_unity(&one) {
            Some(one)
        } else {
            ring.elements.iter().find(|u| is_unity(u)).cloned()
        };

        let nonzero: Vec<&BigInt> = sampled.iter().copied().filter(|x| *x != zero).collect();
        let zero_divisors = nonzero.iter().any(|&a| {
            nonzero
                .iter()
                .any(|&b| ring.mul(context, a, b).as_ref() == Some(zero))
        });
        let nontrivial = ring.elements.len() > 1;
        let is_integral_domain =
            nontrivial && ring.is_commutative && !zero_divisors && unity.is_some();

        let is_field = is_integral_domain
            && ring.elements.len() <= config.lattice.cycle_size as usize
            && unity.as_ref().is_some_and(|unity| {
                ring.elements
                    .iter()
                    .filter(|x| *x != zero)
                    .take(config.closure.sample)
                    .all(|x| {
                        ring.elements
                            .iter()
                            .any(|y| ring.mul(context, x, y).as_ref() == Some(unity))
                    })
            });

        ring.multiplicative_identity = unity;
        ring.is_integral_domain = is_integral_domain;
        ring.is_field = is_field;
    }
}

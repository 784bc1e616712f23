// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt::{Display, Formatter};

use num_bigint::BigInt;
use num_integer::Integer;
use serde::Serialize;

use crate::DiscoveryContext;
use crate::environment::{Environment, PATTERN_BITS};
use crate::groups::strategies::is_anchored;

/// The kind of transformation a symmetry generator stands for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SymmetryKind {
    /// Cyclic shift of the field pattern.
    Rotation,
    /// Reflection of the field pattern about an axis, or its full reversal.
    Reflection,
    /// Anchor-point membership or position on a partition boundary.
    PartitionBoundary,
    /// Translation by a multiple of the partition size preserving the metric.
    Periodicity,
}

/// A generator of a symmetry group together with its order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SymmetryGenerator {
    /// What the generator does.
    pub kind: SymmetryKind,
    /// Order of the generator.
    pub order: u64,
}

/// Coarse classification of a symmetry group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SymmetryClass {
    /// No generators.
    Trivial,
    /// A single generator of the given order.
    Cyclic(u64),
    /// Rotations of order above two combined with reflections.
    Dihedral(u64),
    /// Exactly two reflections.
    KleinFour,
    /// Anything else.
    General(u64),
}

impl Display for SymmetryClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trivial => write!(f, "Trivial"),
            Self::Cyclic(order) => write!(f, "Cyclic-{order}"),
            Self::Dihedral(order) => write!(f, "Dihedral-{order}"),
            Self::KleinFour => write!(f, "Klein-4"),
            Self::General(order) => write!(f, "General-{order}"),
        }
    }
}

/// Symmetries of a single integer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SymmetryGroup {
    /// Generators in discovery order: rotations, reflections, partition
    /// boundary, periodicity.
    pub generators: Vec<SymmetryGenerator>,
    /// Least common multiple of the generator orders, `1` without generators.
    pub order: u64,
    /// Classification derived from the generators.
    pub classification: SymmetryClass,
}

impl SymmetryGroup {
    /// Derive order and classification from `generators`.
    pub fn from_generators(generators: Vec<SymmetryGenerator>) -> Self {
        let order = generators
            .iter()
            .fold(1u64, |order, generator| order.lcm(&generator.order.max(1)));
        let rotates = generators
            .iter()
            .any(|g| g.kind == SymmetryKind::Rotation && g.order > 2);
        let reflections = generators
            .iter()
            .filter(|g| g.kind == SymmetryKind::Reflection && g.order == 2)
            .count();

        let classification = match generators.len() {
            0 => SymmetryClass::Trivial,
            1 => SymmetryClass::Cyclic(order),
            _ if rotates && reflections > 0 => SymmetryClass::Dihedral(order),
            2 if reflections == 2 => SymmetryClass::KleinFour,
            _ => SymmetryClass::General(order),
        };

        Self {
            generators,
            order,
            classification,
        }
    }
}

/// The symmetry group of `n` under the collaborators of `context`.
pub(crate) fn analyze_symmetries<E: Environment>(
    context: &DiscoveryContext<E>,
    n: &BigInt,
) -> SymmetryGroup {
    let config = context.config();
    let pattern = context.pattern(n);
    let mut generators = Vec::new();

    if let Some(shift) = (1..PATTERN_BITS).find(|shift| pattern.rotated(*shift) == pattern) {
        generators.push(SymmetryGenerator {
            kind: SymmetryKind::Rotation,
            order: (PATTERN_BITS / shift.gcd(&PATTERN_BITS)) as u64,
        });
    }

    let reflection = SymmetryGenerator {
        kind: SymmetryKind::Reflection,
        order: 2,
    };
    for axis in 0..PATTERN_BITS / 2 {
        if pattern.reflected(axis) == pattern {
            generators.push(reflection);
        }
    }
    if pattern.reversed() == pattern {
        generators.push(reflection);
    }

    if is_anchored(context, n) {
        generators.push(SymmetryGenerator {
            kind: SymmetryKind::PartitionBoundary,
            order: u64::from(config.lattice.partition_size),
        });
    }
    if context.locate(n).is_boundary() {
        generators.push(SymmetryGenerator {
            kind: SymmetryKind::PartitionBoundary,
            order: 2,
        });
    }

    let metric = context.resonance(n);
    let partition = u64::from(config.lattice.partition_size);
    let cycle = u64::from(config.lattice.cycle_size).max(1);
    for multiple in 1..=u64::from(config.groups.periodicity_multiples) {
        let offset = partition * multiple;
        let shifted = n + BigInt::from(offset);
        if (context.resonance(&shifted) - metric).abs() <= config.groups.periodicity_tolerance {
            generators.push(SymmetryGenerator {
                kind: SymmetryKind::Periodicity,
                order: cycle / offset.gcd(&cycle),
            });
        }
    }

    SymmetryGroup::from_generators(generators)
}

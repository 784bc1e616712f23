// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Serialize;

use crate::environment::Environment;
use crate::rings::absorbs;
use crate::{
    AlgebraicStructure, DiscoveryContext, ElementSet, GroupStructure, Module, Overlap,
    RingStructure,
};

/// Identifies a structure of an [`crate::AlgebraicLife`] report.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StructureId {
    /// Index into the discovered groups.
    Group(usize),
    /// The discovered ring.
    Ring,
    /// Index into the built modules.
    Module(usize),
}

/// How two structures affect each other.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum InteractionKind {
    /// One structure lives inside the other, or a group is part of the
    /// ring's arithmetic.
    Enhancing,
    /// The structures compete for some, but not all, of their elements.
    Interfering,
    /// The structures share nothing.
    Neutral,
}

/// Interaction between an unordered pair of structures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Interaction {
    /// The earlier structure of the pair.
    pub first: StructureId,
    /// The later structure of the pair.
    pub second: StructureId,
    /// How they interact.
    pub kind: InteractionKind,
}

/// Pairwise interactions and size classes of a set of structures.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Ecology {
    /// One entry per unordered pair, in discovery order.
    pub interactions: Vec<Interaction>,
    /// Structures larger than the dominant size.
    pub dominant: Vec<StructureId>,
    /// Structures smaller than the niche size.
    pub niche: Vec<StructureId>,
}

impl Ecology {
    /// Interactions of the given kind.
    pub fn of_kind(&self, kind: InteractionKind) -> impl Iterator<Item = &Interaction> {
        self.interactions
            .iter()
            .filter(move |interaction| interaction.kind == kind)
    }
}

fn from_overlap(overlap: Overlap) -> InteractionKind {
    match overlap {
        Overlap::Nested => InteractionKind::Enhancing,
        Overlap::Partial => InteractionKind::Interfering,
        Overlap::Disjoint => InteractionKind::Neutral,
    }
}

/// Whether `group` runs on the ring's addition or its elements form an ideal
/// of the ring.
fn supports_ring<E: Environment>(
    context: &DiscoveryContext<E>,
    group: &GroupStructure,
    ring: &RingStructure,
) -> bool {
    group.operation == ring.addition
        || (group.elements.contains(&ring.additive_identity)
            && group.elements.is_subset(&ring.elements)
            && absorbs(context, ring, &group.elements))
}

pub(crate) fn compute_ecology<E: Environment>(
    context: &DiscoveryContext<E>,
    groups: &[GroupStructure],
    ring: Option<&RingStructure>,
    modules: &[Module],
) -> Ecology {
    let config = &context.config().life;
    let mut structures: Vec<(StructureId, &ElementSet)> = groups
        .iter()
        .enumerate()
        .map(|(index, group)| (StructureId::Group(index), group.elements()))
        .collect();
    structures.extend(ring.map(|ring| (StructureId::Ring, ring.elements())));
    structures.extend(
        modules
            .iter()
            .enumerate()
            .map(|(index, module)| (StructureId::Module(index), module.elements())),
    );

    let mut ecology = Ecology::default();
    for (index, (first, a)) in structures.iter().enumerate() {
        for (second, b) in &structures[index + 1..] {
            let mut kind = from_overlap(crate::overlap(a, b));
            if let (StructureId::Group(group), StructureId::Ring) = (first, second) {
                if let Some(ring) = ring {
                    if supports_ring(context, &groups[*group], ring) {
                        kind = InteractionKind::Enhancing;
                    }
                }
            }
            ecology.interactions.push(Interaction {
                first: *first,
                second: *second,
                kind,
            });
        }
        if a.len() > config.dominant_size {
            ecology.dominant.push(*first);
        } else if a.len() < config.niche_size {
            ecology.niche.push(*first);
        }
    }
    ecology
}

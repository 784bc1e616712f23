// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Serialize;

use crate::ElementSet;

/// A structure seen as an object of a [`Category`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryObject {
    /// Display name, such as `group-0`.
    pub name: String,
    /// The structure's carrier set.
    pub elements: ElementSet,
    /// Property tags of the structure.
    pub properties: Vec<&'static str>,
}

/// How a morphism arose.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MorphismKind {
    /// The identity of an object.
    Identity,
    /// Inclusion of shared elements between two intersecting objects.
    Inclusion,
    /// Composition of two morphisms.
    Composite,
}

/// An arrow between two objects, given by their indices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Morphism {
    /// Index of the source object.
    pub domain: usize,
    /// Index of the target object.
    pub codomain: usize,
    /// How the morphism arose.
    pub kind: MorphismKind,
    /// Property tags carried by both ends.
    pub preserved: Vec<&'static str>,
}

/// Objects with their identity and inclusion morphisms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Category {
    /// The objects, in the order given.
    pub objects: Vec<CategoryObject>,
    /// Identities first, then inclusions `i → j` for `i < j`.
    pub morphisms: Vec<Morphism>,
}

impl Category {
    /// The identity morphism of `object`.
    pub fn identity(&self, object: usize) -> Option<&Morphism> {
        self.morphisms
            .iter()
            .find(|m| m.kind == MorphismKind::Identity && m.domain == object)
    }

    /// Morphisms from `domain` to `codomain`.
    pub fn hom(&self, domain: usize, codomain: usize) -> impl Iterator<Item = &Morphism> {
        self.morphisms
            .iter()
            .filter(move |m| m.domain == domain && m.codomain == codomain)
    }

    /// `g ∘ f`, defined only when `f` ends where `g` starts.
    ///
    /// Identities are neutral; any other composite preserves the tags both
    /// morphisms preserve.
    pub fn compose(f: &Morphism, g: &Morphism) -> Option<Morphism> {
        if f.codomain != g.domain {
            return None;
        }
        match (f.kind, g.kind) {
            (MorphismKind::Identity, _) => Some(g.clone()),
            (_, MorphismKind::Identity) => Some(f.clone()),
            _ => Some(Morphism {
                domain: f.domain,
                codomain: g.codomain,
                kind: MorphismKind::Composite,
                preserved: intersect(&f.preserved, &g.preserved),
            }),
        }
    }
}

fn intersect(a: &[&'static str], b: &[&'static str]) -> Vec<&'static str> {
    a.iter().filter(|tag| b.contains(*tag)).copied().collect()
}

/// The category on `objects`: one identity per object and an inclusion
/// between every pair of objects whose element sets intersect.
pub fn detect_category_structure(objects: Vec<CategoryObject>) -> Category {
    let mut morphisms: Vec<Morphism> = objects
        .iter()
        .enumerate()
        .map(|(index, object)| Morphism {
            domain: index,
            codomain: index,
            kind: MorphismKind::Identity,
            preserved: object.properties.clone(),
        })
        .collect();
    for (i, a) in objects.iter().enumerate() {
        for (j, b) in objects.iter().enumerate().skip(i + 1) {
            if !a.elements.is_disjoint(&b.elements) {
                morphisms.push(Morphism {
                    domain: i,
                    codomain: j,
                    kind: MorphismKind::Inclusion,
                    preserved: intersect(&a.properties, &b.properties),
                });
            }
        }
    }
    Category { objects, morphisms }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Serialize;

use crate::algebra::sample;
use crate::environment::Environment;
use crate::modules::Module;
use crate::{DiscoveryContext, ElementMap, ElementSet};

/// A map between two modules together with what sampling observed about it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModuleHomomorphism<'m> {
    /// Source module.
    pub domain: &'m Module,
    /// Target module.
    pub codomain: &'m Module,
    /// The underlying map.
    pub map: ElementMap,
    /// Domain elements mapped to the codomain's zero.
    pub kernel: ElementSet,
    /// Forward image of the domain.
    pub image: ElementSet,
    /// Whether the kernel is trivial.
    pub is_injective: bool,
    /// Whether the image is as large as the codomain.
    pub is_surjective: bool,
    /// `f(x + y) == f(x) + f(y)` on sampled pairs.
    pub is_linear: bool,
    /// Both modules share one scalar ring and `f(r · x) == r · f(x)` on the
    /// sample.
    pub preserves_scalars: bool,
}

impl ModuleHomomorphism<'_> {
    /// Linear and scalar-preserving.
    pub fn is_module_map(&self) -> bool {
        self.is_linear && self.preserves_scalars
    }
}

pub(crate) fn analyze<'m, E: Environment>(
    context: &DiscoveryContext<E>,
    domain: &'m Module,
    codomain: &'m Module,
    map: ElementMap,
) -> ModuleHomomorphism<'m> {
    let config = &context.config().modules;
    let kernel: ElementSet = domain
        .elements
        .iter()
        .filter(|x| map.apply(x).as_ref() == Some(&codomain.zero))
        .cloned()
        .collect();
    let image: ElementSet = domain.elements.iter().filter_map(|x| map.apply(x)).collect();

    let sampled = sample(&domain.elements, config.element_sample);
    let is_linear = sampled.iter().all(|&x| {
        sampled.iter().all(|&y| {
            let lhs = domain.add(context, x, y).and_then(|sum| map.apply(&sum));
            let rhs = map
                .apply(x)
                .zip(map.apply(y))
                .and_then(|(fx, fy)| codomain.add(context, &fx, &fy));
            lhs.is_some() && lhs == rhs
        })
    });

    let scalars = sample(&domain.scalar_ring.elements, config.submodule_scalar_sample);
    let preserves_scalars = domain.shares_scalar_ring(codomain)
        && scalars.iter().all(|&r| {
            sampled.iter().all(|&x| {
                let lhs = domain.scale(context, r, x).and_then(|rx| map.apply(&rx));
                let rhs = map.apply(x).and_then(|fx| codomain.scale(context, r, &fx));
                lhs.is_some() && lhs == rhs
            })
        });

    ModuleHomomorphism {
        domain,
        codomain,
        is_injective: kernel.len() <= 1,
        is_surjective: image.len() == codomain.elements.len(),
        map,
        kernel,
        image,
        is_linear,
        preserves_scalars,
    }
}

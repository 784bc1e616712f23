// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use num_bigint::BigInt;

use crate::algebra::{by_magnitude, sample};
use crate::environment::Environment;
use crate::modules::generators::is_combination;
use crate::modules::{Module, VectorSpace};
use crate::{DiscoveryContext, ElementSet};

/// `module` as a vector space, if its scalar ring is a field.
pub(crate) fn as_vector_space<'m, E: Environment>(
    context: &DiscoveryContext<E>,
    module: &'m Module,
) -> Option<VectorSpace<'m>> {
    if !module.scalar_ring.is_field {
        return None;
    }
    let basis = if module.is_free {
        module.generators.clone()
    } else {
        independent_set(context, module)
    };
    Some(VectorSpace {
        module,
        dimension: basis.len(),
        basis,
    })
}

/// Greedy maximal independent set: a candidate joins the basis unless it is
/// already spanned or is a sampled combination of the current basis.
fn independent_set<E: Environment>(context: &DiscoveryContext<E>, module: &Module) -> Vec<BigInt> {
    let config = &context.config().modules;
    let scalars = sample(&module.scalar_ring.elements, config.scalar_sample);
    let pairs = scalars.len() <= config.pair_scalar_cap;
    let mut basis: Vec<BigInt> = Vec::new();
    let mut spanned = ElementSet::from([module.zero.clone()]);

    for candidate in by_magnitude(&module.elements) {
        if spanned.contains(&candidate) || is_combination(context, module, &candidate, &basis) {
            continue;
        }
        for r in &scalars {
            if let Some(multiple) = module.scale(context, r, &candidate) {
                spanned.insert(multiple);
            }
        }
        if pairs {
            for b in &basis {
                for r in &scalars {
                    for s in &scalars {
                        let combination = module
                            .scale(context, r, &candidate)
                            .zip(module.scale(context, s, b))
                            .and_then(|(rc, sb)| module.add(context, &rc, &sb));
                        if let Some(combination) = combination {
                            spanned.insert(combination);
                        }
                    }
                }
            }
        }
        basis.push(candidate);
    }
    basis
}

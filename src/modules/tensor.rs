// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use num_bigint::BigInt;
use tracing::trace;

use crate::algebra::{ClosureLimits, Sampling, bounded_closure};
use crate::environment::Environment;
use crate::modules::Module;
use crate::modules::generators::{find_generators, torsion};
use crate::{DiscoveryContext, ElementSet};

/// `first ⊗ second` over their shared scalar ring, or `None` when the modules
/// are over different ring objects.
pub(crate) fn tensor_product<E: Environment>(
    context: &DiscoveryContext<E>,
    first: &Module,
    second: &Module,
) -> Option<Module> {
    if !first.shares_scalar_ring(second) {
        trace!("tensor product of modules over different rings");
        return None;
    }
    let ring = &first.scalar_ring;

    let mut tensor = Module {
        elements: ElementSet::new(),
        scalar_ring: ring.clone(),
        addition: ring.addition.clone(),
        scalar_multiplication: ring.multiplication.clone(),
        zero: ring.additive_identity.clone(),
        generators: Vec::new(),
        is_free: false,
        rank: 0,
        torsion_elements: ElementSet::new(),
    };

    if first.elements == ring.elements && second.elements == ring.elements {
        tensor.elements = ring.elements.clone();
        tensor.generators = ring.multiplicative_identity.iter().cloned().collect();
        tensor.is_free = ring.has_unity();
        tensor.rank = usize::from(ring.has_unity());
        tensor.torsion_elements = torsion(context, &tensor);
        return Some(tensor);
    }

    let mut seed: ElementSet = first
        .elements
        .iter()
        .flat_map(|a| second.elements.iter().map(move |b| (a, b)))
        .filter_map(|(a, b)| ring.mul(context, a, b))
        .collect();
    seed.insert(tensor.zero.clone());

    let config = context.config();
    let limits = ClosureLimits {
        iterations: config.closure.iterations,
        sample: config.closure.sample,
        max_size: ring.elements.len().max(seed.len()),
        sampling: Sampling::Elements,
    };
    let add = |a: &BigInt, b: &BigInt| ring.add(context, a, b);
    tensor.elements = bounded_closure(seed, &limits, &[&add], |_| true).elements;

    tensor.generators = find_generators(context, &tensor);
    if first.is_free && second.is_free {
        tensor.is_free = true;
        tensor.rank = first.rank * second.rank;
    }
    tensor.torsion_elements = torsion(context, &tensor);
    Some(tensor)
}

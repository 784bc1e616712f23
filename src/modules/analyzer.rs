// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::rc::Rc;

use num_bigint::BigInt;
use num_traits::Zero;
use tracing::{debug, trace};

use crate::algebra::sample;
use crate::environment::{Environment, StandardEnvironment};
use crate::modules::generators::{find_generators, is_free, torsion};
use crate::modules::homomorphism::analyze;
use crate::modules::submodules::find_submodules;
use crate::modules::tensor::tensor_product;
use crate::modules::vector_space::as_vector_space;
use crate::modules::{Module, ModuleHomomorphism, Submodule, VectorSpace};
use crate::{DiscoveryContext, ElementMap, ElementSet, OpKind, Operation, RingStructure};

/// Builds and analyzes modules over discovered rings.
///
/// Modules are validated against relaxed properties rather than the full
/// module axioms: the zero must be present, the elements must not all share
/// one field pattern, the zero scalar must annihilate sampled elements and
/// the scalar action must be defined on a test pair.
///
/// # Examples
///
/// ```rust
/// use std::rc::Rc;
///
/// use emergent_algebra::{DiscoveryContext, ModuleAnalyzer, RingDetector, element_set};
///
/// let context = DiscoveryContext::standard();
/// let ring = Rc::new(
///     RingDetector::new(&context)
///         .detect_ring_structure(&element_set(0..5))
///         .unwrap(),
/// );
/// let analyzer = ModuleAnalyzer::new(&context);
/// let module = analyzer.create_module(&element_set([2, 4, 6]), &ring, None).unwrap();
///
/// assert!(module.elements.contains(&0.into()));
/// assert!(analyzer.as_vector_space(&module).is_some());
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ModuleAnalyzer<'c, E: Environment = StandardEnvironment> {
    context: &'c DiscoveryContext<E>,
}

impl<'c, E: Environment> ModuleAnalyzer<'c, E> {
    /// An analyzer evaluating operations through `context`.
    pub fn new(context: &'c DiscoveryContext<E>) -> Self {
        Self { context }
    }

    /// A module on `elements` over `scalar_ring`.
    ///
    /// The scalar action defaults to plain integer multiplication, so modules
    /// may reach beyond the ring's own closure. Returns `None` for empty
    /// elements, an empty scalar ring, and modules failing validation.
    pub fn create_module(
        &self,
        elements: &ElementSet,
        scalar_ring: &Rc<RingStructure>,
        scalar_action: Option<Operation>,
    ) -> Option<Module> {
        let context = self.context;
        if elements.is_empty() || scalar_ring.elements.is_empty() {
            return None;
        }
        let scalar_multiplication = scalar_action.unwrap_or(Operation::Plain(OpKind::Mul));
        // under the ring's own multiplication the module inherits the ring's
        // zero and addition
        let (zero, addition) = if scalar_multiplication == scalar_ring.multiplication {
            (scalar_ring.additive_identity.clone(), scalar_ring.addition.clone())
        } else {
            (BigInt::zero(), Operation::Plain(OpKind::Add))
        };
        let mut elements = elements.clone();
        elements.insert(zero.clone());

        let mut module = Module {
            elements,
            scalar_ring: Rc::clone(scalar_ring),
            addition,
            scalar_multiplication,
            zero,
            generators: Vec::new(),
            is_free: false,
            rank: 0,
            torsion_elements: ElementSet::new(),
        };
        if !self.is_living(&module) {
            return None;
        }

        module.generators = find_generators(context, &module);
        module.is_free = is_free(context, &module);
        module.rank = if module.is_free {
            module.generators.len()
        } else {
            0
        };
        module.torsion_elements = torsion(context, &module);
        debug!(
            "created module of {} elements with {} generators (free: {})",
            module.elements.len(),
            module.generators.len(),
            module.is_free
        );
        Some(module)
    }

    fn is_living(&self, module: &Module) -> bool {
        let context = self.context;
        let config = &context.config().modules;

        let mut patterns = module.elements.iter().map(|m| context.pattern(m));
        if module.elements.len() > 1 {
            if let Some(first) = patterns.next() {
                if patterns.all(|pattern| pattern == first) {
                    trace!("rejected module with uniform field patterns");
                    return false;
                }
            }
        }

        let sampled = sample(&module.elements, config.unity_sample);
        let annihilates = sampled
            .iter()
            .all(|&m| module.scale(context, &module.zero, m).as_ref() == Some(&module.zero));
        if !annihilates {
            trace!("rejected module where the zero scalar does not annihilate");
            return false;
        }

        if let Some(unity) = &module.scalar_ring.multiplicative_identity {
            let unital = sampled
                .iter()
                .all(|&m| module.scale(context, unity, m).as_ref() == Some(m));
            if !unital {
                trace!("unity does not act trivially, tolerated");
            }
        }

        let test_scalar = module.scalar_ring.elements.iter().next_back();
        let test_element = module.elements.iter().next_back();
        match test_scalar.zip(test_element) {
            Some((r, m)) if module.scale(context, r, m).is_none() => {
                trace!("rejected module with undefined scalar action");
                false
            }
            _ => true,
        }
    }

    /// Greedy generator cover of `module`.
    pub fn find_generators(&self, module: &Module) -> Vec<BigInt> {
        find_generators(self.context, module)
    }

    /// Trivial, whole, cyclic, pattern and partition submodules.
    pub fn find_submodules<'m>(&self, module: &'m Module) -> Vec<Submodule<'m>> {
        find_submodules(self.context, module)
    }

    /// Kernel, image, linearity and scalar preservation of `map`.
    pub fn analyze_homomorphism<'m>(
        &self,
        domain: &'m Module,
        codomain: &'m Module,
        map: ElementMap,
    ) -> ModuleHomomorphism<'m> {
        analyze(self.context, domain, codomain, map)
    }

    /// `module` as a vector space, if its scalar ring is a field.
    pub fn as_vector_space<'m>(&self, module: &'m Module) -> Option<VectorSpace<'m>> {
        as_vector_space(self.context, module)
    }

    /// Tensor product of two modules over the identical ring object.
    pub fn tensor_product(&self, first: &Module, second: &Module) -> Option<Module> {
        tensor_product(self.context, first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element_set;
    use crate::modules::SubmoduleKind;
    use crate::rings::RingKind;

    fn zmod(n: i64, is_field: bool) -> Rc<RingStructure> {
        Rc::new(RingStructure {
            elements: element_set(0..n),
            additive_identity: BigInt::from(0),
            multiplicative_identity: Some(BigInt::from(1)),
            addition: Operation::modular(n, OpKind::Add),
            multiplication: Operation::modular(n, OpKind::Mul),
            is_commutative: true,
            ideals: Vec::new(),
            is_integral_domain: is_field,
            is_field,
            kind: RingKind::Modular {
                modulus: BigInt::from(n),
                boundary: None,
            },
        })
    }

    fn integers() -> Rc<RingStructure> {
        Rc::new(RingStructure {
            elements: element_set(-3..=3),
            additive_identity: BigInt::from(0),
            multiplicative_identity: Some(BigInt::from(1)),
            addition: Operation::Plain(OpKind::Add),
            multiplication: Operation::Plain(OpKind::Mul),
            is_commutative: true,
            ideals: Vec::new(),
            is_integral_domain: true,
            is_field: false,
            kind: RingKind::General,
        })
    }

    #[test]
    fn empty_or_invalid_input() {
        let context = DiscoveryContext::standard();
        let analyzer = ModuleAnalyzer::new(&context);
        let ring = zmod(5, true);
        assert!(analyzer.create_module(&ElementSet::new(), &ring, None).is_none());

        let empty_ring = Rc::new(RingStructure {
            elements: ElementSet::new(),
            ..(*ring).clone()
        });
        assert!(analyzer.create_module(&element_set([1, 2]), &empty_ring, None).is_none());
    }

    #[test]
    fn zero_scalar_annihilates() {
        let context = DiscoveryContext::standard();
        let analyzer = ModuleAnalyzer::new(&context);
        let module = analyzer
            .create_module(&element_set([3, 6, 9]), &zmod(5, true), None)
            .unwrap();
        for m in &module.elements {
            assert_eq!(
                module.scale(&context, &BigInt::from(0), m),
                Some(module.zero.clone())
            );
        }
        assert!(module.elements.contains(&module.zero));
    }

    #[test]
    fn generator_cover_over_integers() {
        let context = DiscoveryContext::standard();
        let analyzer = ModuleAnalyzer::new(&context);
        let module = analyzer
            .create_module(&element_set([2, 4, 6, 8]), &integers(), None)
            .unwrap();
        // every other even element is reached from 2 by multiples and sums
        assert_eq!(module.generators, vec![BigInt::from(2)]);
        assert!(module.is_free);
        assert_eq!(module.rank, 1);
        assert!(module.is_torsion_free());
    }

    #[test]
    fn torsion_under_modular_action() {
        let context = DiscoveryContext::standard();
        let analyzer = ModuleAnalyzer::new(&context);
        let action = Operation::modular(6, OpKind::Mul);
        let module = analyzer
            .create_module(&element_set([1, 2, 3]), &zmod(6, false), Some(action))
            .unwrap();
        // 3·2 = 0 and 2·3 = 0 modulo 6
        assert!(module.torsion_elements.contains(&BigInt::from(2)));
        assert!(module.torsion_elements.contains(&BigInt::from(3)));
    }

    #[test]
    fn uniform_patterns_are_rejected() {
        let context = DiscoveryContext::standard();
        let analyzer = ModuleAnalyzer::new(&context);
        // 0 and 256 share the empty pattern
        assert!(
            analyzer
                .create_module(&element_set([256]), &zmod(5, true), None)
                .is_none()
        );
    }

    #[test]
    fn submodules() {
        let context = DiscoveryContext::standard();
        let analyzer = ModuleAnalyzer::new(&context);
        let module = analyzer
            .create_module(
                &element_set(1..6),
                &zmod(6, false),
                Some(Operation::modular(6, OpKind::Mul)),
            )
            .unwrap();
        let submodules = analyzer.find_submodules(&module);
        assert!(submodules[0].is_trivial());
        assert!(submodules[1].is_whole());
        assert!(submodules.iter().all(|s| s.elements.contains(&module.zero)));
        assert!(
            submodules
                .iter()
                .filter(|s| matches!(s.kind, SubmoduleKind::Cyclic(_)))
                .all(|s| s.elements.is_subset(&module.elements))
        );
    }

    #[test]
    fn homomorphisms() {
        let context = DiscoveryContext::standard();
        let analyzer = ModuleAnalyzer::new(&context);
        let ring = integers();
        let module = analyzer
            .create_module(&element_set(-4..=4), &ring, None)
            .unwrap();
        let doubling = ElementMap::Scale(BigInt::from(2));
        let map = analyzer.analyze_homomorphism(&module, &module, doubling.clone());
        assert!(map.is_linear && map.preserves_scalars);
        assert!(map.is_injective);
        assert_eq!(map.kernel, element_set([0]));

        let other = analyzer
            .create_module(&element_set(-4..=4), &integers(), None)
            .unwrap();
        let across = analyzer.analyze_homomorphism(&module, &other, doubling);
        assert!(across.is_linear && !across.preserves_scalars);
    }

    #[test]
    fn vector_spaces_need_fields() {
        let context = DiscoveryContext::standard();
        let analyzer = ModuleAnalyzer::new(&context);
        let field = zmod(5, true);
        let module = analyzer.create_module(&element_set([1, 7]), &field, None).unwrap();
        let space = analyzer.as_vector_space(&module).unwrap();
        assert_eq!(space.dimension, space.basis.len());
        assert!(space.dimension >= 1);

        let ring = zmod(6, false);
        let module = analyzer.create_module(&element_set([1, 7]), &ring, None).unwrap();
        assert!(analyzer.as_vector_space(&module).is_none());
    }

    #[test]
    fn tensor_products() {
        let context = DiscoveryContext::standard();
        let analyzer = ModuleAnalyzer::new(&context);
        let ring = zmod(5, true);
        let whole = analyzer.create_module(&ring.elements, &ring, None).unwrap();
        let square = analyzer.tensor_product(&whole, &whole).unwrap();
        assert_eq!(square.elements, ring.elements);
        assert_eq!(square.rank, 1);

        let small = analyzer.create_module(&element_set([2]), &ring, None).unwrap();
        let product = analyzer.tensor_product(&small, &whole).unwrap();
        assert!(product.elements.is_subset(&ring.elements));
        assert!(product.elements.contains(&BigInt::from(0)));

        let foreign = zmod(5, true);
        let elsewhere = analyzer.create_module(&element_set([2]), &foreign, None).unwrap();
        assert!(analyzer.tensor_product(&small, &elsewhere).is_none());
    }
}

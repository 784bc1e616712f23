// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info};

use crate::environment::{Environment, StandardEnvironment};
use crate::life::category::detect_category_structure;
use crate::life::ecology::compute_ecology;
use crate::life::evolution::simulate_evolution;
use crate::life::{Category, CategoryObject, Ecology, Evolution};
use crate::{
    AlgebraicStructure, DiscoveryContext, ElementSet, GroupDetector, GroupStructure, Module,
    ModuleAnalyzer, RingDetector, RingStructure,
};

/// Every structure found in one integer collection, with the reports derived
/// from them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlgebraicLife {
    /// Candidate groups, in strategy order.
    pub groups: Vec<GroupStructure>,
    /// The ring, if one emerged.
    pub ring: Option<Rc<RingStructure>>,
    /// Modules over the ring.
    pub modules: Vec<Module>,
    /// Pairwise interactions of all the structures above.
    pub ecology: Ecology,
    /// The generational simulation seeded with the input.
    pub evolution: Evolution,
}

impl AlgebraicLife {
    /// Groups, the ring and the modules as category objects named
    /// `group-i`, `ring` and `module-i`.
    pub fn category_objects(&self) -> Vec<CategoryObject> {
        let groups = self
            .groups
            .iter()
            .enumerate()
            .map(|(index, group)| object(format!("group-{index}"), group));
        let ring = self
            .ring
            .iter()
            .map(|ring| object(String::from("ring"), &**ring));
        let modules = self
            .modules
            .iter()
            .enumerate()
            .map(|(index, module)| object(format!("module-{index}"), module));
        groups.chain(ring).chain(modules).collect()
    }
}

fn object<S: AlgebraicStructure + ?Sized>(name: String, structure: &S) -> CategoryObject {
    CategoryObject {
        name,
        elements: structure.elements().clone(),
        properties: structure.properties(),
    }
}

/// Runs the group, ring and module discovery together and derives the
/// ecology, evolution and category reports.
///
/// # Examples
///
/// ```rust
/// use emergent_algebra::{AlgebraicStructureDetector, DiscoveryContext, element_set};
///
/// let context = DiscoveryContext::standard();
/// let detector = AlgebraicStructureDetector::new(&context);
/// let life = detector.detect_algebraic_life(&element_set(0..5));
///
/// assert!(life.ring.as_ref().is_some_and(|ring| ring.is_field));
/// assert_eq!(life.evolution.generations.len(), 5);
///
/// let category = detector.detect_category_structure(life.category_objects());
/// assert_eq!(category.objects.len(), life.groups.len() + 1 + life.modules.len());
/// ```
#[derive(Copy, Clone, Debug)]
pub struct AlgebraicStructureDetector<'c, E: Environment = StandardEnvironment> {
    context: &'c DiscoveryContext<E>,
}

impl<'c, E: Environment> AlgebraicStructureDetector<'c, E> {
    /// A detector evaluating operations through `context`.
    pub fn new(context: &'c DiscoveryContext<E>) -> Self {
        Self { context }
    }

    /// The shared discovery context.
    pub fn context(&self) -> &'c DiscoveryContext<E> {
        self.context
    }

    /// Groups, at most one ring, modules over that ring and the reports
    /// derived from them. Empty input yields an empty report.
    pub fn detect_algebraic_life(&self, numbers: &ElementSet) -> AlgebraicLife {
        let context = self.context;
        let groups = GroupDetector::new(context).detect_groups(numbers);
        let ring = RingDetector::new(context)
            .detect_ring_structure(numbers)
            .map(Rc::new);
        let modules = ring
            .as_ref()
            .map(|ring| self.modules_over(ring))
            .unwrap_or_default();

        let ecology = compute_ecology(context, &groups, ring.as_deref(), &modules);
        let evolution = simulate_evolution(context, numbers);
        info!(
            "{} groups, {} rings and {} modules in {} numbers",
            groups.len(),
            usize::from(ring.is_some()),
            modules.len(),
            numbers.len()
        );
        AlgebraicLife {
            groups,
            ring,
            modules,
            ecology,
            evolution,
        }
    }

    /// The ring's elements as a module under integer multiplication and as
    /// the regular module under the ring's own multiplication.
    fn modules_over(&self, ring: &Rc<RingStructure>) -> Vec<Module> {
        let analyzer = ModuleAnalyzer::new(self.context);
        let actions = [None, Some(ring.multiplication.clone())];
        let modules: Vec<Module> = actions
            .into_iter()
            .filter_map(|action| analyzer.create_module(&ring.elements, ring, action))
            .collect();
        debug!("built {} modules over the ring", modules.len());
        modules
    }

    /// Identity morphisms of `objects` and inclusions between intersecting
    /// objects.
    pub fn detect_category_structure(&self, objects: Vec<CategoryObject>) -> Category {
        detect_category_structure(objects)
    }
}

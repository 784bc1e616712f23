// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use num_bigint::BigInt;
use tracing::{debug, trace};

use crate::environment::{Environment, StandardEnvironment};
use crate::groups::strategies::standard_strategies;
use crate::groups::symmetry::analyze_symmetries;
use crate::groups::{GroupDiscovery, GroupStructure, SymmetryGroup, subgroups};
use crate::{DiscoveryContext, ElementSet};

/// Discovers candidate groups in integer collections.
///
/// A detector runs an ordered list of [`GroupDiscovery`] strategies against
/// the same input; each strategy works independently and the results are
/// concatenated in strategy order. [`GroupDetector::new`] registers the
/// standard strategies.
///
/// # Examples
///
/// ```rust
/// use emergent_algebra::{DiscoveryContext, GroupDetector, element_set};
/// use num_bigint::BigInt;
///
/// let context = DiscoveryContext::standard();
/// let detector = GroupDetector::new(&context);
/// let groups = detector.detect_groups(&element_set([0, 1, -1, 2, -2]));
///
/// let additive = &groups[0];
/// assert_eq!(additive.identity, BigInt::from(0));
/// assert_eq!(
///     additive.operate(&context, &BigInt::from(1), &BigInt::from(2)),
///     Some(BigInt::from(3))
/// );
/// ```
pub struct GroupDetector<'c, E: Environment = StandardEnvironment> {
    context: &'c DiscoveryContext<E>,
    strategies: Vec<Box<dyn GroupDiscovery<E>>>,
}

impl<'c, E: Environment> GroupDetector<'c, E> {
    /// A detector running the standard strategies.
    pub fn new(context: &'c DiscoveryContext<E>) -> Self {
        Self::with_strategies(context, standard_strategies())
    }

    /// A detector running `strategies` in the given order.
    pub fn with_strategies(
        context: &'c DiscoveryContext<E>,
        strategies: Vec<Box<dyn GroupDiscovery<E>>>,
    ) -> Self {
        Self {
            context,
            strategies,
        }
    }

    /// The shared discovery context.
    pub fn context(&self) -> &'c DiscoveryContext<E> {
        self.context
    }

    /// Names of the registered strategies, in order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|strategy| strategy.name()).collect()
    }

    /// Every candidate group found by the registered strategies.
    pub fn detect_groups(&self, numbers: &ElementSet) -> Vec<GroupStructure> {
        let mut groups = Vec::new();
        for strategy in &self.strategies {
            let found = strategy.discover(self.context, numbers);
            trace!("{} strategy found {} groups", strategy.name(), found.len());
            groups.extend(found);
        }
        debug!(
            "detected {} candidate groups in {} numbers",
            groups.len(),
            numbers.len()
        );
        groups
    }

    /// Subgroups of `group`.
    ///
    /// The first two entries are always the trivial subgroup `{identity}` and
    /// a copy of `group` itself, so a trivial group yields exactly two
    /// entries. Cyclic subgroups and closed metric or partition re-clusters
    /// of the group's elements follow, without repeated element sets.
    pub fn detect_subgroups(&self, group: &GroupStructure) -> Vec<GroupStructure> {
        subgroups::detect_subgroups(self.context, group)
    }

    /// `group` with its `subgroups` field populated.
    pub fn with_subgroups(&self, group: GroupStructure) -> GroupStructure {
        let subgroups = self.detect_subgroups(&group);
        GroupStructure { subgroups, ..group }
    }

    /// Symmetries of the single integer `n`.
    pub fn analyze_symmetries(&self, n: &BigInt) -> SymmetryGroup {
        analyze_symmetries(self.context, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element_set;
    use crate::groups::{BasicGroups, GroupOrigin};

    #[test]
    fn custom_strategy_list() {
        let context = DiscoveryContext::standard();
        let detector = GroupDetector::with_strategies(&context, vec![Box::new(BasicGroups)]);
        assert_eq!(detector.strategy_names(), vec!["basic"]);

        let groups = detector.detect_groups(&element_set([1, -1]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].origin, GroupOrigin::Multiplicative);
    }

    #[test]
    fn empty_input() {
        let context = DiscoveryContext::standard();
        let detector = GroupDetector::new(&context);
        assert_eq!(detector.strategy_names().len(), 6);
        assert!(detector.detect_groups(&ElementSet::new()).is_empty());
    }

    #[test]
    fn populated_subgroups() {
        let context = DiscoveryContext::standard();
        let detector = GroupDetector::with_strategies(&context, vec![Box::new(BasicGroups)]);
        let group = detector.detect_groups(&element_set([1, -1])).remove(0);
        let group = detector.with_subgroups(group);
        assert_eq!(group.subgroups[0].elements, element_set([1]));
        assert!(group.subgroups.iter().all(|s| s.subgroups.is_empty()));
    }
}

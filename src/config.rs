// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Numeric limits governing every discovery algorithm.
//!
//! The caps collected here are what make each closure, cover and extension
//! loop terminate. They are empirical and scoped to bounded, sampled inputs;
//! changing any of them changes the structures that are discovered.

use serde::{Deserialize, Serialize};

/// Sizes of the integer lattice the collaborators partition numbers into.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Size of a contiguous partition block.
    pub partition_size: u32,
    /// Length of the full pattern cycle; also the default structure size cap.
    pub cycle_size: u32,
    /// Correlation length; similarity rings grow to twice this size.
    pub correlation_length: u32,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            partition_size: 48,
            cycle_size: 256,
            correlation_length: 75,
        }
    }
}

/// Limits of the shared fixed-point closure loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClosureConfig {
    /// Maximum number of closure rounds.
    pub iterations: usize,
    /// Elements (for groups) or pairs (for rings) sampled per round.
    pub sample: usize,
    /// Hard cap on the size of a crystallized group.
    pub max_group_size: usize,
}

impl Default for ClosureConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            sample: 20,
            max_group_size: 256,
        }
    }
}

/// Thresholds used by the group discovery strategies and symmetry analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Allowed metric drift for an operation to count as preserving.
    pub metric_tolerance: f64,
    /// Allowed metric drift for closure results to be admitted.
    pub closure_tolerance: f64,
    /// Plain addition is only tried when the target metric is this close to 1.
    pub unity_tolerance: f64,
    /// Decimal places metric values are quantized to when clustering.
    pub metric_precision: u32,
    /// Smallest bucket that is crystallized.
    pub min_cluster_size: usize,
    /// Fraction of sampled pairs that must preserve the metric.
    pub min_preservation: f64,
    /// Identity candidates tried after the cluster's own elements.
    pub identity_fallbacks: Vec<i64>,
    /// Offsets (within a cycle) that anchor-point groups gather around.
    pub anchor_offsets: Vec<u32>,
    /// Distance from an anchor offset still considered near.
    pub anchor_radius: u32,
    /// Stability multiplier applied to anchor-point groups.
    pub anchor_stability_factor: f64,
    /// Target metric of artifact-signature groups.
    pub artifact_target_metric: f64,
    /// Maximum steps when iterating a cyclic subgroup generator.
    pub cyclic_step_cap: usize,
    /// Number of partition-size multiples probed for metric periodicity.
    pub periodicity_multiples: u32,
    /// Metric drift tolerated by a periodicity symmetry.
    pub periodicity_tolerance: f64,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            metric_tolerance: 0.1,
            closure_tolerance: 0.2,
            unity_tolerance: 0.2,
            metric_precision: 2,
            min_cluster_size: 3,
            min_preservation: 0.5,
            identity_fallbacks: vec![0, 1, 48, 256],
            anchor_offsets: vec![0, 1, 48, 49],
            anchor_radius: 2,
            anchor_stability_factor: 1.5,
            artifact_target_metric: 1.618,
            cyclic_step_cap: 1000,
            periodicity_multiples: 4,
            periodicity_tolerance: 0.01,
        }
    }
}

/// Thresholds used while classifying, growing and verifying rings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    /// Share of the input a metric cluster needs to dominate.
    pub dominant_metric_share: f64,
    /// Share of the input with factoring artifacts for an artifact ring.
    pub artifact_share: f64,
    /// Share of the input a single partition needs to dominate.
    pub dominant_partition_share: f64,
    /// Elements sampled for identity, closure and commutativity checks.
    pub identity_sample: usize,
    /// Side length of the sampled distributivity cube.
    pub distributivity_sample: usize,
    /// Ideal size share (with primality) that marks a non-principal ideal maximal.
    pub maximal_ideal_share: f64,
    /// Energy multiplier for an image landing in another partition.
    pub cross_partition_penalty: f64,
    /// Elements sampled on each side of absorption and primality checks.
    pub ideal_sample: usize,
    /// Largest magnitude tried as a small principal ideal generator.
    pub principal_generator_bound: u32,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            dominant_metric_share: 0.7,
            artifact_share: 0.5,
            dominant_partition_share: 0.8,
            identity_sample: 10,
            distributivity_sample: 5,
            maximal_ideal_share: 0.6,
            cross_partition_penalty: 1.3,
            ideal_sample: 32,
            principal_generator_bound: 12,
        }
    }
}

/// Limits used by module construction, generator cover and basis search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Rounds of expansion after each new generator.
    pub generator_iterations: usize,
    /// Cap on the size of the generated set.
    pub max_generated: usize,
    /// Scalars sampled from the scalar ring.
    pub scalar_sample: usize,
    /// Already generated elements sampled per round.
    pub element_sample: usize,
    /// Elements sampled when checking `0·m = 0` and `1·m = m`.
    pub unity_sample: usize,
    /// Scalars sampled when validating submodule absorption.
    pub submodule_scalar_sample: usize,
    /// Pair combinations are only formed when at most this many scalars exist.
    pub pair_scalar_cap: usize,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            generator_iterations: 10,
            max_generated: 1000,
            scalar_sample: 20,
            element_sample: 10,
            unity_sample: 3,
            submodule_scalar_sample: 5,
            pair_scalar_cap: 10,
        }
    }
}

/// Parameters of the ecology and evolution reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LifeConfig {
    /// Number of simulated generations.
    pub generations: usize,
    /// Cap on the number pool.
    pub pool_cap: usize,
    /// Structures with more elements than this are dominant.
    pub dominant_size: usize,
    /// Structures with fewer elements than this are niche.
    pub niche_size: usize,
    /// Seed numbers subjected to single-bit mutations.
    pub mutation_seeds: usize,
    /// Elements sampled when harvesting operation outputs.
    pub output_sample: usize,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            generations: 5,
            pool_cap: 100,
            dominant_size: 10,
            niche_size: 5,
            mutation_seeds: 3,
            output_sample: 3,
        }
    }
}

/// All discovery limits, grouped by the component that consumes them.
///
/// # Examples
///
/// ```rust
/// use emergent_algebra::DiscoveryConfig;
///
/// let config = DiscoveryConfig::builder().partition_size(24).build();
/// assert_eq!(config.lattice.partition_size, 24);
/// assert_eq!(config.closure.iterations, 10);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Lattice sizes.
    pub lattice: LatticeConfig,
    /// Shared closure limits.
    pub closure: ClosureConfig,
    /// Group discovery thresholds.
    pub groups: GroupConfig,
    /// Ring discovery thresholds.
    pub rings: RingConfig,
    /// Module analysis limits.
    pub modules: ModuleConfig,
    /// Orchestrator parameters.
    pub life: LifeConfig,
}

impl DiscoveryConfig {
    /// Start from the default limits and override selected values.
    pub fn builder() -> DiscoveryConfigBuilder {
        DiscoveryConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Consuming builder for [`DiscoveryConfig`].
#[derive(Clone, Debug)]
pub struct DiscoveryConfigBuilder {
    config: DiscoveryConfig,
}

impl DiscoveryConfigBuilder {
    /// Set the partition block size.
    pub fn partition_size(mut self, partition_size: u32) -> Self {
        self.config.lattice.partition_size = partition_size;
        self
    }

    /// Set the pattern cycle size.
    pub fn cycle_size(mut self, cycle_size: u32) -> Self {
        self.config.lattice.cycle_size = cycle_size;
        self
    }

    /// Set the number of closure rounds and the per-round sample.
    pub fn closure(mut self, iterations: usize, sample: usize) -> Self {
        self.config.closure.iterations = iterations;
        self.config.closure.sample = sample;
        self
    }

    /// Replace the group thresholds.
    pub fn groups(mut self, groups: GroupConfig) -> Self {
        self.config.groups = groups;
        self
    }

    /// Replace the ring thresholds.
    pub fn rings(mut self, rings: RingConfig) -> Self {
        self.config.rings = rings;
        self
    }

    /// Replace the module limits.
    pub fn modules(mut self, modules: ModuleConfig) -> Self {
        self.config.modules = modules;
        self
    }

    /// Replace the orchestrator parameters.
    pub fn life(mut self, life: LifeConfig) -> Self {
        self.config.life = life;
        self
    }

    /// Finish building.
    pub fn build(self) -> DiscoveryConfig {
        self.config
    }
}

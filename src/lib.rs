// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `emergent_algebra` crate discovers groups, rings, modules and the
//! structures between them (subgroups, ideals, quotients, homomorphisms and
//! tensor products) in finite collections of arbitrary-precision integers.
//!
//! Operations are discovered from the data rather than assumed, and every
//! search is bounded by the limits of a [`DiscoveryConfig`]; results are
//! heuristic on arbitrary inputs. Per-integer patterns, metrics, partitions
//! and factorizations are supplied by an [`Environment`], with
//! [`StandardEnvironment`] as the deterministic default.

#![warn(missing_docs)]

pub use crate::algebra::{
    AlgebraicStructure, Closure, ClosureLimits, DiscoveryContext, ElementMap, ElementSet, OpKind,
    Operation, Overlap, Residue, Sampling, bounded_closure, element_set, overlap,
};
pub use crate::config::{
    ClosureConfig, DiscoveryConfig, DiscoveryConfigBuilder, GroupConfig, LatticeConfig,
    LifeConfig, ModuleConfig, RingConfig,
};
pub use crate::environment::{
    Artifact, ArtifactKind, Environment, FIELD_CONSTANTS, FactorProvider, FieldArithmetic,
    FieldPattern, PATTERN_BITS, PartitionLocation, PartitionLocator, PatternSource, Product,
    SimilarityMetric, StandardEnvironment, artifact_signature, is_prime,
};
pub use crate::error::AlgebraError;
pub use crate::groups::{
    AnchorPointGroups, ArtifactSignatureGroups, BasicGroups, GroupDetector, GroupDiscovery,
    GroupOrigin, GroupStructure, HarmonicClusters, PartitionLocalGroups, SimilarityClusters,
    SymmetryClass, SymmetryGenerator, SymmetryGroup, SymmetryKind, standard_strategies,
};
pub use crate::life::{
    AlgebraicLife, AlgebraicStructureDetector, Category, CategoryObject, Ecology, Evolution,
    Generation, Interaction, InteractionKind, Morphism, MorphismKind, StructureId,
    detect_category_structure,
};
pub use crate::modules::{
    Module, ModuleAnalyzer, ModuleHomomorphism, Submodule, SubmoduleKind, VectorSpace,
};
pub use crate::rings::{
    Ideal, IdealKind, NaturalBoundary, QuotientRing, RingDetector, RingHomomorphism, RingKind,
    RingStructure,
};

mod algebra;
mod config;
mod environment;
mod error;
mod groups;
mod life;
mod modules;
mod rings;

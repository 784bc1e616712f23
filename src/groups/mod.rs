// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub use detector::GroupDetector;
pub use strategies::{
    AnchorPointGroups, ArtifactSignatureGroups, BasicGroups, GroupDiscovery, HarmonicClusters,
    PartitionLocalGroups, SimilarityClusters, standard_strategies,
};
pub use structure::{GroupOrigin, GroupStructure};
pub use symmetry::{SymmetryClass, SymmetryGenerator, SymmetryGroup, SymmetryKind};

pub(crate) use strategies::buckets;

mod crystallize;
mod detector;
mod strategies;
mod structure;
mod subgroups;
mod symmetry;

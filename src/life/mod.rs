// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub use category::{Category, CategoryObject, Morphism, MorphismKind, detect_category_structure};
pub use detector::{AlgebraicLife, AlgebraicStructureDetector};
pub use ecology::{Ecology, Interaction, InteractionKind, StructureId};
pub use evolution::{Evolution, Generation};

mod category;
mod detector;
mod ecology;
mod evolution;

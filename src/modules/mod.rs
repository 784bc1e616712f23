// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub use analyzer::ModuleAnalyzer;
pub use homomorphism::ModuleHomomorphism;
pub use structure::{Module, Submodule, SubmoduleKind, VectorSpace};

mod analyzer;
mod generators;
mod homomorphism;
mod structure;
mod submodules;
mod tensor;
mod vector_space;

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub use detector::RingDetector;
pub use homomorphism::RingHomomorphism;
pub use quotient::QuotientRing;
pub use structure::{Ideal, IdealKind, NaturalBoundary, RingKind, RingStructure};

pub(crate) use ideals::absorbs;

mod classify;
mod detector;
mod homomorphism;
mod ideals;
mod quotient;
mod structure;

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;
use serde::Serialize;

use crate::algebra::serialize_pairs;

/// A map between element sets, described by data so homomorphism reports can
/// be compared and serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ElementMap {
    /// `x ↦ x`.
    Identity,
    /// `x ↦ x mod modulus`, into `[0, |modulus|)`.
    Reduce {
        /// The modulus.
        modulus: BigInt,
    },
    /// `x ↦ k·x`.
    Scale(BigInt),
    /// Explicit lookup table; undefined outside its keys.
    Table(#[serde(serialize_with = "serialize_pairs")] BTreeMap<BigInt, BigInt>),
}

impl ElementMap {
    /// Image of `x`, or `None` where the map is undefined.
    pub fn apply(&self, x: &BigInt) -> Option<BigInt> {
        match self {
            Self::Identity => Some(x.clone()),
            Self::Reduce { modulus } => {
                if modulus.is_zero() {
                    None
                } else {
                    let modulus = if modulus < &BigInt::zero() {
                        -modulus
                    } else {
                        modulus.clone()
                    };
                    Some(x.mod_floor(&modulus))
                }
            }
            Self::Scale(factor) => Some(factor * x),
            Self::Table(table) => table.get(x).cloned(),
        }
    }
}

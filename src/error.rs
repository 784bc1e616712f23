// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::error::Error;
use std::fmt::{Display, Formatter};

use num_bigint::BigInt;

/// Failure of a single operation evaluation or collaborator call.
///
/// Discovery code treats every instance as "undefined here": the candidate
/// under test is rejected and the search continues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlgebraError {
    /// A modular operation was asked to reduce by zero.
    ZeroModulus,

    /// An external collaborator reported a failure.
    Collaborator(String),

    /// A quotient operation produced a value outside every equivalence class.
    MissingRepresentative(BigInt),
}

impl Display for AlgebraError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroModulus => write!(f, "modular operation with modulus zero"),
            Self::Collaborator(message) => {
                write!(f, "collaborator failure: {message}")
            }
            Self::MissingRepresentative(value) => {
                write!(f, "no equivalence class represents {value}")
            }
        }
    }
}

impl Error for AlgebraError {}

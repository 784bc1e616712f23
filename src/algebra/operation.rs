// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use num_bigint::BigInt;
use serde::Serialize;

use crate::algebra::serialize_pairs;

/// The underlying arithmetic of an [`Operation`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum OpKind {
    /// Addition.
    Add,
    /// Multiplication.
    Mul,
}

impl OpKind {
    /// Ordinary integer arithmetic.
    pub fn plain(self, a: &BigInt, b: &BigInt) -> BigInt {
        match self {
            Self::Add => a + b,
            Self::Mul => a * b,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Mul => "*",
        }
    }
}

/// A binary operation over integers, described by data rather than captured
/// state so structures carrying it can be compared and serialized.
///
/// Operations are evaluated by [`crate::DiscoveryContext::apply`]; evaluation
/// may fail, which callers treat as "undefined at these operands".
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Operation {
    /// Ordinary integer arithmetic.
    Plain(OpKind),
    /// Arithmetic reduced modulo `modulus` into `[0, modulus)`.
    Modular {
        /// The modulus.
        modulus: BigInt,
        /// Underlying arithmetic.
        kind: OpKind,
    },
    /// Arithmetic on offsets inside a partition block, reduced modulo the
    /// block size and shifted back into the block.
    PartitionModular {
        /// Index of the block.
        partition: BigInt,
        /// Underlying arithmetic.
        kind: OpKind,
    },
    /// Field-aware arithmetic, falling back to [`Operation::PartitionModular`]
    /// whenever the field-aware result leaves the partition.
    PartitionBounded {
        /// Index of the block.
        partition: BigInt,
        /// Underlying arithmetic.
        kind: OpKind,
    },
    /// Field-aware arithmetic supplied by the environment.
    FieldAware(OpKind),
    /// Operation induced on equivalence classes: evaluate `base`, then replace
    /// the result by its class representative.
    Quotient {
        /// Operation of the parent ring.
        base: Box<Operation>,
        /// Every parent element mapped to its class representative.
        #[serde(serialize_with = "serialize_pairs")]
        representatives: BTreeMap<BigInt, BigInt>,
    },
}

impl Operation {
    /// The underlying arithmetic.
    pub fn kind(&self) -> OpKind {
        match self {
            Self::Plain(kind) | Self::FieldAware(kind) => *kind,
            Self::Modular { kind, .. }
            | Self::PartitionModular { kind, .. }
            | Self::PartitionBounded { kind, .. } => *kind,
            Self::Quotient { base, .. } => base.kind(),
        }
    }

    /// Shorthand for `Operation::Modular { modulus, kind }`.
    pub fn modular(modulus: impl Into<BigInt>, kind: OpKind) -> Self {
        Self::Modular {
            modulus: modulus.into(),
            kind,
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain(kind) => write!(f, "{}", kind.symbol()),
            Self::Modular { modulus, kind } => write!(f, "{} mod {modulus}", kind.symbol()),
            Self::PartitionModular { partition, kind } => {
                write!(f, "{} mod partition {partition}", kind.symbol())
            }
            Self::PartitionBounded { partition, kind } => {
                write!(f, "field {} within partition {partition}", kind.symbol())
            }
            Self::FieldAware(kind) => write!(f, "field {}", kind.symbol()),
            Self::Quotient { base, .. } => write!(f, "({base}) on classes"),
        }
    }
}

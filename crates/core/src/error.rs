// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkhub_domain::DomainError;

/// Errors that can occur while planning a booking operation.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The referenced lot no longer exists and the operation needs it.
    ///
    /// Only operations that must *hold* a slot fail this way; releasing
    /// operations skip the counter instead.
    LotMissing {
        /// The missing lot's identifier.
        lot_id: i64,
    },
    /// The entity has no persisted identifier.
    Unpersisted {
        /// The entity kind ("lot" or "booking").
        entity: &'static str,
    },
    /// An update was requested with no fields to change.
    EmptyPatch,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::LotMissing { lot_id } => write!(f, "Lot {lot_id} no longer exists"),
            Self::Unpersisted { entity } => {
                write!(f, "The {entity} has not been persisted")
            }
            Self::EmptyPatch => write!(f, "Update carries no fields to change"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

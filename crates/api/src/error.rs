// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use parkhub::CoreError;
use parkhub_domain::{CapacityError, DomainError};
use parkhub_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core/persistence errors and represent
/// the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the principal does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The lot has no free slot for the requested reservation.
    CapacityExceeded {
        /// A human-readable description.
        message: String,
    },
    /// The payment authorizer declined the charge.
    PaymentDeclined {
        /// A human-readable description.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::CapacityExceeded { message } => {
                write!(f, "Capacity exceeded: {message}")
            }
            Self::PaymentDeclined { message } => {
                write!(f, "Payment declined: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidLocation(msg) => ApiError::InvalidInput {
            field: String::from("location"),
            message: msg,
        },
        DomainError::InvalidOperatingHours(msg) => ApiError::InvalidInput {
            field: String::from("operating_hours"),
            message: msg,
        },
        DomainError::InvalidCapacity { total } => ApiError::InvalidInput {
            field: String::from("total_slots"),
            message: format!("Total slots must be >= 0, got {total}"),
        },
        DomainError::InvalidAvailableSlots { available, total } => ApiError::InvalidInput {
            field: String::from("available_slots"),
            message: format!("Available slots {available} is outside 0..={total}"),
        },
        DomainError::NegativePrice { price } => ApiError::InvalidInput {
            field: String::from("price"),
            message: format!("Price must be non-negative, got {price}"),
        },
        DomainError::InvalidCoordinate {
            longitude,
            latitude,
        } => ApiError::InvalidInput {
            field: String::from("coordinate"),
            message: format!("({longitude}, {latitude}) is outside valid ranges"),
        },
        DomainError::InvalidDate { value, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{value}': {error}"),
        },
        DomainError::InvalidTime { value, error } => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("Failed to parse time '{value}': {error}"),
        },
        DomainError::InvalidStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown booking status: {value}"),
        },
        DomainError::InvalidStatusTransition { from, to } => ApiError::DomainRuleViolation {
            rule: String::from("status_transition"),
            message: format!("Status transition {from} -> {to} is not permitted"),
        },
        DomainError::CapacityViolation(capacity_err) => match capacity_err {
            CapacityError::Exceeded { .. } => ApiError::CapacityExceeded {
                message: String::from("The lot has no free slot"),
            },
            CapacityError::Underflow { .. } | CapacityError::Overflow { .. } => {
                ApiError::Internal {
                    message: format!("Slot counter invariant violated: {capacity_err}"),
                }
            }
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::LotMissing { lot_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Lot"),
            message: format!("Lot {lot_id} no longer exists"),
        },
        CoreError::Unpersisted { entity } => ApiError::Internal {
            message: format!("Unpersisted {entity} reached the coordinator"),
        },
        CoreError::EmptyPatch => ApiError::InvalidInput {
            field: String::from("body"),
            message: String::from("Update carries no fields to change"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// This translation is explicit and ensures persistence errors are not leaked directly.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        PersistenceError::CapacityExceeded { lot_id } => ApiError::CapacityExceeded {
            message: format!("Lot {lot_id} has no free slot"),
        },
        PersistenceError::ActiveBookingsExist { lot_id, confirmed } => {
            ApiError::DomainRuleViolation {
                rule: String::from("active_bookings"),
                message: format!(
                    "Lot {lot_id} still has {confirmed} confirmed booking(s); cancel them first"
                ),
            }
        }
        PersistenceError::AccountNotFound(msg)
        | PersistenceError::SessionNotFound(msg)
        | PersistenceError::SessionExpired(msg) => ApiError::AuthenticationFailed { reason: msg },
        other => ApiError::Internal {
            message: format!("Persistence error: {other}"),
        },
    }
}

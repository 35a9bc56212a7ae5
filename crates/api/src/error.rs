// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use courtside::CoreError;
use courtside_domain::{DomainError, ErrorFamily};
use courtside_persistence::PersistenceError;

/// Authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The actor's role does not grant the capability.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A customer acted on a record that is not theirs.
    NotOwner {
        /// The action that was attempted.
        action: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::NotOwner { action } => {
                write!(f, "Unauthorized: '{action}' is limited to your own records")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// One variant per error family; the server maps each to a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The actor may not perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The request collides with existing state.
    Conflict {
        /// Machine-readable error kind.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The record is not in a state that allows the action.
    PreconditionFailed {
        /// Machine-readable error kind.
        rule: String,
        /// A human-readable description of the failed precondition.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
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
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Conflict { rule, message } => write!(f, "Conflict ({rule}): {message}"),
            Self::PreconditionFailed { rule, message } => {
                write!(f, "Precondition failed ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
            AuthError::NotOwner { action } => Self::Unauthorized {
                action,
                required_role: String::from("Staff"),
            },
        }
    }
}

const fn input_field(err: &DomainError) -> &'static str {
    match err {
        DomainError::InvalidRate { .. } => "hourly_rate",
        DomainError::InvalidTimeRange { .. } => "hours",
        DomainError::PastDate { .. } => "date",
        DomainError::InvalidEmailFormat(_) => "email",
        DomainError::InvalidPhoneFormat(_) => "phone",
        DomainError::InvalidName(_) => "name",
        DomainError::InvalidCapacity(_) => "capacity",
        DomainError::InvalidDateRange { .. } => "range",
        DomainError::InvalidLimit => "limit",
        DomainError::InvalidEnumValue { kind, .. } => *kind,
        _ => "request",
    }
}

const fn resource_type(err: &DomainError) -> &'static str {
    match err {
        DomainError::FacilityNotFound(_) => "Facility",
        DomainError::CustomerNotFound(_) => "Customer",
        _ => "Reservation",
    }
}

/// Translates a domain error into an API error by family.
///
/// The domain error's kind becomes the rule, and its message is kept.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err.family() {
        ErrorFamily::Validation => ApiError::InvalidInput {
            field: String::from(input_field(&err)),
            message,
        },
        ErrorFamily::Conflict => ApiError::Conflict {
            rule: String::from(err.kind()),
            message,
        },
        ErrorFamily::Precondition => ApiError::PreconditionFailed {
            rule: String::from(err.kind()),
            message,
        },
        ErrorFamily::NotFound => ApiError::ResourceNotFound {
            resource_type: String::from(resource_type(&err)),
            message,
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::SequenceFailed(seq_err) => ApiError::Internal {
            message: seq_err.to_string(),
        },
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Rejected(core_err) => translate_core_error(core_err),
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Record"),
                message,
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

//! Contract-violation errors for the toolbelt crate.
//!
//! [`ToolbeltError`] covers conditions where a *caller* broke a contract: a
//! blank display name, a lookup for a member that was never declared, reading
//! the value of a failed outcome. These are deliberately distinct from the
//! business failures carried inside an [`Outcome`](crate::Outcome), which are
//! always a member of some [`ClosedSetValue`](crate::ClosedSetValue) taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a toolbelt contract is violated.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ToolbeltError {
    /// An argument failed a [`guard`](crate::guard) check.
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: String,
        /// What the argument was required to satisfy.
        reason: String,
    },

    /// A lookup by key found nothing.
    ///
    /// Produced by [`ClosedSetValue::from_value`](crate::ClosedSetValue::from_value),
    /// [`ClosedSetValue::from_display_name`](crate::ClosedSetValue::from_display_name)
    /// and [`UniqueValueSet`](crate::UniqueValueSet) lookups.
    #[error("{key} is not a valid {lookup} for {container}")]
    NotFound {
        /// Name of the searched container (e.g. the taxonomy type name).
        container: String,
        /// What kind of key was searched (`"value"`, `"display name"`, ...).
        lookup: String,
        /// The key that was not found, rendered for diagnostics.
        key: String,
    },

    /// An operation was attempted on an object whose state forbids it.
    ///
    /// Reading the value of a failed outcome, or assembling an outcome whose
    /// success flag contradicts its error kind.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of the violated state requirement.
        message: String,
    },

    /// A key or value that must be unique was inserted twice.
    #[error("Duplicate {lookup} '{key}' in {container}")]
    Duplicate {
        /// Name of the container that rejected the entry.
        container: String,
        /// Which side of the entry collided (`"value"`, `"display name"`, ...).
        lookup: String,
        /// The colliding key, rendered for diagnostics.
        key: String,
    },
}

impl ToolbeltError {
    pub(crate) fn invalid_argument(argument: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(container: &str, lookup: &str, key: impl ToString) -> Self {
        Self::NotFound {
            container: container.to_owned(),
            lookup: lookup.to_owned(),
            key: key.to_string(),
        }
    }

    pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    pub(crate) fn duplicate(container: &str, lookup: &str, key: impl ToString) -> Self {
        Self::Duplicate {
            container: container.to_owned(),
            lookup: lookup.to_owned(),
            key: key.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ToolbeltError>;

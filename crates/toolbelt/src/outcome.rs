//! Explicit success/failure outcomes.
//!
//! An operation that can fail for a known, enumerable set of reasons returns
//! an [`Outcome`] (no payload) or a [`ValueOutcome`] (payload on success)
//! instead of panicking or returning a sentinel. The failure reason is always
//! a member of a [`ClosedSetValue`] taxonomy, so callers recover by comparing
//! against declared members.
//!
//! Each outcome is decided once, at construction, and never changes. The
//! invariant is:
//!
//! | `is_success` | `error_kind` | `value` (ValueOutcome) |
//! |--------------|--------------|------------------------|
//! | `true`       | `None`       | present                |
//! | `false`      | `Some(e)`    | absent                 |
//!
//! Breaking a contract (reading the value of a failure, assembling parts that
//! contradict the table) is reported as a [`ToolbeltError`], never as an
//! error kind.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::closed_set::ClosedSetValue;
use crate::errors::{Result, ToolbeltError};

/// The decided state shared by both outcome types.
///
/// Holding exactly one of value or error kind makes a contradictory outcome
/// unrepresentable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Decision<T, E> {
    Success(T),
    Failure(E),
}

impl<T, E> Decision<T, E> {
    fn error_kind(&self) -> Option<&E> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error_kind) => Some(error_kind),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome (no payload)
// ---------------------------------------------------------------------------

/// Success or failure of an operation that produces no value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[must_use = "an outcome may be a failure that must be inspected"]
pub struct Outcome<E: ClosedSetValue> {
    decision: Decision<(), E>,
}

impl<E: ClosedSetValue> Outcome<E> {
    /// A successful outcome.
    pub fn succeed() -> Self {
        Self {
            decision: Decision::Success(()),
        }
    }

    /// A failed outcome carrying `error_kind`.
    pub fn fail(error_kind: E) -> Self {
        Self {
            decision: Decision::Failure(error_kind),
        }
    }

    /// A failed outcome from an error kind that may be absent.
    ///
    /// Fails with [`ToolbeltError::InvalidArgument`] when `error_kind` is `None`.
    pub fn try_fail(error_kind: Option<E>) -> Result<Self> {
        let error_kind = missing_error_kind(error_kind)?;
        Ok(Self::fail(error_kind))
    }

    /// Assembles an outcome from raw parts, enforcing the success/error invariant.
    ///
    /// Fails with [`ToolbeltError::InvalidState`] for a success with an error
    /// kind or a failure without one.
    pub fn from_parts(is_success: bool, error_kind: Option<E>) -> Result<Self> {
        check_parts(is_success, error_kind.as_ref())?;
        Ok(match error_kind {
            None => Self::succeed(),
            Some(error_kind) => Self::fail(error_kind),
        })
    }

    /// Returns `true` if the operation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self.decision, Decision::Success(_))
    }

    /// Returns `true` if the operation failed.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The failure reason; `None` for a success.
    pub fn error_kind(&self) -> Option<&E> {
        self.decision.error_kind()
    }

    /// Converts into a standard [`Result`](std::result::Result).
    pub fn into_result(self) -> std::result::Result<(), E> {
        match self.decision {
            Decision::Success(()) => Ok(()),
            Decision::Failure(error_kind) => Err(error_kind),
        }
    }
}

impl<E> Serialize for Outcome<E>
where
    E: ClosedSetValue + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 2)?;
        state.serialize_field("is_success", &self.is_success())?;
        state.serialize_field("error_kind", &self.error_kind())?;
        state.end()
    }
}

// ---------------------------------------------------------------------------
// ValueOutcome (payload on success)
// ---------------------------------------------------------------------------

/// Success (with a value) or failure of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[must_use = "an outcome may be a failure that must be inspected"]
pub struct ValueOutcome<T, E: ClosedSetValue> {
    decision: Decision<T, E>,
}

impl<T, E: ClosedSetValue> ValueOutcome<T, E> {
    /// A successful outcome carrying `value`.
    pub fn succeed(value: T) -> Self {
        Self {
            decision: Decision::Success(value),
        }
    }

    /// A failed outcome carrying `error_kind`.
    pub fn fail(error_kind: E) -> Self {
        Self {
            decision: Decision::Failure(error_kind),
        }
    }

    /// A failed outcome from an error kind that may be absent.
    ///
    /// Fails with [`ToolbeltError::InvalidArgument`] when `error_kind` is `None`.
    pub fn try_fail(error_kind: Option<E>) -> Result<Self> {
        let error_kind = missing_error_kind(error_kind)?;
        Ok(Self::fail(error_kind))
    }

    /// Assembles an outcome from raw parts, enforcing the invariant.
    ///
    /// Fails with [`ToolbeltError::InvalidState`] unless the parts are either
    /// `(true, Some(value), None)` or `(false, None, Some(error_kind))`.
    pub fn from_parts(is_success: bool, value: Option<T>, error_kind: Option<E>) -> Result<Self> {
        check_parts(is_success, error_kind.as_ref())?;
        match (value, error_kind) {
            (Some(value), None) => Ok(Self::succeed(value)),
            (None, Some(error_kind)) => Ok(Self::fail(error_kind)),
            (None, None) => Err(ToolbeltError::invalid_state(
                "a successful outcome must carry a value",
            )),
            (Some(_), Some(_)) => Err(ToolbeltError::invalid_state(
                "a failed outcome cannot carry a value",
            )),
        }
    }

    /// Returns `true` if the operation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self.decision, Decision::Success(_))
    }

    /// Returns `true` if the operation failed.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The failure reason; `None` for a success.
    pub fn error_kind(&self) -> Option<&E> {
        self.decision.error_kind()
    }

    /// The success value.
    ///
    /// Reading the value of a failure is a caller bug: check
    /// [`is_success`](Self::is_success) first. It is reported as
    /// [`ToolbeltError::InvalidState`].
    pub fn value(&self) -> Result<&T> {
        match &self.decision {
            Decision::Success(value) => Ok(value),
            Decision::Failure(_) => Err(value_of_failure()),
        }
    }

    /// Consumes the outcome, returning the success value.
    ///
    /// Same contract as [`value`](Self::value).
    pub fn into_value(self) -> Result<T> {
        match self.decision {
            Decision::Success(value) => Ok(value),
            Decision::Failure(_) => Err(value_of_failure()),
        }
    }

    /// Drops the value, keeping only success or the failure reason.
    pub fn without_value(self) -> Outcome<E> {
        match self.decision {
            Decision::Success(_) => Outcome::succeed(),
            Decision::Failure(error_kind) => Outcome::fail(error_kind),
        }
    }

    /// Converts into a standard [`Result`](std::result::Result).
    pub fn into_result(self) -> std::result::Result<T, E> {
        match self.decision {
            Decision::Success(value) => Ok(value),
            Decision::Failure(error_kind) => Err(error_kind),
        }
    }
}

impl<T, E> Serialize for ValueOutcome<T, E>
where
    T: Serialize,
    E: ClosedSetValue + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let value = match &self.decision {
            Decision::Success(value) => Some(value),
            Decision::Failure(_) => None,
        };
        let mut state = serializer.serialize_struct("ValueOutcome", 3)?;
        state.serialize_field("is_success", &self.is_success())?;
        state.serialize_field("error_kind", &self.error_kind())?;
        state.serialize_field("value", &value)?;
        state.end()
    }
}

// ---------------------------------------------------------------------------
// Shared checks
// ---------------------------------------------------------------------------

fn check_parts<E: ClosedSetValue>(is_success: bool, error_kind: Option<&E>) -> Result<()> {
    match (is_success, error_kind) {
        (true, Some(error_kind)) => {
            tracing::warn!(
                error_kind = %error_kind.display_name(),
                "Rejected successful outcome with an error kind"
            );
            Err(ToolbeltError::invalid_state(format!(
                "a successful outcome cannot carry error kind '{}'",
                error_kind.display_name()
            )))
        }
        (false, None) => {
            tracing::warn!("Rejected failed outcome without an error kind");
            Err(ToolbeltError::invalid_state(
                "a failed outcome must carry an error kind",
            ))
        }
        _ => Ok(()),
    }
}

fn missing_error_kind<E>(error_kind: Option<E>) -> Result<E> {
    error_kind.ok_or_else(|| {
        ToolbeltError::invalid_argument("error_kind", "a failure requires an error kind")
    })
}

fn value_of_failure() -> ToolbeltError {
    ToolbeltError::invalid_state("the value of a failed outcome cannot be accessed")
}

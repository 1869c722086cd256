//! Argument guards.
//!
//! Each guard checks one precondition and returns
//! [`ToolbeltError::InvalidArgument`] naming the argument when it does not
//! hold. Guards are meant for boundaries where input is first accepted; once a
//! value has been wrapped in a validated type it is not re-checked.
//!
//! ```
//! use toolbelt::guard;
//!
//! assert!(guard::not_blank("paulus", "customer").is_ok());
//! assert!(guard::not_blank("   ", "customer").is_err());
//! ```

use std::collections::HashMap;

use crate::closed_set::ClosedSetValue;
use crate::errors::{Result, ToolbeltError};

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

/// Requires an optional argument to be present, returning the inner value.
pub fn some<T>(value: Option<T>, argument: &str) -> Result<T> {
    value.ok_or_else(|| ToolbeltError::invalid_argument(argument, "cannot be absent"))
}

/// Requires a string to be non-empty.
pub fn not_empty(value: &str, argument: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ToolbeltError::invalid_argument(argument, "cannot be empty"));
    }
    Ok(())
}

/// Requires a string to contain at least one non-whitespace character.
pub fn not_blank(value: &str, argument: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ToolbeltError::invalid_argument(
            argument,
            "cannot be empty or whitespace",
        ));
    }
    Ok(())
}

/// Requires a slice to hold at least one item.
pub fn not_empty_items<T>(values: &[T], argument: &str) -> Result<()> {
    if values.is_empty() {
        return Err(ToolbeltError::invalid_argument(argument, "cannot be empty"));
    }
    Ok(())
}

/// Requires a map to hold at least one entry.
pub fn not_empty_map<K, V, S>(map: &HashMap<K, V, S>, argument: &str) -> Result<()> {
    if map.is_empty() {
        return Err(ToolbeltError::invalid_argument(argument, "cannot be empty"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Sign
// ---------------------------------------------------------------------------

/// Requires a number to be `>= 0`.
pub fn not_negative<N>(value: N, argument: &str) -> Result<()>
where
    N: PartialOrd + Default,
{
    if value < N::default() {
        return Err(ToolbeltError::invalid_argument(argument, "cannot be negative"));
    }
    Ok(())
}

/// Requires a number to be `> 0`.
///
/// `NaN` fails this check because it is not greater than zero.
pub fn not_zero_or_negative<N>(value: N, argument: &str) -> Result<()>
where
    N: PartialOrd + Default,
{
    if !(value > N::default()) {
        return Err(ToolbeltError::invalid_argument(
            argument,
            "cannot be 0 or negative",
        ));
    }
    Ok(())
}

/// Requires a number to differ from zero.
pub fn not_zero<N>(value: N, argument: &str) -> Result<()>
where
    N: PartialEq + Default,
{
    if value == N::default() {
        return Err(ToolbeltError::invalid_argument(argument, "cannot be 0"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Length (in characters, not bytes)
// ---------------------------------------------------------------------------

/// Requires a string to be at most `length` characters long.
pub fn max_length(value: &str, length: usize, argument: &str) -> Result<()> {
    if value.chars().count() > length {
        return Err(ToolbeltError::invalid_argument(
            argument,
            format!("cannot have a length greater than {length}"),
        ));
    }
    Ok(())
}

/// Requires a string to be at least `length` characters long.
pub fn min_length(value: &str, length: usize, argument: &str) -> Result<()> {
    if value.chars().count() < length {
        return Err(ToolbeltError::invalid_argument(
            argument,
            format!("cannot have a length less than {length}"),
        ));
    }
    Ok(())
}

/// Requires a string to be exactly `length` characters long.
pub fn fixed_length(value: &str, length: usize, argument: &str) -> Result<()> {
    if value.chars().count() != length {
        return Err(ToolbeltError::invalid_argument(
            argument,
            format!("must have a length equal to {length}"),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Closed sets
// ---------------------------------------------------------------------------

/// Requires `value` to be the value of a declared member of taxonomy `S`,
/// returning that member.
///
/// An undeclared value is the caller's fault and becomes
/// [`ToolbeltError::InvalidArgument`]. A taxonomy that fails its own
/// validation reports that error unchanged.
pub fn defined<S: ClosedSetValue>(value: &S::Value, argument: &str) -> Result<&'static S> {
    S::from_value(value).map_err(|err| match err {
        ToolbeltError::NotFound { .. } => {
            ToolbeltError::invalid_argument(argument, format!("must be a declared {}", S::NAME))
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn reason(result: Result<()>) -> String {
        match result {
            Err(ToolbeltError::InvalidArgument { reason, .. }) => reason,
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn not_blank_rejects_empty_and_whitespace() {
        assert!(not_blank("", "name").is_err());
        assert!(not_blank(" \t\n", "name").is_err());
        assert!(not_blank(" a ", "name").is_ok());
    }

    #[test]
    fn not_empty_accepts_whitespace() {
        assert!(not_empty("", "name").is_err());
        assert!(not_empty(" ", "name").is_ok());
    }

    #[test]
    fn error_names_the_argument() {
        match not_blank("", "display_name") {
            Err(ToolbeltError::InvalidArgument { argument, .. }) => {
                assert_eq!(argument, "display_name")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn some_unwraps_present_values() {
        assert_eq!(some(Some(3), "n"), Ok(3));
        assert!(some::<u8>(None, "n").is_err());
    }

    #[test]
    fn collection_guards() {
        assert!(not_empty_items::<u8>(&[], "items").is_err());
        assert!(not_empty_items(&[1], "items").is_ok());

        let mut map: HashMap<&str, u8> = HashMap::new();
        assert!(not_empty_map(&map, "map").is_err());
        map.insert("a", 1);
        assert!(not_empty_map(&map, "map").is_ok());
    }

    #[test]
    fn sign_guards_work_for_integers_and_floats() {
        assert!(not_negative(0, "n").is_ok());
        assert!(not_negative(-1, "n").is_err());
        assert!(not_negative(-0.5_f64, "n").is_err());

        assert!(not_zero_or_negative(1, "n").is_ok());
        assert!(not_zero_or_negative(0, "n").is_err());
        assert!(not_zero_or_negative(f64::NAN, "n").is_err());

        assert!(not_zero(0.0_f64, "n").is_err());
        assert!(not_zero(-2, "n").is_ok());
    }

    #[test]
    fn length_guards_count_characters() {
        assert!(max_length("ééé", 3, "s").is_ok());
        assert!(max_length("éééé", 3, "s").is_err());
        assert!(min_length("ab", 3, "s").is_err());
        assert_eq!(reason(fixed_length("ab", 3, "s")), "must have a length equal to 3");
        assert!(fixed_length("abc", 3, "s").is_ok());
    }
}

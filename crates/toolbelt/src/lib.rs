//! Closed-set values, explicit outcomes, and argument guards.
//!
//! This crate holds the reusable building blocks that other crates in the
//! workspace use to describe *what can go wrong* without panicking or
//! returning sentinels.
//!
//! ## Architectural Layer
//!
//! **Domain library.** No I/O, no threads beyond one-time initialisation. The
//! crate emits `tracing` events but never installs a subscriber.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`closed_set`] | [`ClosedSetValue`], [`Member`], the [`closed_set!`] declaration macro |
//! | [`outcome`] | [`Outcome`] and [`ValueOutcome`] success/failure containers |
//! | [`errors`] | [`ToolbeltError`] contract-violation errors |
//! | [`guard`] | Argument precondition checks |
//! | [`collections`] | [`UniqueValueSet`], [`OptionalItemsExt`] |
//! | [`hashing`] | [`combine_hashes`] |
//!
//! ## Two kinds of failure
//!
//! A *business failure* is expected and recoverable; it is a member of a
//! closed-set taxonomy carried inside an [`Outcome`]. A *contract violation*
//! (blank display name, unknown lookup key, reading the value of a failed
//! outcome) is a [`ToolbeltError`] returned at the point of detection. The two
//! are never mixed.

pub mod closed_set;
pub mod collections;
pub mod errors;
pub mod guard;
pub mod hashing;
pub mod outcome;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use closed_set::{ClosedSetValue, Member, Members, Taxonomy, TaxonomyCell};
pub use collections::{OptionalItemsExt, UniqueValueSet};
pub use errors::ToolbeltError;
pub use hashing::combine_hashes;
pub use outcome::{Outcome, ValueOutcome};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}

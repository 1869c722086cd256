//! Sample payment gateway built on toolbelt outcomes.
//!
//! Demonstrates how a collaborator consumes the [`toolbelt`] contracts: a
//! third-party call that can fail for a known reason is wrapped so the known
//! reason comes back as an [`Outcome`](toolbelt::Outcome) carrying an
//! [`ErrorType`] member, while anything unexpected is still returned as an
//! error.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`error_type`] | [`ErrorType`] failure taxonomy |
//! | [`identifiers`] | [`CustomerName`], [`TransactionId`] |
//! | [`client`] | [`PaymentApi`] port, [`ThirdPartyApiClient`], [`ApiFault`] |
//! | [`gateway`] | [`PaymentGateway`], [`PaymentReceipt`] |

pub mod client;
pub mod error_type;
pub mod gateway;
pub mod identifiers;

pub use client::{ApiFault, PaymentApi, ThirdPartyApiClient};
pub use error_type::ErrorType;
pub use gateway::{anticipated, PaymentGateway, PaymentReceipt};
pub use identifiers::{CustomerName, TransactionId};

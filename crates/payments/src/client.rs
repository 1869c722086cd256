//! The third-party payment API and the faults it raises.
//!
//! [`PaymentApi`] is the port the gateway depends on; [`ThirdPartyApiClient`]
//! is the stand-in provider used by the sample. Faults are raw provider
//! conditions. Deciding which of them are *anticipated* belongs to
//! [`PaymentGateway`](crate::PaymentGateway), not to the client.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::CustomerName;

/// Conditions raised by a payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiFault {
    /// The provider refuses customer names that start with `x`.
    #[error("Payment refused: {message}")]
    NoXInName {
        /// Provider-supplied explanation.
        message: String,
    },

    /// The provider could not be reached or did not answer in time.
    #[error("Payment provider unavailable: {reason}")]
    Unavailable {
        /// Description of the transport problem.
        reason: String,
    },

    /// The provider answered with something the client cannot interpret.
    #[error("Unexpected provider response: {response}")]
    UnexpectedResponse {
        /// The raw response, or a summary of it.
        response: String,
    },
}

/// A payment provider.
pub trait PaymentApi {
    /// Charges `customer` for a payment dated `date`.
    fn do_payment(&self, date: DateTime<Utc>, customer: &CustomerName) -> Result<(), ApiFault>;
}

/// Sample provider client.
///
/// Accepts every payment except those for customer names starting with a
/// lowercase `x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThirdPartyApiClient;

impl ThirdPartyApiClient {
    /// Creates a client.
    pub fn new() -> Self {
        Self
    }
}

impl PaymentApi for ThirdPartyApiClient {
    fn do_payment(&self, date: DateTime<Utc>, customer: &CustomerName) -> Result<(), ApiFault> {
        tracing::debug!(customer = %customer, date = %date.to_rfc3339(), "Submitting payment");

        if customer.as_str().starts_with('x') {
            return Err(ApiFault::NoXInName {
                message: "name starts with x, not allowed".to_owned(),
            });
        }
        Ok(())
    }
}

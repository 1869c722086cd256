//! Payment gateway: turns anticipated provider faults into outcomes.
//!
//! The gateway knows exactly one translation table, [`anticipated`]. A fault
//! listed there becomes a failed [`Outcome`] with the matching [`ErrorType`];
//! every other fault is returned unchanged as `Err` for the caller to handle
//! or propagate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use toolbelt::{Outcome, ValueOutcome};

use crate::client::{ApiFault, PaymentApi, ThirdPartyApiClient};
use crate::{CustomerName, ErrorType, TransactionId};

/// Proof of an accepted payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Identifier assigned to the accepted payment.
    pub transaction_id: TransactionId,
    /// Customer the payment was made for.
    pub customer: CustomerName,
    /// Payment date as submitted.
    pub paid_at: DateTime<Utc>,
}

/// Maps a provider fault to the error kind it is anticipated as, if any.
pub fn anticipated(fault: &ApiFault) -> Option<ErrorType> {
    match fault {
        ApiFault::NoXInName { .. } => Some(ErrorType::NO_X_IN_NAME_ALLOWED),
        ApiFault::Unavailable { .. } | ApiFault::UnexpectedResponse { .. } => None,
    }
}

/// Submits payments through a [`PaymentApi`].
#[derive(Debug, Clone, Default)]
pub struct PaymentGateway<A = ThirdPartyApiClient> {
    api: A,
}

impl PaymentGateway<ThirdPartyApiClient> {
    /// A gateway backed by the sample [`ThirdPartyApiClient`].
    pub fn new() -> Self {
        Self::with_api(ThirdPartyApiClient::new())
    }
}

impl<A: PaymentApi> PaymentGateway<A> {
    /// A gateway backed by `api`.
    pub fn with_api(api: A) -> Self {
        Self { api }
    }

    /// Pays on behalf of `customer`.
    ///
    /// Returns a failed outcome for anticipated faults, and `Err` for any
    /// other provider fault.
    pub fn pay(
        &self,
        date: DateTime<Utc>,
        customer: &CustomerName,
    ) -> Result<Outcome<ErrorType>, ApiFault> {
        let span = tracing::info_span!("pay", customer = %customer);
        let _guard = span.enter();

        match self.submit(date, customer)? {
            None => {
                tracing::info!("Payment accepted");
                Ok(Outcome::succeed())
            }
            Some(error_kind) => Ok(Outcome::fail(error_kind)),
        }
    }

    /// Pays on behalf of `customer`, returning a receipt on success.
    ///
    /// Same failure contract as [`pay`](Self::pay).
    pub fn capture(
        &self,
        date: DateTime<Utc>,
        customer: &CustomerName,
    ) -> Result<ValueOutcome<PaymentReceipt, ErrorType>, ApiFault> {
        let span = tracing::info_span!("capture", customer = %customer);
        let _guard = span.enter();

        match self.submit(date, customer)? {
            None => {
                let receipt = PaymentReceipt {
                    transaction_id: TransactionId::new_random(),
                    customer: customer.clone(),
                    paid_at: date,
                };
                tracing::info!(transaction_id = %receipt.transaction_id, "Payment captured");
                Ok(ValueOutcome::succeed(receipt))
            }
            Some(error_kind) => Ok(ValueOutcome::fail(error_kind)),
        }
    }

    /// Calls the provider; `Ok(Some(_))` is an anticipated failure.
    fn submit(
        &self,
        date: DateTime<Utc>,
        customer: &CustomerName,
    ) -> Result<Option<ErrorType>, ApiFault> {
        match self.api.do_payment(date, customer) {
            Ok(()) => Ok(None),
            Err(fault) => match anticipated(&fault) {
                Some(error_kind) => {
                    tracing::warn!(
                        fault = %fault,
                        error_kind = %error_kind,
                        "Payment refused for an anticipated reason"
                    );
                    Ok(Some(error_kind))
                }
                None => {
                    tracing::error!(fault = %fault, "Unanticipated payment fault");
                    Err(fault)
                }
            },
        }
    }
}

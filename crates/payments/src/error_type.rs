//! Reasons a payment can be refused.

use toolbelt::{closed_set, Member};

/// Anticipated payment failure reasons.
///
/// Each member carries a `detail` note for operators in addition to its value
/// and display name.
#[derive(Debug, Clone)]
pub struct ErrorType {
    member: Member<i32>,
    detail: &'static str,
}

impl ErrorType {
    /// The payment store could not record the transaction.
    pub const DATABASE_CAN_CAUSE_A_LOT_OF_TROUBLE: Self = Self {
        member: Member::declare(1, "Database error of some sort"),
        detail: "retry later; the payment was not recorded",
    };

    /// The payment provider refuses customer names starting with `x`.
    pub const NO_X_IN_NAME_ALLOWED: Self = Self {
        member: Member::declare(2, "No X in Name Allowed"),
        detail: "ask the customer for a name that does not start with 'x'",
    };

    /// Operator-facing note on how to handle this failure.
    pub fn detail(&self) -> &'static str {
        self.detail
    }
}

closed_set! {
    impl ErrorType: i32 as member {
        DATABASE_CAN_CAUSE_A_LOT_OF_TROUBLE,
        NO_X_IN_NAME_ALLOWED,
    }
}

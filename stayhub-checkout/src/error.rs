/// Why a submission was refused before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRefusal {
    #[error("payment library has not loaded yet")]
    ProcessorNotLoaded,
    #[error("no card input is mounted")]
    MissingCard,
    #[error("card input is empty")]
    EmptyCard,
    #[error("no booking has been loaded")]
    NoBooking,
    #[error("no live payment intent is held")]
    NoLiveToken,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("Submission refused: {0}")]
    Refused(#[from] SubmitRefusal),

    #[error("Invalid booking: {0}")]
    InvalidBooking(String),

    #[error("Could not prepare payment: {0}")]
    TokenFetch(String),

    #[error("{0}")]
    Tokenization(String),

    #[error("{0}")]
    Confirmation(String),

    /// Money moved but the booking was not recorded. Needs reconciliation.
    #[error("Booking not recorded for transaction {transaction_id}: {reason}")]
    Persistence {
        transaction_id: String,
        reason: String,
    },
}

impl CheckoutError {
    /// The user may resubmit with the same live token.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CheckoutError::Tokenization(_) | CheckoutError::Confirmation(_)
        )
    }

    /// Text shown next to the card field, if any.
    pub fn inline_message(&self) -> Option<&str> {
        match self {
            CheckoutError::Tokenization(msg)
            | CheckoutError::Confirmation(msg)
            | CheckoutError::TokenFetch(msg) => Some(msg),
            CheckoutError::Refused(_)
            | CheckoutError::InvalidBooking(_)
            | CheckoutError::Persistence { .. } => None,
        }
    }
}

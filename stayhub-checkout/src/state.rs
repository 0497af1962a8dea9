use stayhub_core::{PaymentIntentToken, Price};

use crate::error::CheckoutError;

/// The one authoritative checkout state. The live payment intent token lives
/// inside the state that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    AwaitingToken {
        price: Price,
    },
    Ready {
        token: PaymentIntentToken,
        /// Inline message left by the previous failed attempt.
        notice: Option<String>,
    },
    Processing {
        token: PaymentIntentToken,
    },
    Succeeded {
        transaction_id: String,
    },
    Failed {
        error: CheckoutError,
    },
}

impl CheckoutState {
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::AwaitingToken { .. } => "awaiting_token",
            CheckoutState::Ready { .. } => "ready",
            CheckoutState::Processing { .. } => "processing",
            CheckoutState::Succeeded { .. } => "succeeded",
            CheckoutState::Failed { .. } => "failed",
        }
    }

    pub fn live_token(&self) -> Option<&PaymentIntentToken> {
        match self {
            CheckoutState::Ready { token, .. } | CheckoutState::Processing { token } => Some(token),
            _ => None,
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, CheckoutState::Processing { .. })
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stayhub_shared::Masked;
use std::fmt;

use crate::booking::Price;
use crate::identity::BillingDetails;

/// Client secret for one payment intent, tied to the price it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentToken {
    secret: Masked<String>,
    price: Price,
}

impl PaymentIntentToken {
    pub fn new(secret: impl Into<String>, price: Price) -> Self {
        Self {
            secret: Masked::new(secret.into()),
            price,
        }
    }

    pub fn client_secret(&self) -> &str {
        self.secret.expose()
    }

    pub fn price(&self) -> Price {
        self.price
    }
}

/// The card input mounted by the processor library. Card data never leaves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardElement {
    pub element_id: String,
    pub empty: bool,
}

impl CardElement {
    pub fn new(element_id: impl Into<String>, empty: bool) -> Self {
        Self {
            element_id: element_id.into(),
            empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }
}

/// Tokenized card reference returned by `create_payment_method`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodHandle(pub String);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
}

impl fmt::Display for PaymentIntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentIntentStatus::RequiresPaymentMethod => "requires_payment_method",
            PaymentIntentStatus::RequiresConfirmation => "requires_confirmation",
            PaymentIntentStatus::RequiresAction => "requires_action",
            PaymentIntentStatus::Processing => "processing",
            PaymentIntentStatus::RequiresCapture => "requires_capture",
            PaymentIntentStatus::Canceled => "canceled",
            PaymentIntentStatus::Succeeded => "succeeded",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String, // Provider's ID (e.g., pi_123)
    pub status: PaymentIntentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Succeeded { transaction_id: String },
    Failed { reason: String },
}

impl PaymentOutcome {
    /// Interpret what `confirm_card_payment` resolved with.
    pub fn from_confirmation(intent: Option<PaymentIntent>) -> Self {
        match intent {
            Some(intent) if intent.status == PaymentIntentStatus::Succeeded => {
                PaymentOutcome::Succeeded {
                    transaction_id: intent.id,
                }
            }
            Some(intent) => PaymentOutcome::Failed {
                reason: format!("Payment was not completed (status: {}).", intent.status),
            },
            None => PaymentOutcome::Failed {
                reason: "The payment processor returned no payment intent.".to_string(),
            },
        }
    }
}

/// Error object reported by the processor library (`{error: {message}}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ProcessorError {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

impl ProcessorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}

/// Client-side payment library (card element, tokenization, confirmation).
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Whether the library finished loading; nothing may be submitted before that.
    fn is_loaded(&self) -> bool;

    /// Tokenize the card currently held by `card`.
    async fn create_payment_method(
        &self,
        card: &CardElement,
    ) -> Result<PaymentMethodHandle, ProcessorError>;

    /// Confirm the intent behind `token`. May suspend on out-of-band authentication
    /// (3-D Secure) before resolving.
    async fn confirm_card_payment(
        &self,
        token: &PaymentIntentToken,
        payment_method: &PaymentMethodHandle,
        billing: &BillingDetails,
    ) -> Result<Option<PaymentIntent>, ProcessorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_secret_not_in_debug() {
        let token = PaymentIntentToken::new("pi_1_secret_2", Price::from_major(100));
        let debug = format!("{:?}", token);
        assert!(!debug.contains("pi_1_secret_2"));
        assert_eq!(token.client_secret(), "pi_1_secret_2");
    }

    #[test]
    fn test_outcome_from_confirmation() {
        let ok = PaymentOutcome::from_confirmation(Some(PaymentIntent {
            id: "pi_9".to_string(),
            status: PaymentIntentStatus::Succeeded,
        }));
        assert_eq!(
            ok,
            PaymentOutcome::Succeeded {
                transaction_id: "pi_9".to_string()
            }
        );

        let pending = PaymentOutcome::from_confirmation(Some(PaymentIntent {
            id: "pi_9".to_string(),
            status: PaymentIntentStatus::RequiresAction,
        }));
        assert!(matches!(
            pending,
            PaymentOutcome::Failed { reason } if reason.contains("requires_action")
        ));

        assert!(matches!(
            PaymentOutcome::from_confirmation(None),
            PaymentOutcome::Failed { .. }
        ));
    }

    #[test]
    fn test_status_wire_names() {
        let status: PaymentIntentStatus = serde_json::from_str("\"requires_action\"").unwrap();
        assert_eq!(status, PaymentIntentStatus::RequiresAction);
        assert_eq!(
            serde_json::to_string(&PaymentIntentStatus::Succeeded).unwrap(),
            "\"succeeded\""
        );
    }
}

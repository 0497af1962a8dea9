use chrono::Utc;
use stayhub_core::{
    BookingBackend, BookingRequest, CardElement, Identity, PaymentIntentToken, PaymentOutcome,
    PaymentProcessor, PersistedBooking, Route,
};
use stayhub_shared::mask_email;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::{CheckoutError, SubmitRefusal};
use crate::state::CheckoutState;
use crate::ui::{CheckoutUi, CheckoutView};

/// Result of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingReceipt {
    pub transaction_id: String,
    pub booking_id: String,
}

/// Drives one booking payment from the card form to a stored booking.
///
/// Every operation takes `&mut self`, so at most one network step is in flight
/// per session and a newer token request always replaces the older one.
pub struct CheckoutOrchestrator {
    processor: Arc<dyn PaymentProcessor>,
    backend: Arc<dyn BookingBackend>,
    ui: Arc<dyn CheckoutUi>,
    identity: Identity,
    booking: Option<BookingRequest>,
    state: CheckoutState,
}

impl CheckoutOrchestrator {
    pub fn new(
        processor: Arc<dyn PaymentProcessor>,
        backend: Arc<dyn BookingBackend>,
        ui: Arc<dyn CheckoutUi>,
        identity: Identity,
    ) -> Self {
        Self {
            processor,
            backend,
            ui,
            identity,
            booking: None,
            state: CheckoutState::Idle,
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn booking(&self) -> Option<&BookingRequest> {
        self.booking.as_ref()
    }

    /// Accept a booking and make sure a client secret for its price is held.
    ///
    /// A token is never shared between bookings. Reloading the booking that
    /// owns the live token keeps it, anything else fetches a new one.
    pub async fn load_booking(&mut self, request: BookingRequest) -> Result<(), CheckoutError> {
        if !request.price.is_positive() {
            warn!(
                room_id = %request.room_id,
                price = %request.price,
                "Ignoring booking with non-positive price"
            );
            self.booking = None;
            self.transition(CheckoutState::Idle);
            return Err(CheckoutError::InvalidBooking(format!(
                "price must be positive, got {}",
                request.price
            )));
        }

        let price = request.price;
        let same_booking = self.booking.as_ref() == Some(&request);
        self.booking = Some(request);

        if let CheckoutState::Ready { token, .. } = &self.state {
            if same_booking && token.price() == price {
                debug!(%price, "Keeping live payment intent");
                return Ok(());
            }
        }

        self.transition(CheckoutState::AwaitingToken { price });

        let fetched = self.backend.create_payment_intent(price).await;
        match fetched {
            Ok(token) => {
                info!(%price, "Payment intent ready");
                self.transition(CheckoutState::Ready {
                    token,
                    notice: None,
                });
                Ok(())
            }
            Err(e) => {
                warn!(%price, "Failed to create payment intent: {}", e);
                let err = CheckoutError::TokenFetch(e.to_string());
                self.transition(CheckoutState::Failed { error: err.clone() });
                Err(err)
            }
        }
    }

    /// Pay for the loaded booking with the card held by `card`.
    pub async fn submit(
        &mut self,
        card: Option<&CardElement>,
    ) -> Result<BookingReceipt, CheckoutError> {
        let (card, token, booking) = self.check_preconditions(card)?;

        info!(
            room_id = %booking.room_id,
            guest = %mask_email(&booking.guest_email),
            price = %booking.price,
            "Submitting payment"
        );
        self.transition(CheckoutState::Processing {
            token: token.clone(),
        });

        // 1. Tokenize
        let tokenized = self.processor.create_payment_method(card).await;
        let payment_method = match tokenized {
            Ok(pm) => pm,
            Err(e) => {
                return Err(self.fail_retryable(CheckoutError::Tokenization(e.message), token));
            }
        };

        // 2. Confirm
        let billing = self.identity.billing_details();
        let confirmation = self
            .processor
            .confirm_card_payment(&token, &payment_method, &billing)
            .await;

        let transaction_id = match confirmation {
            Err(e) => {
                return Err(self.fail_retryable(CheckoutError::Confirmation(e.message), token));
            }
            Ok(intent) => match PaymentOutcome::from_confirmation(intent) {
                PaymentOutcome::Succeeded { transaction_id } => transaction_id,
                PaymentOutcome::Failed { reason } => {
                    return Err(self.fail_retryable(CheckoutError::Confirmation(reason), token))
                }
            },
        };
        info!(%transaction_id, "Payment confirmed");

        // 3. Persist. The intent is spent from here on.
        let persisted = self.persist(booking, &transaction_id).await;
        let booking_id = match persisted {
            Ok(id) => id,
            Err(e) => {
                error!(%transaction_id, "Payment captured but booking was not recorded: {}", e);
                self.booking = None;
                self.transition(CheckoutState::Failed { error: e.clone() });
                return Err(e);
            }
        };

        self.transition(CheckoutState::Succeeded {
            transaction_id: transaction_id.clone(),
        });
        self.ui.toast_success(&format!(
            "Booking Successful!, TransactionId: {}",
            transaction_id
        ));
        self.ui.navigate(&Route::MyBookings);
        self.ui.close();

        self.booking = None;
        self.transition(CheckoutState::Idle);

        info!(%transaction_id, %booking_id, "Booking confirmed");
        Ok(BookingReceipt {
            transaction_id,
            booking_id,
        })
    }

    /// Close the modal and drop the live token.
    pub fn cancel(&mut self) {
        if self.state.is_processing() {
            warn!("Cancel ignored while a payment is processing");
            return;
        }
        self.booking = None;
        self.transition(CheckoutState::Idle);
        self.ui.close();
    }

    pub fn view(&self) -> CheckoutView {
        let submit_label = match &self.booking {
            Some(booking) => format!("Pay {}", booking.price),
            None => "Pay".to_string(),
        };
        let error = match &self.state {
            CheckoutState::Ready { notice, .. } => notice.clone(),
            CheckoutState::Failed { error } => error.inline_message().map(str::to_string),
            _ => None,
        };
        let processing = self.state.is_processing();

        CheckoutView {
            submit_label,
            processing,
            error,
            submit_enabled: self.processor.is_loaded()
                && matches!(self.state, CheckoutState::Ready { .. }),
            cancel_enabled: !processing,
        }
    }

    fn check_preconditions<'c>(
        &self,
        card: Option<&'c CardElement>,
    ) -> Result<(&'c CardElement, PaymentIntentToken, BookingRequest), CheckoutError> {
        if !self.processor.is_loaded() {
            return Err(SubmitRefusal::ProcessorNotLoaded.into());
        }
        let card = card.ok_or(SubmitRefusal::MissingCard)?;
        if card.is_empty() {
            return Err(SubmitRefusal::EmptyCard.into());
        }
        let booking = self.booking.clone().ok_or(SubmitRefusal::NoBooking)?;
        let token = match &self.state {
            CheckoutState::Ready { token, .. } if token.price() == booking.price => token.clone(),
            _ => return Err(SubmitRefusal::NoLiveToken.into()),
        };
        Ok((card, token, booking))
    }

    async fn persist(
        &self,
        booking: BookingRequest,
        transaction_id: &str,
    ) -> Result<String, CheckoutError> {
        let persistence = |reason: String| CheckoutError::Persistence {
            transaction_id: transaction_id.to_string(),
            reason,
        };

        let room_id = booking.room_id.clone();
        let payload = PersistedBooking::new(booking, transaction_id.to_string(), Utc::now());

        let inserted = self
            .backend
            .insert_booking(&payload)
            .await
            .map_err(|e| persistence(e.to_string()))?;
        let booking_id = inserted
            .inserted_id
            .ok_or_else(|| persistence("backend returned no inserted id".to_string()))?;

        match self.backend.set_room_booked(&room_id, true).await {
            Ok(true) => Ok(booking_id),
            Ok(false) => Err(persistence(format!(
                "status update for room {} was not acknowledged",
                room_id
            ))),
            Err(e) => Err(persistence(e.to_string())),
        }
    }

    /// Processing -> Failed -> Ready, keeping the token for a resubmission.
    fn fail_retryable(&mut self, err: CheckoutError, token: PaymentIntentToken) -> CheckoutError {
        warn!("Payment attempt failed: {}", err);
        self.transition(CheckoutState::Failed { error: err.clone() });
        self.transition(CheckoutState::Ready {
            token,
            notice: err.inline_message().map(str::to_string),
        });
        err
    }

    fn transition(&mut self, next: CheckoutState) {
        debug!(from = self.state.name(), to = next.name(), "Checkout transition");
        self.state = next;
        self.ui.state_changed(&self.state);
    }
}

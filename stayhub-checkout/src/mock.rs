//! Scriptable collaborators for exercising checkout without a real processor or backend.
//!
//! Each mock answers from a queue of scripted results and falls back to a
//! successful default when the queue is empty. Every call is recorded.

use async_trait::async_trait;
use stayhub_core::{
    BillingDetails, BookingBackend, CardElement, CoreError, CoreResult, InsertOutcome, Notifier,
    PaymentIntent, PaymentIntentStatus, PaymentIntentToken, PaymentMethodHandle,
    PaymentProcessor, PersistedBooking, Price, ProcessorError, Route,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::state::CheckoutState;
use crate::ui::CheckoutUi;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorCall {
    CreatePaymentMethod {
        element_id: String,
    },
    ConfirmCardPayment {
        client_secret: String,
        payment_method: PaymentMethodHandle,
        billing: BillingDetails,
    },
}

pub struct MockPaymentProcessor {
    loaded: AtomicBool,
    counter: AtomicUsize,
    tokenize: Mutex<VecDeque<Result<PaymentMethodHandle, ProcessorError>>>,
    confirm: Mutex<VecDeque<Result<Option<PaymentIntent>, ProcessorError>>>,
    calls: Mutex<Vec<ProcessorCall>>,
}

impl MockPaymentProcessor {
    pub fn new() -> Self {
        Self {
            loaded: AtomicBool::new(true),
            counter: AtomicUsize::new(0),
            tokenize: Mutex::new(VecDeque::new()),
            confirm: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_loaded(&self, loaded: bool) {
        self.loaded.store(loaded, Ordering::SeqCst);
    }

    pub fn fail_next_tokenize(&self, message: &str) {
        lock(&self.tokenize).push_back(Err(ProcessorError::new(message)));
    }

    pub fn fail_next_confirm(&self, message: &str) {
        lock(&self.confirm).push_back(Err(ProcessorError::new(message)));
    }

    /// Script the next confirmation, e.g. an intent that is not `succeeded`.
    pub fn next_confirm(&self, result: Result<Option<PaymentIntent>, ProcessorError>) {
        lock(&self.confirm).push_back(result);
    }

    pub fn calls(&self) -> Vec<ProcessorCall> {
        lock(&self.calls).clone()
    }

    pub fn confirm_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ProcessorCall::ConfirmCardPayment { .. }))
            .count()
    }

    fn next_id(&self) -> usize {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Default for MockPaymentProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentProcessor for MockPaymentProcessor {
    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    async fn create_payment_method(
        &self,
        card: &CardElement,
    ) -> Result<PaymentMethodHandle, ProcessorError> {
        lock(&self.calls).push(ProcessorCall::CreatePaymentMethod {
            element_id: card.element_id.clone(),
        });
        let scripted = lock(&self.tokenize).pop_front();
        scripted.unwrap_or_else(|| Ok(PaymentMethodHandle(format!("pm_mock_{}", self.next_id()))))
    }

    async fn confirm_card_payment(
        &self,
        token: &PaymentIntentToken,
        payment_method: &PaymentMethodHandle,
        billing: &BillingDetails,
    ) -> Result<Option<PaymentIntent>, ProcessorError> {
        lock(&self.calls).push(ProcessorCall::ConfirmCardPayment {
            client_secret: token.client_secret().to_string(),
            payment_method: payment_method.clone(),
            billing: billing.clone(),
        });
        let scripted = lock(&self.confirm).pop_front();
        scripted.unwrap_or_else(|| {
            Ok(Some(PaymentIntent {
                id: format!("pi_mock_{}", self.next_id()),
                status: PaymentIntentStatus::Succeeded,
            }))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    CreatePaymentIntent(Price),
    InsertBooking(Box<PersistedBooking>),
    SetRoomBooked { room_id: String, booked: bool },
}

pub struct MockBookingBackend {
    counter: AtomicUsize,
    intents: Mutex<VecDeque<CoreResult<()>>>,
    inserts: Mutex<VecDeque<CoreResult<InsertOutcome>>>,
    status_updates: Mutex<VecDeque<CoreResult<bool>>>,
    calls: Mutex<Vec<BackendCall>>,
}

impl MockBookingBackend {
    pub fn new() -> Self {
        Self {
            counter: AtomicUsize::new(0),
            intents: Mutex::new(VecDeque::new()),
            inserts: Mutex::new(VecDeque::new()),
            status_updates: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_next_payment_intent(&self, message: &str) {
        lock(&self.intents).push_back(Err(CoreError::BackendError(message.to_string())));
    }

    pub fn next_insert(&self, result: CoreResult<InsertOutcome>) {
        lock(&self.inserts).push_back(result);
    }

    pub fn next_status_update(&self, result: CoreResult<bool>) {
        lock(&self.status_updates).push_back(result);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        lock(&self.calls).clone()
    }

    /// Persistence calls only (inserts and status updates).
    pub fn persistence_calls(&self) -> Vec<BackendCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, BackendCall::CreatePaymentIntent(_)))
            .collect()
    }

    fn next_id(&self) -> usize {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Default for MockBookingBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingBackend for MockBookingBackend {
    async fn create_payment_intent(&self, price: Price) -> CoreResult<PaymentIntentToken> {
        lock(&self.calls).push(BackendCall::CreatePaymentIntent(price));
        let scripted = lock(&self.intents).pop_front();
        scripted.unwrap_or(Ok(()))?;
        Ok(PaymentIntentToken::new(
            format!("pi_{}_secret_{}", self.next_id(), price.minor_units()),
            price,
        ))
    }

    async fn insert_booking(&self, booking: &PersistedBooking) -> CoreResult<InsertOutcome> {
        lock(&self.calls).push(BackendCall::InsertBooking(Box::new(booking.clone())));
        let scripted = lock(&self.inserts).pop_front();
        scripted.unwrap_or_else(|| {
            Ok(InsertOutcome {
                inserted_id: Some(format!("booking-{}", self.next_id())),
            })
        })
    }

    async fn set_room_booked(&self, room_id: &str, booked: bool) -> CoreResult<bool> {
        lock(&self.calls).push(BackendCall::SetRoomBooked {
            room_id: room_id.to_string(),
            booked,
        });
        let scripted = lock(&self.status_updates).pop_front();
        scripted.unwrap_or(Ok(true))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Toast(String),
    Navigate(Route),
    Close,
}

/// Checkout UI that records what the user would have seen.
pub struct RecordingUi {
    events: Mutex<Vec<UiEvent>>,
    states: Mutex<Vec<CheckoutState>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            states: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<UiEvent> {
        lock(&self.events).clone()
    }

    pub fn states(&self) -> Vec<CheckoutState> {
        lock(&self.states).clone()
    }

    /// Names of every state entered, in order.
    pub fn state_names(&self) -> Vec<&'static str> {
        lock(&self.states).iter().map(CheckoutState::name).collect()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Toast(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<Route> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Navigate(route) => Some(route),
                _ => None,
            })
            .collect()
    }

    pub fn closed(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, UiEvent::Close))
            .count()
    }
}

impl Default for RecordingUi {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for RecordingUi {
    fn toast_success(&self, message: &str) {
        lock(&self.events).push(UiEvent::Toast(message.to_string()));
    }

    fn navigate(&self, route: &Route) {
        lock(&self.events).push(UiEvent::Navigate(route.clone()));
    }
}

impl CheckoutUi for RecordingUi {
    fn close(&self) {
        lock(&self.events).push(UiEvent::Close);
    }

    fn state_changed(&self, state: &CheckoutState) {
        lock(&self.states).push(state.clone());
    }
}

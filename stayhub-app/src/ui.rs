use stayhub_checkout::{CheckoutState, CheckoutUi};
use stayhub_core::{Notifier, Route};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

/// Headless UI boundary: toasts and navigation go to the log, and the
/// navigation history is kept for inspection.
#[derive(Default)]
pub struct LoggingUi {
    history: Mutex<Vec<Route>>,
    toasts: Mutex<Vec<String>>,
    modal_open: Mutex<bool>,
}

impl LoggingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_modal(&self) {
        *self.modal_open.lock().unwrap_or_else(PoisonError::into_inner) = true;
    }

    pub fn modal_open(&self) -> bool {
        *self.modal_open.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current_route(&self) -> Option<Route> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for LoggingUi {
    fn toast_success(&self, message: &str) {
        info!(toast = message, "Success");
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }

    fn navigate(&self, route: &Route) {
        info!(%route, "Navigate");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route.clone());
    }
}

impl CheckoutUi for LoggingUi {
    fn close(&self) {
        debug!("Checkout modal closed");
        *self.modal_open.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }

    fn state_changed(&self, state: &CheckoutState) {
        debug!(state = state.name(), "Checkout state");
    }
}

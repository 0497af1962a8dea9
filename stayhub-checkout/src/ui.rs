use stayhub_core::Notifier;

use crate::state::CheckoutState;

/// The checkout modal as seen from the flow.
pub trait CheckoutUi: Notifier {
    /// Close the checkout modal.
    fn close(&self);

    fn state_changed(&self, _state: &CheckoutState) {}
}

/// What the checkout form renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutView {
    pub submit_label: String,
    pub processing: bool,
    pub error: Option<String>,
    pub submit_enabled: bool,
    pub cancel_enabled: bool,
}

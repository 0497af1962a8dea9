pub mod error;
pub mod mock;
pub mod orchestrator;
pub mod state;
pub mod ui;

pub use error::{CheckoutError, SubmitRefusal};
pub use orchestrator::{BookingReceipt, CheckoutOrchestrator};
pub use state::CheckoutState;
pub use ui::{CheckoutUi, CheckoutView};

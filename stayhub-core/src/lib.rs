pub mod booking;
pub mod identity;
pub mod payment;
pub mod repository;
pub mod room;
pub mod route;
pub mod ui;

pub use booking::{BookingRequest, DateRange, InsertOutcome, PersistedBooking, Price};
pub use identity::{BillingDetails, Identity};
pub use payment::{
    CardElement, PaymentIntent, PaymentIntentStatus, PaymentIntentToken, PaymentMethodHandle,
    PaymentOutcome, PaymentProcessor, ProcessorError,
};
pub use repository::{BookingBackend, BookingHistory, ImageHost, RoomRepository};
pub use room::{Host, ImageUpload, NewRoom, Room};
pub use route::Route;
pub use ui::Notifier;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Backend request failed: {0}")]
    BackendError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Image upload failed: {0}")]
    UploadError(String),
    #[error("Identity verification failed: {0}")]
    IdentityError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

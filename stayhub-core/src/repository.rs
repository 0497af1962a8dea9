use async_trait::async_trait;

use crate::booking::{InsertOutcome, PersistedBooking, Price};
use crate::payment::PaymentIntentToken;
use crate::room::{ImageUpload, NewRoom, Room};
use crate::CoreResult;

/// Backend calls the checkout flow depends on
#[async_trait]
pub trait BookingBackend: Send + Sync {
    /// Ask the backend for a fresh client secret for `price`.
    async fn create_payment_intent(&self, price: Price) -> CoreResult<PaymentIntentToken>;

    async fn insert_booking(&self, booking: &PersistedBooking) -> CoreResult<InsertOutcome>;

    /// Persist the room's booked flag. Returns whether the backend acknowledged it.
    async fn set_room_booked(&self, room_id: &str, booked: bool) -> CoreResult<bool>;
}

/// Read side of bookings, keyed by guest or host email
#[async_trait]
pub trait BookingHistory: Send + Sync {
    async fn guest_bookings(&self, email: &str) -> CoreResult<Vec<PersistedBooking>>;

    async fn host_bookings(&self, email: &str) -> CoreResult<Vec<PersistedBooking>>;
}

/// Repository trait for room listings
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn add_room(&self, room: &NewRoom) -> CoreResult<InsertOutcome>;

    async fn all_rooms(&self) -> CoreResult<Vec<Room>>;

    async fn get_room(&self, id: &str) -> CoreResult<Option<Room>>;

    async fn host_rooms(&self, email: &str) -> CoreResult<Vec<Room>>;
}

/// Image hosting endpoint. Returns the public display URL.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, image: &ImageUpload) -> CoreResult<String>;
}

use stayhub_core::{BookingHistory, Identity, PersistedBooking, Room, RoomRepository};
use std::sync::Arc;

use crate::CatalogResult;

/// Dashboard pages, keyed by the signed-in user's email.
pub struct Dashboard {
    rooms: Arc<dyn RoomRepository>,
    bookings: Arc<dyn BookingHistory>,
    identity: Identity,
}

impl Dashboard {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        bookings: Arc<dyn BookingHistory>,
        identity: Identity,
    ) -> Self {
        Self {
            rooms,
            bookings,
            identity,
        }
    }

    /// Bookings made by this user as a guest.
    pub async fn my_bookings(&self) -> CatalogResult<Vec<PersistedBooking>> {
        let email = self.identity.require_email()?;
        Ok(self.bookings.guest_bookings(email).await?)
    }

    /// Rooms this user hosts.
    pub async fn my_listings(&self) -> CatalogResult<Vec<Room>> {
        let email = self.identity.require_email()?;
        Ok(self.rooms.host_rooms(email).await?)
    }

    /// Bookings guests made on this user's rooms.
    pub async fn manage_bookings(&self) -> CatalogResult<Vec<PersistedBooking>> {
        let email = self.identity.require_email()?;
        Ok(self.bookings.host_bookings(email).await?)
    }
}

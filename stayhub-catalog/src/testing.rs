use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use stayhub_core::{
    BookingHistory, CoreError, CoreResult, DateRange, Host, ImageHost, ImageUpload, InsertOutcome,
    NewRoom, Notifier, PersistedBooking, Price, Room, RoomRepository, Route,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub fn dates() -> DateRange {
    DateRange::new(
        Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 11, 8, 0, 0, 0).unwrap(),
    )
    .unwrap()
}

pub fn room(id: &str, category: &str, host_email: &str) -> Room {
    Room {
        id: id.to_string(),
        details: NewRoom {
            location: "Cox's Bazar".to_string(),
            title: format!("Room {}", id),
            from: dates().from,
            to: dates().to,
            price: Price::from_major(120),
            guests: 2,
            bedrooms: 1,
            bathrooms: 1,
            category: category.to_string(),
            description: "Sea view".to_string(),
            image: format!("https://i.ibb.co/{}.jpg", id),
            host: Host {
                name: Some("Host".to_string()),
                image: None,
                email: Some(host_email.to_string()),
            },
        },
        booked: false,
    }
}

#[derive(Default)]
pub struct FakeRooms {
    pub rooms: Mutex<Vec<Room>>,
    pub added: Mutex<Vec<NewRoom>>,
    pub fail_add: AtomicBool,
}

impl FakeRooms {
    pub fn with(rooms: Vec<Room>) -> Self {
        Self {
            rooms: Mutex::new(rooms),
            ..Default::default()
        }
    }
}

#[async_trait]
impl RoomRepository for FakeRooms {
    async fn add_room(&self, room: &NewRoom) -> CoreResult<InsertOutcome> {
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(CoreError::BackendError("insert failed".to_string()));
        }
        let mut added = self.added.lock().unwrap();
        added.push(room.clone());
        Ok(InsertOutcome {
            inserted_id: Some(format!("room-{}", added.len())),
        })
    }

    async fn all_rooms(&self) -> CoreResult<Vec<Room>> {
        Ok(self.rooms.lock().unwrap().clone())
    }

    async fn get_room(&self, id: &str) -> CoreResult<Option<Room>> {
        Ok(self.rooms.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn host_rooms(&self, email: &str) -> CoreResult<Vec<Room>> {
        Ok(self
            .rooms
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.details.host.email.as_deref() == Some(email))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct FakeImageHost {
    pub fail: AtomicBool,
    pub uploads: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageHost for FakeImageHost {
    async fn upload(&self, image: &ImageUpload) -> CoreResult<String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CoreError::UploadError("413 Payload Too Large".to_string()));
        }
        self.uploads.lock().unwrap().push(image.file_name.clone());
        Ok(format!("https://i.ibb.co/hosted/{}", image.file_name))
    }
}

#[derive(Default)]
pub struct FakeBookings {
    pub by_guest: Mutex<Vec<(String, PersistedBooking)>>,
    pub by_host: Mutex<Vec<(String, PersistedBooking)>>,
}

#[async_trait]
impl BookingHistory for FakeBookings {
    async fn guest_bookings(&self, email: &str) -> CoreResult<Vec<PersistedBooking>> {
        Ok(filter(&self.by_guest, email))
    }

    async fn host_bookings(&self, email: &str) -> CoreResult<Vec<PersistedBooking>> {
        Ok(filter(&self.by_host, email))
    }
}

fn filter(entries: &Mutex<Vec<(String, PersistedBooking)>>, email: &str) -> Vec<PersistedBooking> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|(key, _)| key == email)
        .map(|(_, b)| b.clone())
        .collect()
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub toasts: Mutex<Vec<String>>,
    pub routes: Mutex<Vec<Route>>,
}

impl Notifier for RecordingNotifier {
    fn toast_success(&self, message: &str) {
        self.toasts.lock().unwrap().push(message.to_string());
    }

    fn navigate(&self, route: &Route) {
        self.routes.lock().unwrap().push(route.clone());
    }
}

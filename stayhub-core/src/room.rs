use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::Price;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub name: Option<String>,
    pub image: Option<String>,
    pub email: Option<String>,
}

/// A room listing as submitted by a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoom {
    pub location: String,
    pub title: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub price: Price,
    pub guests: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub category: String,
    pub description: String,
    pub image: String,
    pub host: Host,
}

/// A stored room listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub details: NewRoom,
    #[serde(default)]
    pub booked: bool,
}

impl Room {
    pub fn is_available(&self) -> bool {
        !self.booked
    }
}

/// An image picked in the add-room form, before upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

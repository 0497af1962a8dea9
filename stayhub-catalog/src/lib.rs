pub mod browse;
pub mod dashboard;
pub mod listing;
pub mod room;

#[cfg(test)]
pub(crate) mod testing;

pub use browse::RoomCatalog;
pub use dashboard::Dashboard;
pub use listing::AddRoomFlow;
pub use room::{parse_price, NewRoomForm};

use stayhub_core::CoreError;

/// Catalog-related errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid room form: {0}")]
    InvalidForm(String),

    #[error("Room not found: {0}")]
    NotFound(String),

    #[error("Image upload failed: {0}")]
    UploadFailed(String),

    #[error("Room was not saved: {0}")]
    SaveFailed(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

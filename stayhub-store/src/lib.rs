pub mod api_client;
pub mod app_config;
pub mod image_host;

pub use api_client::ApiClient;
pub use image_host::ImgbbClient;

use stayhub_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unauthorized ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::Unauthorized { .. } => CoreError::Unauthorized(message),
            StoreError::Api { status: 404, .. } => CoreError::NotFound(message),
            _ => CoreError::BackendError(message),
        }
    }
}

use stayhub_catalog::{AddRoomFlow, Dashboard, RoomCatalog};
use stayhub_checkout::CheckoutOrchestrator;
use stayhub_core::{Identity, ImageHost, PaymentProcessor, Route};
use stayhub_store::app_config::Config;
use stayhub_store::{ApiClient, ImgbbClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::error::AppError;
use crate::ui::LoggingUi;

/// Wiring shared by every page: backend clients, the UI boundary and the
/// signed-in user, if any.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ApiClient>,
    pub images: Arc<dyn ImageHost>,
    pub ui: Arc<LoggingUi>,
    pub identity: Option<Identity>,
}

impl AppState {
    /// Build from the layered configuration files and environment.
    pub fn from_environment() -> Result<Self, AppError> {
        let config = Config::load()?;
        info!("Using backend at {}", config.api.base_url);
        Self::from_config(&config)
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let api = ApiClient::new(&config.api)?;
        let images = ImgbbClient::new(
            &config.image_host,
            Duration::from_secs(config.api.timeout_seconds),
        )?;
        Ok(Self {
            api: Arc::new(api),
            images: Arc::new(images),
            ui: Arc::new(LoggingUi::new()),
            identity: None,
        })
    }

    /// Attach the signed-in user and the access token issued for them.
    pub fn sign_in(mut self, identity: Identity, access_token: impl Into<String>) -> Self {
        info!(user = ?identity.email.as_deref().map(stayhub_shared::mask_email), "Signed in");
        let api = self.api.as_ref().clone().with_access_token(access_token);
        self.api = Arc::new(api);
        self.identity = Some(identity);
        self
    }

    fn signed_in(&self, route: Route) -> Result<Identity, AppError> {
        self.identity
            .clone()
            .ok_or(AppError::SignInRequired(route))
    }

    pub fn catalog(&self) -> RoomCatalog {
        RoomCatalog::new(self.api.clone())
    }

    /// Checkout lives on the room details page, which is private.
    pub fn checkout(
        &self,
        room_id: &str,
        processor: Arc<dyn PaymentProcessor>,
    ) -> Result<CheckoutOrchestrator, AppError> {
        let identity = self.signed_in(Route::RoomDetails(room_id.to_string()))?;
        self.ui.open_modal();
        Ok(CheckoutOrchestrator::new(
            processor,
            self.api.clone(),
            self.ui.clone(),
            identity,
        ))
    }

    pub fn add_room_flow(&self) -> Result<AddRoomFlow, AppError> {
        let host = self.signed_in(Route::AddRoom)?;
        Ok(AddRoomFlow::new(
            self.api.clone(),
            self.images.clone(),
            self.ui.clone(),
            host,
        ))
    }

    pub fn dashboard(&self) -> Result<Dashboard, AppError> {
        let identity = self.signed_in(Route::Dashboard)?;
        Ok(Dashboard::new(self.api.clone(), self.api.clone(), identity))
    }
}

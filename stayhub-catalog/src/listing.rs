use stayhub_core::{Identity, ImageHost, Notifier, RoomRepository, Route};
use stayhub_shared::mask_email;
use std::sync::Arc;
use tracing::{error, info};

use crate::room::NewRoomForm;
use crate::{CatalogError, CatalogResult};

const UPLOAD_IMAGE: &str = "Upload Image";
const UPLOADING: &str = "Uploading";
const UPLOADED: &str = "Uploaded Successfully!";

/// Host dashboard "add room" flow: upload the image, then save the room.
pub struct AddRoomFlow {
    rooms: Arc<dyn RoomRepository>,
    images: Arc<dyn ImageHost>,
    notifier: Arc<dyn Notifier>,
    host: Identity,
    loading: bool,
    upload_label: String,
}

impl AddRoomFlow {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        images: Arc<dyn ImageHost>,
        notifier: Arc<dyn Notifier>,
        host: Identity,
    ) -> Self {
        Self {
            rooms,
            images,
            notifier,
            host,
            loading: false,
            upload_label: UPLOAD_IMAGE.to_string(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn upload_label(&self) -> &str {
        &self.upload_label
    }

    /// Show the picked file name on the upload button.
    pub fn image_selected(&mut self, file_name: &str) {
        self.upload_label = file_name.to_string();
    }

    /// Returns the id of the stored room.
    pub async fn submit(&mut self, form: NewRoomForm) -> CatalogResult<String> {
        let price = form.validate()?;

        self.loading = true;
        self.upload_label = UPLOADING.to_string();

        let result = self.upload_and_save(form, price).await;
        self.loading = false;

        match result {
            Ok(room_id) => {
                self.upload_label = UPLOADED.to_string();
                self.notifier.toast_success("Room added successfully!!");
                self.notifier.navigate(&Route::MyListings);
                Ok(room_id)
            }
            Err(e) => {
                error!("Failed to add room: {}", e);
                self.upload_label = UPLOAD_IMAGE.to_string();
                Err(e)
            }
        }
    }

    async fn upload_and_save(
        &self,
        form: NewRoomForm,
        price: stayhub_core::Price,
    ) -> CatalogResult<String> {
        let image_url = self
            .images
            .upload(&form.image)
            .await
            .map_err(|e| CatalogError::UploadFailed(e.to_string()))?;
        info!(%image_url, "Room image uploaded");

        let room = form.into_room(price, image_url, &self.host);
        let inserted = self
            .rooms
            .add_room(&room)
            .await
            .map_err(|e| CatalogError::SaveFailed(e.to_string()))?;
        let room_id = inserted.inserted_id.ok_or_else(|| {
            CatalogError::SaveFailed("backend returned no inserted id".to_string())
        })?;

        info!(
            %room_id,
            host = %room.host.email.as_deref().map(mask_email).unwrap_or_default(),
            "Room listed"
        );
        Ok(room_id)
    }
}

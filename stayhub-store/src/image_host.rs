use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use stayhub_core::{CoreError, CoreResult, ImageHost, ImageUpload};
use stayhub_shared::Masked;
use std::time::Duration;
use tracing::info;

use crate::app_config::ImageHostConfig;
use crate::StoreError;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: UploadData,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    display_url: String,
}

/// imgbb-compatible image upload endpoint.
pub struct ImgbbClient {
    client: reqwest::Client,
    upload_url: String,
    api_key: Masked<String>,
}

impl ImgbbClient {
    pub fn new(config: &ImageHostConfig, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            upload_url: config.upload_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn post(&self, image: &ImageUpload) -> Result<String, StoreError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(&self.upload_url)
            .query(&[("key", self.api_key.expose())])
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api { status, body });
        }

        let uploaded: UploadResponse = response.json().await?;
        Ok(uploaded.data.display_url)
    }
}

#[async_trait]
impl ImageHost for ImgbbClient {
    async fn upload(&self, image: &ImageUpload) -> CoreResult<String> {
        let url = self
            .post(image)
            .await
            .map_err(|e| CoreError::UploadError(e.to_string()))?;
        info!(file = %image.file_name, %url, "Image uploaded");
        Ok(url)
    }
}

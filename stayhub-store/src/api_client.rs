//! Backend REST API client.
//!
//! Implements the booking, booking history and room repository contracts
//! over JSON/HTTP. Every call carries the bearer access token when one is set.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use stayhub_core::{
    BookingBackend, BookingHistory, CoreResult, InsertOutcome, NewRoom, PaymentIntentToken,
    PersistedBooking, Price, Room, RoomRepository,
};
use stayhub_shared::Masked;
use std::time::Duration;
use tracing::{debug, info};

use crate::app_config::ApiConfig;
use crate::StoreError;

#[derive(Debug, Serialize)]
struct PaymentIntentRequest {
    price: Price,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentIntentResponse {
    client_secret: String,
}

#[derive(Debug, Serialize)]
struct RoomStatusRequest {
    status: bool,
}

/// Update acknowledgement (`{acknowledged, modifiedCount}`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateResponse {
    #[serde(default)]
    acknowledged: bool,
    #[serde(default)]
    modified_count: u64,
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    access_token: Option<Masked<String>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, StoreError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| StoreError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl {
                url: config.base_url.clone(),
                reason: "not a base URL".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url,
            access_token: config.access_token.clone(),
        })
    }

    /// Use the access token issued at sign-in.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(Masked::new(token.into()));
        self
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        debug!(%method, %url, "Backend request");
        let builder = self.client.request(method, url);
        match &self.access_token {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, StoreError> {
        let response = builder.send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let code = status.as_u16();
    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(StoreError::Unauthorized { status: code, body });
    }
    Err(StoreError::Api { status: code, body })
}

#[async_trait]
impl BookingBackend for ApiClient {
    async fn create_payment_intent(&self, price: Price) -> CoreResult<PaymentIntentToken> {
        let response: PaymentIntentResponse = self
            .send(
                self.request(Method::POST, &["create-payment-intent"])
                    .json(&PaymentIntentRequest { price }),
            )
            .await?;
        info!(%price, "Payment intent created");
        Ok(PaymentIntentToken::new(response.client_secret, price))
    }

    async fn insert_booking(&self, booking: &PersistedBooking) -> CoreResult<InsertOutcome> {
        let outcome: InsertOutcome = self
            .send(self.request(Method::POST, &["bookings"]).json(booking))
            .await?;
        Ok(outcome)
    }

    async fn set_room_booked(&self, room_id: &str, booked: bool) -> CoreResult<bool> {
        let response: UpdateResponse = self
            .send(
                self.request(Method::PATCH, &["rooms", "status", room_id])
                    .json(&RoomStatusRequest { status: booked }),
            )
            .await?;
        debug!(room_id, booked, modified = response.modified_count, "Room status updated");
        Ok(response.acknowledged)
    }
}

#[async_trait]
impl BookingHistory for ApiClient {
    async fn guest_bookings(&self, email: &str) -> CoreResult<Vec<PersistedBooking>> {
        Ok(self
            .send(
                self.request(Method::GET, &["bookings"])
                    .query(&[("email", email)]),
            )
            .await?)
    }

    async fn host_bookings(&self, email: &str) -> CoreResult<Vec<PersistedBooking>> {
        Ok(self
            .send(
                self.request(Method::GET, &["bookings", "host"])
                    .query(&[("email", email)]),
            )
            .await?)
    }
}

#[async_trait]
impl RoomRepository for ApiClient {
    async fn add_room(&self, room: &NewRoom) -> CoreResult<InsertOutcome> {
        Ok(self
            .send(self.request(Method::POST, &["rooms"]).json(room))
            .await?)
    }

    async fn all_rooms(&self) -> CoreResult<Vec<Room>> {
        Ok(self.send(self.request(Method::GET, &["rooms"])).await?)
    }

    async fn get_room(&self, id: &str) -> CoreResult<Option<Room>> {
        match self.send(self.request(Method::GET, &["room", id])).await {
            Ok(room) => Ok(room),
            Err(StoreError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn host_rooms(&self, email: &str) -> CoreResult<Vec<Room>> {
        Ok(self.send(self.request(Method::GET, &["rooms", email])).await?)
    }
}

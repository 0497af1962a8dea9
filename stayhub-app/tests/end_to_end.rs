use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use stayhub_app::{resolve, AppError, AppState, Resolution};
use stayhub_catalog::NewRoomForm;
use stayhub_checkout::mock::MockPaymentProcessor;
use stayhub_checkout::{CheckoutError, CheckoutState};
use stayhub_core::{BookingRequest, CardElement, DateRange, Identity, ImageUpload, Price, Route};
use stayhub_store::app_config::Config;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

const TOKEN: &str = "session-token";

#[derive(Default)]
struct Backend {
    bookings: Mutex<Vec<Value>>,
    rooms: Mutex<Vec<Value>>,
    booked: Mutex<Vec<String>>,
    drop_inserted_id: AtomicBool,
}

type Shared = Arc<Backend>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {}", TOKEN).as_str())
}

async fn create_intent(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({ "clientSecret": format!("pi_e2e_secret_{}", body["price"]) })).into_response()
}

async fn insert_booking(State(backend): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    backend.bookings.lock().unwrap().push(body);
    if backend.drop_inserted_id.load(Ordering::SeqCst) {
        return Json(json!({}));
    }
    Json(json!({ "acknowledged": true, "insertedId": "b-1" }))
}

async fn list_bookings(
    State(backend): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let email = params.get("email").cloned().unwrap_or_default();
    let mine: Vec<Value> = backend
        .bookings
        .lock()
        .unwrap()
        .iter()
        .filter(|b| b["guestEmail"] == email.as_str())
        .cloned()
        .collect();
    Json(Value::Array(mine))
}

async fn update_status(State(backend): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    backend.booked.lock().unwrap().push(id);
    Json(json!({ "acknowledged": true, "modifiedCount": 1 }))
}

async fn all_rooms(State(backend): State<Shared>) -> Json<Value> {
    Json(Value::Array(backend.rooms.lock().unwrap().clone()))
}

async fn add_room(State(backend): State<Shared>, Json(mut body): Json<Value>) -> Json<Value> {
    let mut rooms = backend.rooms.lock().unwrap();
    let id = format!("room-{}", rooms.len() + 1);
    body["_id"] = json!(id);
    rooms.push(body);
    Json(json!({ "insertedId": id }))
}

async fn host_rooms(State(backend): State<Shared>, Path(email): Path<String>) -> Json<Value> {
    let rooms: Vec<Value> = backend
        .rooms
        .lock()
        .unwrap()
        .iter()
        .filter(|r| r["host"]["email"] == email.as_str())
        .cloned()
        .collect();
    Json(Value::Array(rooms))
}

async fn upload() -> Json<Value> {
    Json(json!({ "data": { "display_url": "https://i.ibb.co/e2e/room.jpg" } }))
}

async fn spawn() -> (Config, Shared) {
    let backend = Shared::default();
    let app = Router::new()
        .route("/create-payment-intent", post(create_intent))
        .route("/bookings", post(insert_booking).get(list_bookings))
        .route("/rooms/status/{id}", patch(update_status))
        .route("/rooms", get(all_rooms).post(add_room))
        .route("/rooms/{email}", get(host_rooms))
        .route("/upload", post(upload))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = Config::from_toml_str(&format!(
        r#"
        [api]
        base_url = "http://{addr}"
        timeout_seconds = 5

        [image_host]
        upload_url = "http://{addr}/upload"
        api_key = "key"
        "#
    ))
    .unwrap();
    (config, backend)
}

fn guest() -> Identity {
    Identity::new(Some("Jane Guest"), Some("jane@example.com"))
}

fn booking() -> BookingRequest {
    BookingRequest {
        room_id: "room-7".to_string(),
        price: Price::from_major(150),
        host_email: "host@example.com".to_string(),
        guest_email: "jane@example.com".to_string(),
        guest_name: "Jane Guest".to_string(),
        date_range: DateRange::new(
            Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 12, 3, 0, 0, 0).unwrap(),
        )
        .unwrap(),
    }
}

#[tokio::test]
async fn test_booking_over_http() {
    let (config, backend) = spawn().await;
    let state = AppState::from_config(&config)
        .unwrap()
        .sign_in(guest(), TOKEN);

    let processor = Arc::new(MockPaymentProcessor::new());
    let mut checkout = state.checkout("room-7", processor.clone()).unwrap();
    assert!(state.ui.modal_open());

    checkout.load_booking(booking()).await.unwrap();
    assert_eq!(checkout.view().submit_label, "Pay $150.00");

    let receipt = checkout
        .submit(Some(&CardElement::new("card", false)))
        .await
        .unwrap();

    assert_eq!(receipt.booking_id, "b-1");
    assert_eq!(checkout.state(), &CheckoutState::Idle);
    assert_eq!(state.ui.current_route(), Some(Route::MyBookings));
    assert!(!state.ui.modal_open());
    assert_eq!(backend.booked.lock().unwrap().clone(), vec!["room-7"]);

    let mine = state.dashboard().unwrap().my_bookings().await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].transaction_id, receipt.transaction_id);
    assert_eq!(mine[0].request.price, Price::from_major(150));
}

#[tokio::test]
async fn test_insert_without_id_keeps_room_available() {
    let (config, backend) = spawn().await;
    backend.drop_inserted_id.store(true, Ordering::SeqCst);
    let state = AppState::from_config(&config)
        .unwrap()
        .sign_in(guest(), TOKEN);

    let mut checkout = state
        .checkout("room-7", Arc::new(MockPaymentProcessor::new()))
        .unwrap();
    checkout.load_booking(booking()).await.unwrap();
    let err = checkout
        .submit(Some(&CardElement::new("card", false)))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::Persistence { .. }));
    assert!(backend.booked.lock().unwrap().is_empty());
    assert!(state.ui.toasts().is_empty());
    assert!(state.ui.history().is_empty());
}

#[tokio::test]
async fn test_token_fetch_without_session_is_reported() {
    let (config, _) = spawn().await;
    let state = AppState::from_config(&config).unwrap();
    assert!(matches!(
        state.checkout("room-7", Arc::new(MockPaymentProcessor::new())),
        Err(AppError::SignInRequired(_))
    ));

    // Signed in without a valid token: the backend refuses the intent.
    let state = state.sign_in(guest(), "stale");
    let mut checkout = state
        .checkout("room-7", Arc::new(MockPaymentProcessor::new()))
        .unwrap();
    let err = checkout.load_booking(booking()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::TokenFetch(_)));
    assert!(!checkout.view().submit_enabled);
}

#[tokio::test]
async fn test_add_room_then_browse() {
    let (config, _) = spawn().await;
    let host = Identity::new(Some("Host"), Some("host@example.com"));
    let state = AppState::from_config(&config).unwrap().sign_in(host, TOKEN);

    let mut flow = state.add_room_flow().unwrap();
    let id = flow
        .submit(NewRoomForm {
            location: "Sylhet".to_string(),
            title: "Tea garden cabin".to_string(),
            dates: DateRange::new(
                Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 11, 30, 0, 0, 0).unwrap(),
            )
            .unwrap(),
            price: "85.50".to_string(),
            guests: 2,
            bedrooms: 1,
            bathrooms: 1,
            category: "Countryside".to_string(),
            description: "Quiet".to_string(),
            image: ImageUpload {
                file_name: "room.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                bytes: vec![0xff, 0xd8],
            },
        })
        .await
        .unwrap();

    assert_eq!(id, "room-1");
    assert_eq!(state.ui.toasts(), vec!["Room added successfully!!"]);
    assert_eq!(state.ui.current_route(), Some(Route::MyListings));

    let rooms = state.catalog().browse(Some("Countryside")).await.unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].details.price, Price::from_minor(8550));
    assert_eq!(rooms[0].details.image, "https://i.ibb.co/e2e/room.jpg");
    assert!(state.catalog().browse(Some("Beach")).await.unwrap().is_empty());

    let listings = state.dashboard().unwrap().my_listings().await.unwrap();
    assert_eq!(listings[0].id, "room-1");
}

#[test]
fn test_guard_follows_sign_in() {
    assert_eq!(
        resolve("/dashboard/my-listings", None),
        Resolution::Redirect {
            to: Route::Login,
            from: "/dashboard/my-listings".to_string()
        }
    );
    assert_eq!(
        resolve("/dashboard/my-listings", Some(&guest())),
        Resolution::Render(Route::MyListings)
    );
}

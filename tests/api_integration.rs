//! End-to-end API tests
//!
//! These tests drive the full router over the in-memory store:
//! - Registration validation, duplicate detection, and the concurrent race
//! - Phone-keyed login and its uniform 401
//! - Bearer-token identity on card uploads
//! - Storage failures surfacing as a plain 500

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cardwithgifts_api::api::{routes, state::AppState};
use cardwithgifts_api::auth::jwt::create_token;
use cardwithgifts_api::domain::repositories::{RepositoryError, UserRepository};
use cardwithgifts_api::domain::user::{Email, NewUser, User};
use cardwithgifts_api::infrastructure::repositories::InMemoryRepository;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for oneshot
use uuid::Uuid;

const TEST_SECRET: &str = "integration-test-secret";

/// Setup test application over a fresh store
fn setup_app() -> (Router, Arc<InMemoryRepository>) {
    let store = Arc::new(InMemoryRepository::new());
    let app = routes::router(AppState::in_memory(store.clone(), TEST_SECRET));
    (app, store)
}

/// User store whose every call fails as if the pool were exhausted
struct UnavailableUsers;

#[async_trait::async_trait]
impl UserRepository for UnavailableUsers {
    async fn find_by_email(&self, _email: &Email) -> Result<Option<User>, RepositoryError> {
        Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn insert_user(&self, _user: NewUser) -> Result<User, RepositoryError> {
        Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
    }
}

fn setup_app_with_failing_users() -> Router {
    let state = AppState::new(
        Arc::new(UnavailableUsers),
        Arc::new(InMemoryRepository::new()),
        TEST_SECRET,
    );
    routes::router(state)
}

fn registration(email: &str) -> Value {
    json!({
        "companyName": "Paper Lantern",
        "phone": "9876543210",
        "phoneType": "mobile",
        "email": email,
        "streetAddress": "12 Lake View Road",
        "address2": "",
        "city": "Pune",
        "state": "Maharashtra",
        "zipCode": "411001"
    })
}

fn card_upload() -> Value {
    json!({
        "Occasion": "Anniversary",
        "Recipient": "Parents",
        "Orientation": "landscape",
        "Publisher_Sku": "PUB-7781",
        "CardwithGift_Sku": "CWG-7781",
        "Activation_Date": "2025-02-01",
        "Front": "https://cdn.example.com/7781/front.jpg",
        "Inside_Right": "Thirty years and counting",
        "Back": "https://cdn.example.com/7781/back.jpg",
        "Uploaded_By": "design-team",
        "Status": "active"
    })
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(payload).unwrap()))
        .unwrap()
}

fn post_json_with_token(uri: &str, payload: &Value, token: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(payload).unwrap()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

/// Registers `email` and logs in, returning the user id and bearer token
async fn register_and_login(app: &Router, email: &str) -> (String, String) {
    let (status, _) = send_json(app, post_json("/api/register", &registration(email))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send_json(
        app,
        post_json("/api/login", &json!({"email": email, "phone": "9876543210"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    (
        json["user"]["id"].as_str().unwrap().to_string(),
        json["token"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup_app();

    let (status, body) = send(
        &app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_register_user() {
    let (app, _) = setup_app();

    let (status, json) = send_json(
        &app,
        post_json("/api/register", &registration("register@paperlantern.in")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["email"], "register@paperlantern.in");
    assert_eq!(json["companyName"], "Paper Lantern");
    assert_eq!(json["phoneType"], "mobile");
    assert_eq!(json["address2"], "");
    assert!(Uuid::parse_str(json["id"].as_str().unwrap()).is_ok());
    assert!(json["createdAt"].is_string());
}

#[tokio::test]
async fn test_register_reports_missing_required_field() {
    let (app, _) = setup_app();
    let mut payload = registration("missing-city@paperlantern.in");
    payload.as_object_mut().unwrap().remove("city");

    let (status, json) = send_json(&app, post_json("/api/register", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"errors": ["City is required"]}));
}

#[tokio::test]
async fn test_register_reports_every_violation() {
    let (app, _) = setup_app();
    let payload = json!({
        "phone": "12345",
        "email": "not-an-email",
        "zipCode": "12345"
    });

    let (status, json) = send_json(&app, post_json("/api/register", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["errors"],
        json!([
            "Phone must be a 10-digit number",
            "Phone Type is required",
            "Invalid email",
            "City is required",
            "State is required",
            "Zip Code must be a 6-digit number"
        ])
    );
}

#[tokio::test]
async fn test_register_rejects_short_phone_alone() {
    let (app, _) = setup_app();
    let mut payload = registration("short-phone@paperlantern.in");
    payload["phone"] = json!("12345");

    let (status, json) = send_json(&app, post_json("/api/register", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"errors": ["Phone must be a 10-digit number"]}));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (app, _) = setup_app();
    let payload = registration("twice@paperlantern.in");

    let (first, _) = send_json(&app, post_json("/api/register", &payload)).await;
    let (second, json) = send_json(&app, post_json("/api/register", &payload)).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "Email is already registered"}));
}

#[tokio::test]
async fn test_concurrent_registrations_admit_one() {
    let (app, _) = setup_app();
    let payload = registration("race@paperlantern.in");

    let attempts = (0..8).map(|_| {
        let app = app.clone();
        let request = post_json("/api/register", &payload);
        tokio::spawn(async move { app.oneshot(request).await.unwrap().status() })
    });

    let mut created = 0;
    for attempt in attempts.collect::<Vec<_>>() {
        match attempt.await.unwrap() {
            StatusCode::CREATED => created += 1,
            status => assert_eq!(status, StatusCode::BAD_REQUEST),
        }
    }

    assert_eq!(created, 1);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, _) = setup_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/register")
        .header("content-type", "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();

    let (status, json) = send_json(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_and_login_flow() {
    let (app, _) = setup_app();
    send_json(
        &app,
        post_json("/api/register", &registration("login@paperlantern.in")),
    )
    .await;

    let (status, json) = send_json(
        &app,
        post_json(
            "/api/login",
            &json!({"email": "login@paperlantern.in", "phone": "9876543210"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Login successful");
    assert_eq!(json["user"]["email"], "login@paperlantern.in");
    assert!(!json["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_wrong_phone_and_unknown_email_look_the_same() {
    let (app, _) = setup_app();
    send_json(
        &app,
        post_json("/api/register", &registration("known@paperlantern.in")),
    )
    .await;

    let (wrong_phone_status, wrong_phone) = send_json(
        &app,
        post_json(
            "/api/login",
            &json!({"email": "known@paperlantern.in", "phone": "0000000000"}),
        ),
    )
    .await;
    let (unknown_status, unknown) = send_json(
        &app,
        post_json(
            "/api/login",
            &json!({"email": "nobody@paperlantern.in", "phone": "9876543210"}),
        ),
    )
    .await;

    assert_eq!(wrong_phone_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_phone, unknown);
    assert_eq!(wrong_phone, json!({"error": "Invalid credentials"}));
}

#[tokio::test]
async fn test_login_validation() {
    let (app, _) = setup_app();

    let (status, json) = send_json(
        &app,
        post_json("/api/login", &json!({"email": "bad-address"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"errors": ["Invalid email", "Phone is required"]}));
}

#[tokio::test]
async fn test_login_with_empty_strings() {
    let (app, _) = setup_app();

    let (status, json) = send_json(
        &app,
        post_json("/api/login", &json!({"email": "", "phone": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"errors": ["Email is required", "Phone is required"]}));
}

#[tokio::test]
async fn test_register_storage_failure_is_internal_error() {
    let app = setup_app_with_failing_users();

    let (status, body) = send(
        &app,
        post_json("/api/register", &registration("down@paperlantern.in")),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, b"Internal Server Error");
}

#[tokio::test]
async fn test_login_storage_failure_is_internal_error() {
    let app = setup_app_with_failing_users();

    let (status, body) = send(
        &app,
        post_json(
            "/api/login",
            &json!({"email": "down@paperlantern.in", "phone": "9876543210"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, b"Internal Server Error");
}

#[tokio::test]
async fn test_add_card_for_logged_in_user() {
    let (app, store) = setup_app();
    let (user_id, token) = register_and_login(&app, "cards@paperlantern.in").await;

    let (status, json) = send_json(
        &app,
        post_json_with_token("/api/addCard", &card_upload(), &token),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["user_id"], user_id);
    assert_eq!(json["Occasion"], "Anniversary");
    assert_eq!(json["Status"], "active");
    assert_eq!(json["Activation_Date"], "2025-02-01");
    assert!(json["Deactivation_Date"].is_null());
    assert_eq!(json["Created_Date"], json["Modified_Date"]);

    let owner = Uuid::parse_str(&user_id).unwrap();
    assert_eq!(store.cards_owned_by(owner).unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_card_requires_token() {
    let (app, _) = setup_app();

    let (status, json) = send_json(&app, post_json("/api/addCard", &card_upload())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Missing authorization header");
}

#[tokio::test]
async fn test_add_card_rejects_foreign_token() {
    let (app, _) = setup_app();
    let forged = create_token(Uuid::new_v4(), "some-other-secret").unwrap();

    let (status, json) = send_json(
        &app,
        post_json_with_token("/api/addCard", &card_upload(), &forged),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Invalid token");
}

#[tokio::test]
async fn test_add_card_for_unknown_user() {
    let (app, _) = setup_app();
    let token = create_token(Uuid::new_v4(), TEST_SECRET).unwrap();

    let (status, _) = send_json(
        &app,
        post_json_with_token("/api/addCard", &card_upload(), &token),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_add_card_validation() {
    let (app, store) = setup_app();
    let (user_id, token) = register_and_login(&app, "badcard@paperlantern.in").await;
    let mut payload = card_upload();
    payload.as_object_mut().unwrap().remove("Front");
    payload["Orientation"] = json!("diagonal");

    let (status, json) = send_json(
        &app,
        post_json_with_token("/api/addCard", &payload, &token),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({"errors": ["Invalid Orientation", "Front is required"]})
    );

    let owner = Uuid::parse_str(&user_id).unwrap();
    assert!(store.cards_owned_by(owner).unwrap().is_empty());
}

#![cfg(feature = "server")]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use rsvp_database::Database;
use rsvp_domain::config::ApiConfig;
use rsvp_kernel::server::ApiState;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let db = Database::builder()
        .url("mem://")
        .session("rsvp_test", "api")
        .init()
        .await
        .expect("in-memory database");

    let slice = rsvp_registration::init(&db).expect("registration slice");
    let state = ApiState::builder()
        .config(ApiConfig::default())
        .db(db)
        .register_slice(slice)
        .build()
        .expect("state");

    let (router, _openapi) =
        rsvp_registration::server::router().with_state(state).split_for_parts();
    router
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

fn post(body: &Value) -> Request<Body> {
    Request::post("/api/registrations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn event_details_are_served_from_config() {
    let app = app().await;

    let (status, body) =
        send(&app, Request::get("/api/event").body(Body::empty()).expect("request")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Moove Flow Experience");
}

#[tokio::test]
async fn create_canonicalizes_digits() {
    let app = app().await;

    let (status, body) = send(
        &app,
        post(&json!({
            "name": "  Ana Souza ",
            "phoneDigits": "(11) 98765-4321",
            "nationalIdDigits": "123.456.789-01",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Ana Souza");
    assert_eq!(body["phoneDigits"], "11987654321");
    assert_eq!(body["nationalIdDigits"], "12345678901");

    let (status, list) =
        send(&app, Request::get("/api/registrations").body(Body::empty()).expect("request"))
            .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn invalid_payload_is_unprocessable() {
    let app = app().await;

    let (status, body) = send(
        &app,
        post(&json!({
            "name": "",
            "phoneDigits": "11987654321",
            "nationalIdDigits": "12345678901",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Please enter your name");
}

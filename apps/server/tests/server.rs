use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use rsvp_server::Server;
use serde_json::Value;
use tower::ServiceExt;

#[tokio::test]
async fn build_registers_the_registration_slice() {
    let server = Server::builder().build().await.expect("server with in-memory store");

    let names: Vec<_> = server.state().slice_names().collect();
    assert_eq!(names, ["Registration"]);
}

#[tokio::test]
async fn health_and_listing_are_routed() {
    let app = Server::builder().build().await.expect("server").router();

    let health = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
        .await
        .expect("health response");
    assert_eq!(health.status(), StatusCode::OK);

    let list = app
        .oneshot(Request::get("/api/registrations").body(Body::empty()).expect("request"))
        .await
        .expect("list response");
    assert_eq!(list.status(), StatusCode::OK);

    let bytes = to_bytes(list.into_body(), usize::MAX).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body, Value::Array(Vec::new()));
}

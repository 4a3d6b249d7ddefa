use super::*;
use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use tower::ServiceExt;

fn test_app(settings: &Settings) -> Router {
    let state = AppState {
        scorer: Arc::new(FixedScorer::uniform(30, 0.8).expect("scorer")),
        min_usable_frames: settings.min_usable_frames,
    };
    build_router(Arc::new(state), settings).expect("router")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = test_app(&Settings::default());
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn preflight_allows_configured_origin_with_credentials() {
    let app = test_app(&Settings::default());
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/predict")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}

#[tokio::test]
async fn oversized_uploads_are_refused() {
    let settings = Settings {
        max_upload_bytes: 16,
        ..Settings::default()
    };
    let app = test_app(&settings);
    let body = vec![b'x'; 64];
    let request = Request::post("/predict")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=x")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[test]
fn invalid_origin_is_a_setup_error() {
    let settings = Settings {
        allowed_origin: "http://bad\norigin".to_string(),
        ..Settings::default()
    };
    let state = AppState {
        scorer: Arc::new(FixedScorer::uniform(1, 0.5).expect("scorer")),
        min_usable_frames: 1,
    };
    assert!(build_router(Arc::new(state), &settings).is_err());
}

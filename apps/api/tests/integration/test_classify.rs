use super::helpers::{
    CLASSIFY_PATH, Part, TEST_KEY, assert_status, build_config, classify_request,
    fake_png_bytes, image_request, read_json, send, spawn_app, spawn_app_with,
};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{any, body_bytes, header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn expect_no_remote_calls(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn classify_relays_remote_predictions() {
    let server = MockServer::start().await;
    let image = fake_png_bytes();

    Mock::given(method("POST"))
        .and(path(CLASSIFY_PATH))
        .and(header_eq("Prediction-Key", TEST_KEY))
        .and(header_eq("Content-Type", "application/octet-stream"))
        .and(body_bytes(image.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{ "label": "cat", "probability": 0.9 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = spawn_app(&server);
    let res = send(&app.app, image_request(&image)).await;

    assert_status(res.status(), StatusCode::OK);
    let body: Value = read_json(res).await;
    assert_eq!(
        body,
        json!({
            "message": "Image classified successfully!",
            "results": { "predictions": [{ "label": "cat", "probability": 0.9 }] }
        })
    );
}

#[tokio::test]
async fn classify_ignores_text_fields_next_to_the_image() {
    let server = MockServer::start().await;
    let image = fake_png_bytes();

    Mock::given(method("POST"))
        .and(body_bytes(image.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "predictions": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let app = spawn_app(&server);
    let req = classify_request(&[
        Part::text("note", "kitchen camera"),
        Part::file("image", "cat.png", &image),
    ]);
    let res = send(&app.app, req).await;

    assert_status(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn classify_passes_remote_error_status_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CLASSIFY_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "error": "invalid key" })))
        .expect(1)
        .mount(&server)
        .await;

    let app = spawn_app(&server);
    let res = send(&app.app, image_request(&fake_png_bytes())).await;

    assert_status(res.status(), StatusCode::FORBIDDEN);
    let body: Value = read_json(res).await;
    assert_eq!(
        body,
        json!({
            "error": "Error from Azure Custom Vision API",
            "details": { "error": "invalid key" }
        })
    );
}

#[tokio::test]
async fn classify_reports_timeout_as_no_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "predictions": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = build_config(
        Some(format!("{}{}", server.uri(), CLASSIFY_PATH)),
        Some(TEST_KEY.to_string()),
    );
    let app = spawn_app_with(config, Duration::from_millis(200));
    let res = send(&app.app, image_request(&fake_png_bytes())).await;

    assert_status(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = read_json(res).await;
    assert_eq!(
        body,
        json!({ "error": "No response received from Azure Custom Vision API." })
    );
}

#[tokio::test]
async fn classify_reports_refused_connection_as_no_response() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("failed to bind");
    let addr = listener.local_addr().expect("no local addr");
    drop(listener);

    let config = build_config(
        Some(format!("http://{}/classify", addr)),
        Some(TEST_KEY.to_string()),
    );
    let app = spawn_app_with(config, Duration::from_secs(5));
    let res = send(&app.app, image_request(&fake_png_bytes())).await;

    assert_status(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = read_json(res).await;
    assert_eq!(
        body["error"],
        "No response received from Azure Custom Vision API."
    );
}

#[tokio::test]
async fn classify_without_image_is_bad_request() {
    let server = MockServer::start().await;
    expect_no_remote_calls(&server).await;

    let app = spawn_app(&server);
    let req = classify_request(&[Part::text("note", "no file here")]);
    let res = send(&app.app, req).await;

    assert_status(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(res).await;
    assert_eq!(body, json!({ "error": "No image file provided." }));
}

#[tokio::test]
async fn classify_with_non_multipart_body_is_bad_request() {
    let server = MockServer::start().await;
    expect_no_remote_calls(&server).await;

    let app = spawn_app(&server);
    let req = Request::builder()
        .method("POST")
        .uri("/api/classify-image")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"image":"not a file"}"#))
        .expect("failed to build request");
    let res = send(&app.app, req).await;

    assert_status(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(res).await;
    assert_eq!(body, json!({ "error": "No image file provided." }));
}

#[tokio::test]
async fn classify_rejects_file_under_unexpected_field() {
    let server = MockServer::start().await;
    expect_no_remote_calls(&server).await;

    let app = spawn_app(&server);
    let image = fake_png_bytes();
    let req = classify_request(&[Part::file("photo", "cat.png", &image)]);
    let res = send(&app.app, req).await;

    assert_status(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(res).await;
    assert_eq!(body, json!({ "error": "Unexpected field: photo" }));
}

#[tokio::test]
async fn classify_rejects_more_than_one_image() {
    let server = MockServer::start().await;
    expect_no_remote_calls(&server).await;

    let app = spawn_app(&server);
    let image = fake_png_bytes();
    let req = classify_request(&[
        Part::file("image", "a.png", &image),
        Part::file("image", "b.png", &image),
    ]);
    let res = send(&app.app, req).await;

    assert_status(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn classify_without_credentials_is_configuration_error() {
    let server = MockServer::start().await;
    expect_no_remote_calls(&server).await;

    for (endpoint, key) in [
        (None, Some(TEST_KEY.to_string())),
        (Some(format!("{}{}", server.uri(), CLASSIFY_PATH)), None),
        (None, None),
    ] {
        let app = spawn_app_with(build_config(endpoint, key), Duration::from_secs(5));
        let res = send(&app.app, image_request(&fake_png_bytes())).await;

        assert_status(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = read_json(res).await;
        let message = body["error"].as_str().expect("error message missing");
        assert!(
            message.starts_with("Server configuration error:"),
            "unexpected message: {message}"
        );
    }
}

//! End-to-end tests for the HTTP routes, backed by artifact files in a
//! temporary directory.

use std::path::Path;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

use homeprice::adapters::fs::FsArtifacts;
use homeprice::adapters::http::{configure, HttpSettings};
use homeprice::ArtifactStore;

/// Manifest from the reference scenario; the model ignores its inputs and
/// always predicts 83.49.
fn write_artifacts(dir: &Path) {
    std::fs::write(
        dir.join("columns.json"),
        json!({
            "data_columns": ["1st phase jp nagar", "indira nagar", "total_sqft", "bath", "bhk"]
        })
        .to_string(),
    )
    .expect("write columns");
    std::fs::write(
        dir.join("house_prices_prediction.json"),
        json!({ "coefficients": [0.0, 0.0, 0.0, 0.0, 0.0], "intercept": 83.49 }).to_string(),
    )
    .expect("write model");
}

fn artifact_dir() -> TempDir {
    let temp = tempdir().expect("tempdir");
    write_artifacts(temp.path());
    temp
}

macro_rules! service {
    ($dir:expr) => {
        service!($dir, HttpSettings::default())
    };
    ($dir:expr, $settings:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(ArtifactStore::new(FsArtifacts::in_dir($dir))))
                .app_data(web::Data::new($settings))
                .configure(configure),
        )
        .await
    };
}

fn predict_request(body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/predict_house_price")
        .set_json(body)
}

#[actix_web::test]
async fn test_location_names_before_any_prediction() {
    let dir = artifact_dir();
    let app = service!(dir.path());

    let req = test::TestRequest::get().uri("/get_location_names").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).map(|v| v.as_bytes()),
        Some(&b"*"[..])
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "locations": ["1st phase jp nagar", "indira nagar"] }));
}

#[actix_web::test]
async fn test_predict_known_location() {
    let dir = artifact_dir();
    let app = service!(dir.path());

    let resp = test::call_service(
        &app,
        predict_request(json!({
            "sqft": 1000,
            "bedrooms": 2,
            "bathrooms": 2,
            "location": "Indira Nagar"
        }))
        .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "estimated_price": 83.49 }));
}

#[actix_web::test]
async fn test_predict_unknown_location() {
    let dir = artifact_dir();
    let app = service!(dir.path());

    let resp = test::call_service(
        &app,
        predict_request(json!({
            "sqft": 1000,
            "bedrooms": 2,
            "bathrooms": 2,
            "location": "Unknown Place"
        }))
        .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "estimated_price": "No data available for this location" })
    );
}

#[actix_web::test]
async fn test_predict_coerces_string_numbers_without_content_type() {
    let dir = artifact_dir();
    let app = service!(dir.path());

    let req = test::TestRequest::post()
        .uri("/predict_house_price")
        .set_payload(r#"{"sqft": "1200.5", "bedrooms": "3", "bathrooms": 2.0, "location": " 1ST PHASE JP NAGAR "}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "estimated_price": 83.49 }));
}

#[actix_web::test]
async fn test_missing_field_is_a_server_error() {
    let dir = artifact_dir();
    let app = service!(dir.path());

    let resp = test::call_service(
        &app,
        predict_request(json!({ "sqft": 1000, "bathrooms": 2, "location": "indira nagar" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"Internal Server Error");
}

#[actix_web::test]
async fn test_missing_artifacts_is_a_server_error() {
    let dir = tempdir().expect("tempdir");
    let app = service!(dir.path());

    let req = test::TestRequest::get().uri("/get_location_names").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Artifacts appearing later are picked up by the next request.
    write_artifacts(dir.path());
    let req = test::TestRequest::get().uri("/get_location_names").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_plain_text_routes() {
    let dir = artifact_dir();
    let app = service!(dir.path());

    for (uri, text) in [("/", "Backend Running !"), ("/health", "Flask server is running!")] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(!resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        let body = test::read_body(resp).await;
        assert_eq!(&body[..], text.as_bytes());
    }
}

#[actix_web::test]
async fn test_preflight_uses_configured_origin() {
    let dir = artifact_dir();
    let app = service!(dir.path(), HttpSettings::new("http://localhost:3000"));

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/predict_house_price")
        .insert_header((header::ORIGIN, "http://localhost:3000"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let headers = resp.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).map(|v| v.as_bytes()),
        Some(&b"http://localhost:3000"[..])
    );
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
}

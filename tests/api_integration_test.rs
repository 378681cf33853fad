//! Integration tests for the HTTP surface over an on-disk store

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use patient_registry::adapters::store::JsonFileStore;
use patient_registry::api::registry_router;
use patient_registry::core::registry::PatientRegistry;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn app_with_store(dir: &TempDir, contents: Value) -> (Router, PathBuf) {
    let path = dir.path().join("patients.json");
    std::fs::write(&path, serde_json::to_vec(&contents).unwrap()).unwrap();
    let registry = PatientRegistry::new(Arc::new(JsonFileStore::new(&path)));
    (registry_router(registry), path)
}

fn two_patients() -> Value {
    json!({
        "P001": {"name": "Ravi", "city": "Pune", "age": 30, "gender": "male",
                 "height": 1.8, "weight": 72},
        "P002": {"name": "Meera", "city": "Chennai", "age": 41, "gender": "female",
                 "height": 1.6, "weight": 50}
    })
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_get_patient_with_derived_fields() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app_with_store(&dir, two_patients());

    let (status, body) = get(&app, "/patient/P001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "P001");
    assert_eq!(body["name"], "Ravi");
    assert!((body["bmi"].as_f64().unwrap() - 22.22).abs() < 0.01);
    assert_eq!(body["verdict"], "Normal");

    let (status, body) = get(&app, "/patient/P003").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Patient not found");
}

#[tokio::test]
async fn test_view_returns_stored_mapping() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app_with_store(&dir, two_patients());

    let (status, first) = get(&app, "/view").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, two_patients());

    let (_, second) = get(&app, "/view").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_sort_by_weight() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app_with_store(&dir, two_patients());

    let (status, body) = get(&app, "/sort?sort_by=weight&order=asc").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["P002", "P001"]);

    let (_, body) = get(&app, "/sort?sort_by=weight&order=desc").await;
    assert_eq!(body[0]["id"], "P001");
    assert_eq!(body[0]["verdict"], "Normal");
}

#[tokio::test]
async fn test_sort_rejects_unknown_field() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app_with_store(&dir, two_patients());

    let (status, body) = get(&app, "/sort?sort_by=invalidfield").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "Invalid field, select from height, weight, bmi, bmi_category"
    );
}

#[tokio::test]
async fn test_create_duplicate_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (app, path) = app_with_store(&dir, two_patients());
    let before = std::fs::read(&path).unwrap();

    let (status, body) = post(
        &app,
        "/create",
        json!({"id": "P001", "name": "Someone", "city": "Goa", "age": 25,
               "gender": "female", "height": 1.6, "weight": 55}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "patient already exists");
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn test_create_then_view() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app_with_store(&dir, two_patients());

    let (status, body) = post(
        &app,
        "/create",
        json!({"id": "P003", "name": "Arjun", "city": "Kochi", "age": 60,
               "gender": "others", "height": 1.7, "weight": 80}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Patient created successfully");

    let (_, view) = get(&app, "/view").await;
    let keys: Vec<&str> = view.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["P001", "P002", "P003"]);
    assert!(view["P003"].get("bmi").is_none());

    let (_, record) = get(&app, "/patient/P003").await;
    assert_eq!(record["verdict"], "Overweight");
}

#[tokio::test]
async fn test_create_validation_failure() {
    let dir = TempDir::new().unwrap();
    let (app, _) = app_with_store(&dir, json!({}));

    let (status, body) = post(&app, "/create", json!({"id": "P009", "age": "old"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");

    let violations = body["error"]["violations"].as_array().unwrap();
    let age = violations.iter().find(|v| v["field"] == "age").unwrap();
    assert_eq!(age["rule"], "wrong_type");
    assert!(violations.iter().any(|v| v["field"] == "name" && v["rule"] == "missing"));

    let (_, view) = get(&app, "/view").await;
    assert_eq!(view, json!({}));
}

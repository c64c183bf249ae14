use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;
use tower::ServiceExt;

fn write_catalog(dir: &std::path::Path) -> std::path::PathBuf {
    let records = json!([
        {"id": "1", "title": "Introducción a la Administración Pública", "category": "Administración General del Estado", "instructor": "Juan Pérez", "duration": "02:30", "thumbnail": "https://example.com/image1.jpg", "viewCount": "1.2K"},
        {"id": "2", "title": "Derecho Constitucional Avanzado", "category": "Justicia", "instructor": "María García", "duration": "04:15"},
        {"id": "3", "title": "Preparación Oposiciones Educación Básica", "category": "Educación", "instructor": "Carlos López", "duration": "06:00"},
        {"id": "4", "title": "Administración y Gestión Pública", "category": "Administración General del Estado", "instructor": "Ana Martínez", "duration": "03:45"},
        {"id": "5", "title": "Administración Local y Autonómica", "category": "Administración General del Estado", "instructor": "Pedro Sánchez", "duration": "05:20"}
    ]);
    let path = dir.join("catalog.json");
    fs::write(&path, records.to_string()).unwrap();
    path
}

fn app() -> Router {
    let dir = tempdir().unwrap();
    let path = write_catalog(dir.path());
    server::build_app(path.to_str().unwrap()).unwrap()
}

async fn call(app: Router, uri: &str) -> (StatusCode, Bytes) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

async fn call_json(app: Router, uri: &str) -> Value {
    let (status, body) = call(app, uri).await;
    assert_eq!(status, StatusCode::OK, "{uri}");
    serde_json::from_slice(&body).unwrap()
}

fn titles(json: &Value) -> Vec<&str> {
    json["results"].as_array().unwrap().iter().map(|r| r["title"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = call(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn search_returns_sorted_results() {
    let json = call_json(app(), "/search?q=Administraci%C3%B3n").await;
    assert_eq!(json["total_hits"], 3);
    assert_eq!(
        titles(&json),
        vec![
            "Administración Local y Autonómica",
            "Administración y Gestión Pública",
            "Introducción a la Administración Pública",
        ]
    );
}

#[tokio::test]
async fn search_without_query_or_filters_keeps_catalog_order() {
    let json = call_json(app(), "/search").await;
    let ids: Vec<&str> = json["results"].as_array().unwrap().iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
}

#[tokio::test]
async fn search_applies_comma_separated_filters() {
    let json = call_json(app(), "/search?durations=short,%20long&levels=").await;
    assert_eq!(titles(&json), vec!["Introducción a la Administración Pública", "Preparación Oposiciones Educación Básica"]);

    let json = call_json(app(), "/search?q=administracion&categories=administraci_n_general_del_estado&durations=medium").await;
    assert_eq!(json["total_hits"], 2);
}

#[tokio::test]
async fn search_results_carry_passthrough_fields() {
    let json = call_json(app(), "/search?levels=beginner").await;
    let first = &json["results"][0];
    assert_eq!(first["duration"], "02:30");
    assert_eq!(first["viewCount"], "1.2K");
    assert!(first.get("durationMinutes").is_none());
}

#[tokio::test]
async fn suggest_defaults_to_five_and_honours_limit() {
    let json = call_json(app(), "/suggest?q=admin").await;
    assert_eq!(json["suggestions"].as_array().unwrap().len(), 3);

    let json = call_json(app(), "/suggest?q=admin&limit=2").await;
    assert_eq!(json["suggestions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn facets_report_corpus_counts() {
    let json = call_json(app(), "/facets").await;
    let categories = json["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 3);
    assert_eq!(categories[0]["id"], "administraci_n_general_del_estado");
    assert_eq!(categories[0]["count"], 3);
    assert_eq!(json["durations"][0]["label"], "Corta (< 3h)");
    assert_eq!(json["levels"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn course_lookup() {
    let json = call_json(app(), "/courses/2").await;
    assert_eq!(json["title"], "Derecho Constitucional Avanzado");

    let (status, _) = call(app(), "/courses/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn missing_catalog_fails_to_build() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(server::build_app(missing.to_str().unwrap()).is_err());
}

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use guess_classmate::{
    dataset::{Dataset, SEARCH_LIMIT},
    prelude::*,
    server::{router, Health},
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

fn app(dataset: Dataset) -> Router {
    router(dataset, &Configuration::new())
}

async fn get<T: DeserializeOwned>(app: Router, uri: &str) -> (StatusCode, T) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn names(characters: &[Entity]) -> Vec<&str> {
    characters.iter().map(|c| c.name.as_str()).collect()
}

#[tokio::test]
async fn health_reports_data_count() {
    let (status, health): (_, Health) = get(app(Dataset::fallback()), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health.status, "ok");
    assert_eq!(health.data_count, 30);
    assert!(time::OffsetDateTime::parse(
        &health.timestamp,
        &time::format_description::well_known::Rfc3339
    )
    .is_ok());
}

#[tokio::test]
async fn blank_search_returns_full_pool() {
    let (status, all): (_, Vec<Entity>) = get(app(Dataset::fallback()), "/api/search?query=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.len(), 30);

    let (_, missing): (_, Vec<Entity>) = get(app(Dataset::fallback()), "/api/search").await;
    assert_eq!(missing.len(), 30);
}

#[tokio::test]
async fn search_matches_names_only() {
    // "%E5%88%98" is 刘
    let (status, hits): (_, Vec<Entity>) =
        get(app(Dataset::fallback()), "/api/search?query=%E5%88%98").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&hits), ["刘锦东", "刘霁元", "刘子与"]);

    // a location, never matched
    let (_, none): (_, Vec<Entity>) =
        get(app(Dataset::fallback()), "/api/search?query=%E5%8C%97%E4%BA%AC").await;
    assert!(none.is_empty());
}

#[tokio::test]
async fn search_is_case_insensitive_and_capped() {
    let dataset = Dataset::from_characters(
        (0..25).map(|i| Entity::new(format!("Student {i}"), "", "", "", "", "")),
    );
    let (_, hits): (_, Vec<Entity>) = get(app(dataset.clone()), "/api/search?query=sTuDeNt").await;
    assert_eq!(hits.len(), SEARCH_LIMIT);
    assert_eq!(hits[0].name, "Student 0");

    let (_, limited): (_, Vec<Entity>) =
        get(app(dataset), "/api/search?query=student&limit=3").await;
    assert_eq!(names(&limited), ["Student 0", "Student 1", "Student 2"]);
}

#[tokio::test]
async fn unusable_limit_is_ignored() {
    let (status, all): (_, Vec<Entity>) =
        get(app(Dataset::fallback()), "/api/search?query=&limit=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.len(), 30);

    for uri in [
        "/api/search?query=%E5%88%98&limit=",
        "/api/search?query=%E5%88%98&limit=0",
        "/api/search?query=%E5%88%98&limit=-2",
    ] {
        let (status, hits): (_, Vec<Entity>) = get(app(Dataset::fallback()), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(names(&hits), ["刘锦东", "刘霁元", "刘子与"], "{uri}");
    }

    let (_, one): (_, Vec<Entity>) =
        get(app(Dataset::fallback()), "/api/search?query=%E5%88%98&limit=1").await;
    assert_eq!(names(&one), ["刘锦东"]);
}

#[tokio::test]
async fn all_characters_use_wire_shape() {
    let response = app(Dataset::fallback())
        .oneshot(
            Request::builder()
                .uri("/api/all-characters")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let first = &json.as_array().unwrap()[0];
    for key in ["name", "gender", "birthDate", "grade", "location", "hobby"] {
        assert!(first.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json.as_array().unwrap().len(), 30);
}

#[tokio::test]
async fn random_character_comes_from_the_pool() {
    let dataset = Dataset::fallback();
    let (status, drawn): (_, Entity) = get(app(dataset.clone()), "/api/random-character").await;
    assert_eq!(status, StatusCode::OK);
    assert!(dataset.all().contains(&drawn));
}

#[tokio::test]
async fn random_character_on_empty_dataset_is_not_found() {
    let (status, body): (_, serde_json::Value) =
        get(app(Dataset::from_characters([])), "/api/random-character").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let response = app(Dataset::fallback())
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
        .is_none());
}

#[tokio::test]
async fn cors_honours_configured_frontend() {
    let config = Configuration::new().with_frontend_url("http://localhost:3000");
    let response = router(Dataset::fallback(), &config)
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
}

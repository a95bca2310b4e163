//! Integration tests for the JSON API and health check

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use fyyur::create_router;
use fyyur::handlers;
use fyyur::state::AppState;
use fyyur::test_utils::*;

/// Helper to create a test router with only the API routes
fn create_api_router(state: &AppState) -> Router {
    Router::new()
        .nest("/api", handlers::api_routes())
        .with_state(state.clone())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let state = setup_test_app_state().await;

    let (status, body) = get_json(create_router(state), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_list_venues_empty() {
    let state = setup_test_app_state().await;

    let (status, body) = get_json(create_api_router(&state), "/api/venues").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_venues_grouped() {
    let state = setup_test_app_state().await;
    let hop = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_show(&state.db, artist.id, hop.id, days_from_now(1)).await;

    let (status, body) = get_json(create_api_router(&state), "/api/venues").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "city": "San Francisco",
            "state": "CA",
            "venues": [{ "id": hop.id, "name": "The Musical Hop", "num_upcoming_shows": 1 }]
        }])
    );
}

#[tokio::test]
async fn test_get_venue_detail() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_show(&state.db, artist.id, venue.id, days_from_now(-2)).await;

    let (status, body) =
        get_json(create_api_router(&state), &format!("/api/venues/{}", venue.id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "The Musical Hop");
    assert_eq!(body["genres"], json!(["Jazz", "Folk"]));
    assert_eq!(body["past_shows_count"], 1);
    assert_eq!(body["upcoming_shows_count"], 0);
    assert_eq!(body["past_shows"][0]["artist_name"], "Guns N Petals");
    assert_eq!(body["image_link"], Value::Null);
}

#[tokio::test]
async fn test_get_missing_artist_is_json_404() {
    let state = setup_test_app_state().await;

    let (status, body) = get_json(create_api_router(&state), "/api/artists/5").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Artist 5 not found");
}

#[tokio::test]
async fn test_list_artists_and_shows() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let sax = create_test_artist(&state.db, "The Wild Sax Band").await;
    let guns = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_show(&state.db, sax.id, venue.id, days_from_now(3)).await;

    let (_, artists) = get_json(create_api_router(&state), "/api/artists").await;
    assert_eq!(
        artists,
        json!([
            { "id": guns.id, "name": "Guns N Petals" },
            { "id": sax.id, "name": "The Wild Sax Band" }
        ])
    );

    let (status, shows) = get_json(create_api_router(&state), "/api/shows").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shows.as_array().unwrap().len(), 1);
    assert_eq!(shows[0]["venue_name"], "The Musical Hop");
    assert_eq!(shows[0]["artist_id"], sax.id);
}

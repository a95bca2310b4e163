//! Integration tests for venue routes
//!
//! Tests the server-rendered venue pages including:
//! - Listing grouped by area
//! - Search (full page and htmx partial)
//! - Create/edit with validation
//! - Delete with cascading shows
//! - Flash cookie round trip

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sea_orm::{EntityTrait, PaginatorTrait};
use tower::util::ServiceExt;

use fyyur::create_router;
use fyyur::db::entities::{shows, venues};
use fyyur::state::AppState;
use fyyur::test_utils::*;

fn create_test_router(state: &AppState) -> Router {
    create_router(state.clone())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

const VALID_VENUE: &str = "name=The+Musical+Hop&city=San+Francisco&state=CA\
    &address=1015+Folsom+Street&phone=123-123-1234&genres=Jazz&genres=Reggae\
    &facebook_link=https%3A%2F%2Fwww.facebook.com%2FTheMusicalHop\
    &seeking_talent=y&seeking_description=We+are+on+the+lookout";

#[tokio::test]
async fn test_venues_page_groups_by_area() {
    let state = setup_test_app_state().await;
    let hop = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    create_test_venue(&state.db, "The Dueling Pianos Bar", "New York", "NY").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_show(&state.db, artist.id, hop.id, days_from_now(3)).await;

    let response = create_test_router(&state).oneshot(get("/venues")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("San Francisco, CA"));
    assert!(html.contains("New York, NY"));
    assert!(html.contains(&format!("/venues/{}", hop.id)));
    assert!(html.contains("1 upcoming show"));
}

#[tokio::test]
async fn test_search_full_page_and_partial() {
    let state = setup_test_app_state().await;
    create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    create_test_venue(&state.db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;

    let response = create_test_router(&state)
        .oneshot(post_form("/venues/search", "search_term=hop"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("The Musical Hop"));
    assert!(!html.contains("Park Square"));

    let request = Request::builder()
        .method("POST")
        .uri("/venues/search")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("HX-Request", "true")
        .body(Body::from("search_term=music"))
        .unwrap();
    let response = create_test_router(&state).oneshot(request).await.unwrap();
    let html = body_text(response).await;
    assert!(!html.contains("<!DOCTYPE html>"));
    assert!(html.contains("<strong>2</strong>"));
}

#[tokio::test]
async fn test_venue_detail_and_missing() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;

    let response = create_test_router(&state)
        .oneshot(get(&format!("/venues/{}", venue.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("The Musical Hop"));
    assert!(html.contains("Currently seeking talent"));
    assert!(html.contains("0 Upcoming Shows"));

    let response = create_test_router(&state)
        .oneshot(get("/venues/999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Venue 999 not found"));
}

#[tokio::test]
async fn test_create_venue_redirects_with_flash() {
    let state = setup_test_app_state().await;

    let response = create_test_router(&state)
        .oneshot(post_form("/venues/create", VALID_VENUE))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/venues");
    let cookie = response.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("fyyur_flash="));

    let saved = venues::Entity::find().all(&state.db).await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].genre_list(), vec!["Jazz", "Reggae"]);
    assert!(saved[0].seeking_talent);
    assert_eq!(saved[0].website_link, None);

    // The next page shows the message once and clears the cookie
    let flash_pair = cookie.split(';').next().unwrap().to_string();
    let request = Request::builder()
        .uri("/venues")
        .header(header::COOKIE, flash_pair)
        .body(Body::empty())
        .unwrap();
    let response = create_test_router(&state).oneshot(request).await.unwrap();
    let cleared = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(cleared.contains("Max-Age=0"));
    assert!(body_text(response).await.contains("Venue The Musical Hop was successfully listed!"));
}

#[tokio::test]
async fn test_invalid_venue_rerenders_form() {
    let state = setup_test_app_state().await;

    let response = create_test_router(&state)
        .oneshot(post_form(
            "/venues/create",
            "name=The+Musical+Hop&city=San+Francisco&state=ZZ&address=&phone=555&genres=Jazz",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Not a valid choice."));
    assert!(html.contains("Invalid phone number"));
    assert!(html.contains("This field is required."));
    // Submitted values survive the round trip
    assert!(html.contains(r#"value="The Musical Hop""#));
    assert_eq!(venues::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_long_links_are_stored_and_overlong_links_rejected() {
    let state = setup_test_app_state().await;
    let long_link = format!("https://www.facebook.com/{}", "x".repeat(150));
    let body = format!(
        "name=The+Musical+Hop&city=San+Francisco&state=CA&address=1015+Folsom+Street\
         &genres=Jazz&facebook_link={}",
        long_link
    );

    let response = create_test_router(&state)
        .oneshot(post_form("/venues/create", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let saved = venues::Entity::find().all(&state.db).await.unwrap();
    assert_eq!(saved[0].facebook_link.as_deref(), Some(long_link.as_str()));

    let overlong = format!("https://www.facebook.com/{}", "x".repeat(500));
    let response = create_test_router(&state)
        .oneshot(post_form(
            "/venues/create",
            &body.replace(&long_link, &overlong),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Field cannot be longer than 500 characters."));
    assert_eq!(venues::Entity::find().count(&state.db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_edit_venue_form_and_update() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;

    let response = create_test_router(&state)
        .oneshot(get(&format!("/venues/{}/edit", venue.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(&format!(r#"action="/venues/{}/edit""#, venue.id)));
    assert!(html.contains(r#"<option value="Jazz" selected>"#));

    let body = VALID_VENUE.replace("The+Musical+Hop", "The+Musical+Hop+Annex");
    let response = create_test_router(&state)
        .oneshot(post_form(&format!("/venues/{}/edit", venue.id), &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        format!("/venues/{}", venue.id).as_str()
    );

    let saved = venues::Entity::find_by_id(venue.id).one(&state.db).await.unwrap().unwrap();
    assert_eq!(saved.name, "The Musical Hop Annex");
}

#[tokio::test]
async fn test_invalid_edit_keeps_edit_action() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;

    let response = create_test_router(&state)
        .oneshot(post_form(&format!("/venues/{}/edit", venue.id), "name="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains(&format!(r#"action="/venues/{}/edit""#, venue.id)));
}

#[tokio::test]
async fn test_update_missing_venue_is_404() {
    let state = setup_test_app_state().await;

    let response = create_test_router(&state)
        .oneshot(post_form("/venues/12/edit", VALID_VENUE))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_venue_removes_shows() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_show(&state.db, artist.id, venue.id, days_from_now(2)).await;

    let response = create_test_router(&state)
        .oneshot(post_form(&format!("/venues/{}/delete", venue.id), ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert_eq!(venues::Entity::find().count(&state.db).await.unwrap(), 0);
    assert_eq!(shows::Entity::find().count(&state.db).await.unwrap(), 0);

    let response = create_test_router(&state)
        .oneshot(post_form(&format!("/venues/{}/delete", venue.id), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_renders_404_page() {
    let state = setup_test_app_state().await;

    let response = create_test_router(&state)
        .oneshot(get("/nowhere"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("404"));
}

//! Integration tests for artist routes

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use sea_orm::{EntityTrait, PaginatorTrait};
use tower::util::ServiceExt;

use fyyur::create_router;
use fyyur::db::entities::{artists, shows};
use fyyur::test_utils::*;

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

#[tokio::test]
async fn test_artists_page_lists_by_name() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "The Wild Sax Band").await;
    create_test_artist(&state.db, "Guns N Petals").await;

    let response = create_router(state.clone())
        .oneshot(Request::builder().uri("/artists").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    let guns = html.find("Guns N Petals").unwrap();
    let sax = html.find("The Wild Sax Band").unwrap();
    assert!(guns < sax);
}

#[tokio::test]
async fn test_create_artist_with_multiple_genres() {
    let state = setup_test_app_state().await;

    let response = create_router(state.clone())
        .oneshot(post_form(
            "/artists/create",
            "name=Matt+Quevedo&city=New+York&state=NY&phone=300-400-5000\
             &genres=Jazz&genres=R%26B&genres=Rock+n+Roll&seeking_venue=y",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/artists");

    let saved = artists::Entity::find().all(&state.db).await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].genre_list(), vec!["Jazz", "R&B", "Rock n Roll"]);
    assert!(saved[0].seeking_venue);
    assert_eq!(saved[0].phone.as_deref(), Some("300-400-5000"));
}

#[tokio::test]
async fn test_create_artist_rejects_unknown_genre() {
    let state = setup_test_app_state().await;

    let response = create_router(state.clone())
        .oneshot(post_form(
            "/artists/create",
            "name=Matt+Quevedo&city=New+York&state=NY&genres=Polka",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("is not a valid genre"));
    assert_eq!(artists::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_artist_detail_shows_past_and_upcoming() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "The Wild Sax Band").await;
    create_test_show(&state.db, artist.id, venue.id, days_from_now(6)).await;
    create_test_show(&state.db, artist.id, venue.id, days_from_now(-6)).await;
    create_test_show(&state.db, artist.id, venue.id, days_from_now(-12)).await;

    let response = create_router(state.clone())
        .oneshot(
            Request::builder()
                .uri(format!("/artists/{}", artist.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("1 Upcoming Show"));
    assert!(html.contains("2 Past Shows"));
    assert!(html.contains("Park Square Live Music &amp; Coffee"));
    assert!(html.contains(&format!("/venues/{}", venue.id)));
}

#[tokio::test]
async fn test_update_artist_redirects_to_detail() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;

    let response = create_router(state.clone())
        .oneshot(post_form(
            &format!("/artists/{}/edit", artist.id),
            "name=Guns+N+Petals&city=San+Francisco&state=CA&genres=Rock+n+Roll\
             &website_link=https%3A%2F%2Fwww.gunsnpetalsband.com",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        format!("/artists/{}", artist.id).as_str()
    );

    let saved = artists::Entity::find_by_id(artist.id).one(&state.db).await.unwrap().unwrap();
    assert_eq!(saved.website_link.as_deref(), Some("https://www.gunsnpetalsband.com"));
}

#[tokio::test]
async fn test_edit_missing_artist_is_404() {
    let state = setup_test_app_state().await;

    let response = create_router(state.clone())
        .oneshot(Request::builder().uri("/artists/3/edit").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_artist_removes_shows() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_show(&state.db, artist.id, venue.id, days_from_now(1)).await;

    let response = create_router(state.clone())
        .oneshot(post_form(&format!("/artists/{}/delete", artist.id), ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(artists::Entity::find().count(&state.db).await.unwrap(), 0);
    assert_eq!(shows::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_artist_search_partial() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "Guns N Petals").await;
    create_test_artist(&state.db, "Matt Quevedo").await;
    create_test_artist(&state.db, "The Wild Sax Band").await;

    let request = Request::builder()
        .method("POST")
        .uri("/artists/search")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("HX-Request", "true")
        .body(Body::from("search_term=BAND"))
        .unwrap();
    let response = create_router(state.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<strong>1</strong>"));
    assert!(html.contains("The Wild Sax Band"));
    assert!(!html.contains("Guns N Petals"));
}

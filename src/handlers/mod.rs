pub mod api;
pub mod artists;
pub mod health;
pub mod pages;
pub mod shows;
pub mod venues;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use maud::Markup;
use tracing::error;

use crate::{
    error::{AppError, Result},
    flash::{redirect_with_flash, FlashMessage},
    state::AppState,
};

pub fn html_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        // Venues
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/create",
            get(venues::new_venue_form).post(venues::create_venue),
        )
        .route("/venues/:id", get(venues::show_venue))
        .route("/venues/:id/delete", post(venues::delete_venue))
        .route(
            "/venues/:id/edit",
            get(venues::edit_venue_form).post(venues::update_venue),
        )
        // Artists
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/create",
            get(artists::new_artist_form).post(artists::create_artist),
        )
        .route("/artists/:id", get(artists::show_artist))
        .route("/artists/:id/delete", post(artists::delete_artist))
        .route(
            "/artists/:id/edit",
            get(artists::edit_artist_form).post(artists::update_artist),
        )
        // Shows
        .route("/shows", get(shows::list_shows))
        .route(
            "/shows/create",
            get(shows::new_show_form).post(shows::create_show),
        )
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(api::list_venues))
        .route("/venues/:id", get(api::get_venue))
        .route("/artists", get(api::list_artists))
        .route("/artists/:id", get(api::get_artist))
        .route("/shows", get(api::list_shows))
}

/// Requests issued by htmx carry `HX-Request: true`.
fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Re-rendered form after a rejected submission.
fn unprocessable(markup: Markup) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Html(markup.into_string())).into_response()
}

/// A failed write goes back to the home page with an error flash.
/// Missing records and rejected input still surface as their own responses.
fn recover_write(err: AppError, message: &str) -> Result<Response> {
    match err {
        AppError::NotFound(_) | AppError::Validation(_) => Err(err),
        other => {
            error!("{}: {}", message, other);
            Ok(redirect_with_flash("/", FlashMessage::error(message)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));
        headers.insert("HX-Request", "true".parse().unwrap());
        assert!(is_htmx(&headers));
    }

    #[test]
    fn test_recover_write_keeps_not_found() {
        let result = recover_write(AppError::NotFound("Venue 4 not found".into()), "failed");
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let response = recover_write(AppError::Internal("boom".into()), "failed").unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}

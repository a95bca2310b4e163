//! Fyyur: a booking directory for venues, artists and shows.
//!
//! The library exposes every module so integration tests can build the router.

pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod forms;
pub mod handlers;
pub mod services;
pub mod state;
pub mod templates;
pub mod test_utils;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/health", get(handlers::health::health_check))
        // JSON API
        .nest("/api", handlers::api_routes())
        // Server-rendered pages
        .merge(handlers::html_routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::pages::not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

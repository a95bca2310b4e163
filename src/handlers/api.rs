//! Read-only JSON views over the directory.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::{
    error::{ApiResult, AppError},
    services::{directory, Area, ArtistDetail, ShowListing, VenueDetail},
    state::AppState,
};

#[derive(Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

pub async fn list_venues(State(state): State<AppState>) -> ApiResult<Json<Vec<Area>>> {
    Ok(Json(directory::venue_areas(&state.db, Utc::now()).await?))
}

pub async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<VenueDetail>> {
    let venue = directory::venue_detail(&state.db, id, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;
    Ok(Json(venue))
}

pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<Vec<ArtistSummary>>> {
    let artists = directory::list_artists(&state.db)
        .await?
        .into_iter()
        .map(|(id, name)| ArtistSummary { id, name })
        .collect();
    Ok(Json(artists))
}

pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ArtistDetail>> {
    let artist = directory::artist_detail(&state.db, id, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;
    Ok(Json(artist))
}

pub async fn list_shows(State(state): State<AppState>) -> ApiResult<Json<Vec<ShowListing>>> {
    Ok(Json(directory::list_shows(&state.db).await?))
}

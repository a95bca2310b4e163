use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    Form,
};
use chrono::Utc;
use sea_orm::EntityTrait;
use tracing::{info, warn};

use super::{is_htmx, recover_write, unprocessable};
use crate::{
    db::entities::artists,
    error::{AppError, Result},
    flash::{redirect_with_flash, Flash, FlashMessage},
    forms::{ArtistForm, FormData, FormErrors},
    services::{booking, directory},
    state::AppState,
    templates::{
        artist_detail_page, artist_form_page, artists_page, search_results_page,
        search_results_partial, FormMode,
    },
};

pub async fn list_artists(State(state): State<AppState>, flash: Flash) -> Result<Response> {
    let artists = directory::list_artists(&state.db).await?;
    let page = artists_page(&artists, flash.message());
    Ok(flash.respond(page))
}

pub async fn search_artists(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let term = FormData::from(pairs).text("search_term");
    let results = directory::search_artists(&state.db, &term, Utc::now()).await?;
    tracing::debug!(term = %term, count = results.count, "Artist search");

    let markup = if is_htmx(&headers) {
        search_results_partial("artists", &term, &results)
    } else {
        search_results_page("artists", &term, &results)
    };
    Ok(Html(markup.into_string()).into_response())
}

pub async fn show_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    flash: Flash,
) -> Result<Response> {
    let artist = directory::artist_detail(&state.db, id, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

    let page = artist_detail_page(&artist, flash.message());
    Ok(flash.respond(page))
}

pub async fn new_artist_form(flash: Flash) -> Response {
    let page = artist_form_page(
        FormMode::Create,
        &ArtistForm::default(),
        &FormErrors::new(),
        flash.message(),
    );
    flash.respond(page)
}

pub async fn create_artist(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let form = ArtistForm::from_data(&FormData::from(pairs));

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            warn!(%errors, "Rejected artist submission");
            let notice = FlashMessage::error("Form validation failed. Artist could not be created.");
            return Ok(unprocessable(artist_form_page(
                FormMode::Create,
                &form,
                &errors,
                Some(&notice),
            )));
        }
    };

    match booking::create_artist(&state.db, input).await {
        Ok(artist) => Ok(redirect_with_flash(
            "/artists",
            FlashMessage::success(format!("Artist {} was successfully listed!", artist.name)),
        )),
        Err(err) => recover_write(
            err,
            &format!("An error occurred. Artist {} could not be listed.", form.name),
        ),
    }
}

pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    flash: Flash,
) -> Result<Response> {
    let artist = artists::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

    let page = artist_form_page(
        FormMode::Edit(id),
        &ArtistForm::from_model(&artist),
        &FormErrors::new(),
        flash.message(),
    );
    Ok(flash.respond(page))
}

pub async fn update_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let form = ArtistForm::from_data(&FormData::from(pairs));

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            warn!(artist_id = id, %errors, "Rejected artist update");
            let notice = FlashMessage::error("Form validation failed. Artist could not be updated.");
            return Ok(unprocessable(artist_form_page(
                FormMode::Edit(id),
                &form,
                &errors,
                Some(&notice),
            )));
        }
    };

    match booking::update_artist(&state.db, id, input).await {
        Ok(artist) => Ok(redirect_with_flash(
            &format!("/artists/{}", artist.id),
            FlashMessage::success(format!("Artist {} was successfully updated!", artist.name)),
        )),
        Err(err) => recover_write(err, "An error occurred. Artist could not be updated."),
    }
}

pub async fn delete_artist(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    match booking::delete_artist(&state.db, id).await {
        Ok(removed) => {
            info!(artist_id = id, "Artist removed through the web form");
            Ok(redirect_with_flash(
                "/",
                FlashMessage::success(format!("Artist {} was deleted.", removed.name)),
            ))
        }
        Err(err) => recover_write(err, &format!("An error occurred. Artist {} could not be deleted.", id)),
    }
}

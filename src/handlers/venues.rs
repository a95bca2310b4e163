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
    db::entities::venues,
    error::{AppError, Result},
    flash::{redirect_with_flash, Flash, FlashMessage},
    forms::{FormData, FormErrors, VenueForm},
    services::{booking, directory},
    state::AppState,
    templates::{
        search_results_page, search_results_partial, venue_detail_page, venue_form_page,
        venues_page, FormMode,
    },
};

pub async fn list_venues(State(state): State<AppState>, flash: Flash) -> Result<Response> {
    let areas = directory::venue_areas(&state.db, Utc::now()).await?;
    let page = venues_page(&areas, flash.message());
    Ok(flash.respond(page))
}

pub async fn search_venues(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let term = FormData::from(pairs).text("search_term");
    let results = directory::search_venues(&state.db, &term, Utc::now()).await?;
    tracing::debug!(term = %term, count = results.count, "Venue search");

    let markup = if is_htmx(&headers) {
        search_results_partial("venues", &term, &results)
    } else {
        search_results_page("venues", &term, &results)
    };
    Ok(Html(markup.into_string()).into_response())
}

pub async fn show_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    flash: Flash,
) -> Result<Response> {
    let venue = directory::venue_detail(&state.db, id, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

    let page = venue_detail_page(&venue, flash.message());
    Ok(flash.respond(page))
}

pub async fn new_venue_form(flash: Flash) -> Response {
    let page = venue_form_page(
        FormMode::Create,
        &VenueForm::default(),
        &FormErrors::new(),
        flash.message(),
    );
    flash.respond(page)
}

pub async fn create_venue(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let form = VenueForm::from_data(&FormData::from(pairs));

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            warn!(%errors, "Rejected venue submission");
            let notice = FlashMessage::error("Form validation failed. Venue could not be created.");
            return Ok(unprocessable(venue_form_page(
                FormMode::Create,
                &form,
                &errors,
                Some(&notice),
            )));
        }
    };

    match booking::create_venue(&state.db, input).await {
        Ok(venue) => Ok(redirect_with_flash(
            "/venues",
            FlashMessage::success(format!("Venue {} was successfully listed!", venue.name)),
        )),
        Err(err) => recover_write(
            err,
            &format!("An error occurred. Venue {} could not be listed.", form.name),
        ),
    }
}

pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    flash: Flash,
) -> Result<Response> {
    let venue = venues::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

    let page = venue_form_page(
        FormMode::Edit(id),
        &VenueForm::from_model(&venue),
        &FormErrors::new(),
        flash.message(),
    );
    Ok(flash.respond(page))
}

pub async fn update_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let form = VenueForm::from_data(&FormData::from(pairs));

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            warn!(venue_id = id, %errors, "Rejected venue update");
            let notice = FlashMessage::error("Form validation failed. Venue could not be updated.");
            return Ok(unprocessable(venue_form_page(
                FormMode::Edit(id),
                &form,
                &errors,
                Some(&notice),
            )));
        }
    };

    match booking::update_venue(&state.db, id, input).await {
        Ok(venue) => Ok(redirect_with_flash(
            &format!("/venues/{}", venue.id),
            FlashMessage::success(format!("Venue {} was successfully updated!", venue.name)),
        )),
        Err(err) => recover_write(err, "An error occurred. Venue could not be updated."),
    }
}

pub async fn delete_venue(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    match booking::delete_venue(&state.db, id).await {
        Ok(removed) => {
            info!(venue_id = id, "Venue removed through the web form");
            Ok(redirect_with_flash(
                "/",
                FlashMessage::success(format!("Venue {} was deleted.", removed.name)),
            ))
        }
        Err(err) => recover_write(err, &format!("An error occurred. Venue {} could not be deleted.", id)),
    }
}

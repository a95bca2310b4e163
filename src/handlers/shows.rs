use axum::{extract::State, response::Response, Form};
use chrono::Utc;
use tracing::warn;

use super::{recover_write, unprocessable};
use crate::{
    error::{AppError, Result},
    flash::{redirect_with_flash, Flash, FlashMessage},
    forms::{FormData, FormErrors, ShowForm},
    services::{booking, directory},
    state::AppState,
    templates::{show_form_page, shows_page},
};

pub async fn list_shows(State(state): State<AppState>, flash: Flash) -> Result<Response> {
    let shows = directory::list_shows(&state.db).await?;
    let page = shows_page(&shows, flash.message());
    Ok(flash.respond(page))
}

pub async fn new_show_form(flash: Flash) -> Response {
    let form = ShowForm::with_default_start(Utc::now());
    let page = show_form_page(&form, &FormErrors::new(), flash.message());
    flash.respond(page)
}

fn rejected(form: &ShowForm, errors: &FormErrors) -> Response {
    warn!(%errors, "Rejected show submission");
    let notice = FlashMessage::error("Form validation failed. Show could not be listed.");
    unprocessable(show_form_page(form, errors, Some(&notice)))
}

pub async fn create_show(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let form = ShowForm::from_data(&FormData::from(pairs));

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return Ok(rejected(&form, &errors)),
    };

    match booking::create_show(&state.db, input).await {
        Ok(_) => Ok(redirect_with_flash(
            "/shows",
            FlashMessage::success("Show was successfully listed!"),
        )),
        // Unknown artist or venue id
        Err(AppError::Validation(errors)) => Ok(rejected(&form, &errors)),
        Err(err) => recover_write(err, "An error occurred. Show could not be listed."),
    }
}

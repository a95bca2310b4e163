use axum::response::Response;

use crate::{flash::Flash, templates::home_page};

pub async fn index(flash: Flash) -> Response {
    let page = home_page(flash.message());
    flash.respond(page)
}

/// Fallback for unmatched routes.
pub async fn not_found() -> crate::error::AppError {
    crate::error::AppError::NotFound("The page you were looking for does not exist.".to_string())
}

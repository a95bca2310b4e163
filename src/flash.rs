//! One-shot flash messages carried across a redirect in a cookie.
//!
//! A handler that redirects attaches the message with [`redirect_with_flash`].
//! The next page handler extracts [`Flash`], renders the message, and clears
//! the cookie through [`Flash::respond`].

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use maud::Markup;
use std::convert::Infallible;

pub const FLASH_COOKIE: &str = "fyyur_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
    Info,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// Cookie-safe encoding of `level|message`.
    pub fn encode(&self) -> String {
        urlencoding::encode(&format!("{}|{}", self.level.as_str(), self.message)).into_owned()
    }

    pub fn decode(raw: &str) -> Option<Self> {
        let decoded = urlencoding::decode(raw).ok()?;
        let (level, message) = decoded.split_once('|')?;
        Some(Self {
            level: FlashLevel::from_str(level)?,
            message: message.to_string(),
        })
    }

    fn set_cookie(&self) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            self.encode()
        )
    }
}

fn clear_cookie() -> String {
    format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", FLASH_COOKIE)
}

/// 303 redirect that leaves a flash message for the next page.
pub fn redirect_with_flash(to: &str, flash: FlashMessage) -> Response {
    (
        AppendHeaders([(header::SET_COOKIE, flash.set_cookie())]),
        Redirect::to(to),
    )
        .into_response()
}

/// The flash message left by the previous response, if any.
#[derive(Debug, Clone, Default)]
pub struct Flash(pub Option<FlashMessage>);

impl Flash {
    pub fn message(&self) -> Option<&FlashMessage> {
        self.0.as_ref()
    }

    pub fn respond(self, markup: Markup) -> Response {
        self.respond_with_status(StatusCode::OK, markup)
    }

    /// Render a page, clearing the flash cookie if one was consumed.
    fn respond_with_status(self, status: StatusCode, markup: Markup) -> Response {
        let body = Html(markup.into_string());
        if self.0.is_some() {
            (
                status,
                AppendHeaders([(header::SET_COOKIE, clear_cookie())]),
                body,
            )
                .into_response()
        } else {
            (status, body).into_response()
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let message = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == FLASH_COOKIE)
            .and_then(|(_, value)| FlashMessage::decode(value));

        Ok(Flash(message))
    }
}

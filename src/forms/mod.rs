//! Form parsing and validation.
//!
//! Handlers receive URL-encoded bodies as ordered `(key, value)` pairs so that
//! multi-select fields (`genres`) keep every submitted value. Each form keeps
//! the raw strings for re-rendering and exposes `validate()`, which yields a
//! typed input record or a [`FormErrors`] map keyed by field name.

mod artist;
mod show;
mod venue;

pub use artist::{ArtistForm, ArtistInput};
pub use show::{parse_start_time, ShowForm, ShowInput, START_TIME_FORMAT};
pub use venue::{VenueForm, VenueInput};

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

use crate::db::enums::{Genre, UsState};

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Not a valid choice.";
pub const INVALID_PHONE: &str = "Invalid phone number. Use a format like 123-456-7890.";
pub const INVALID_URL: &str = "Invalid URL.";

/// Column widths of the bounded text fields.
const MAX_SHORT_LEN: usize = 120;
const MAX_LONG_LEN: usize = 500;

fn too_long(max: usize) -> String {
    format!("Field cannot be longer than {} characters.", max)
}

/// Accepts 1234567890, 123.456.7890, 123-456-7890, 123 456 7890 and (123) 456-7890.
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-. ]?([0-9]{4})$")
        .expect("phone pattern is valid")
});

pub fn is_valid_phone(number: &str) -> bool {
    PHONE_PATTERN.is_match(number)
}

/// Absolute http(s) URL with a host.
pub fn is_valid_url(link: &str) -> bool {
    match url::Url::parse(link) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Per-field validation messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        // First error for a field wins
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Ordered view over a decoded URL-encoded body.
#[derive(Debug, Clone, Default)]
pub struct FormData(Vec<(String, String)>);

impl FormData {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value for `key`, trimmed. Missing keys read as "".
    pub fn text(&self, key: &str) -> String {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Every non-empty value submitted for `key`, in order.
    pub fn all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Checkbox semantics: unchecked boxes are simply absent from the body.
    pub fn checked(&self, key: &str) -> bool {
        self.0.iter().any(|(k, v)| {
            k == key
                && matches!(
                    v.trim().to_ascii_lowercase().as_str(),
                    "y" | "yes" | "on" | "true" | "1"
                )
        })
    }
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

fn required(errors: &mut FormErrors, field: &'static str, value: &str) -> String {
    if value.is_empty() {
        errors.add(field, REQUIRED);
    }
    value.to_string()
}

fn max_length(errors: &mut FormErrors, field: &'static str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(field, too_long(max));
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn optional_url(errors: &mut FormErrors, field: &'static str, value: &str) -> Option<String> {
    let link = optional(value)?;
    if !is_valid_url(&link) {
        errors.add(field, INVALID_URL);
    }
    max_length(errors, field, &link, MAX_LONG_LEN);
    Some(link)
}

fn optional_phone(errors: &mut FormErrors, value: &str) -> Option<String> {
    let phone = optional(value)?;
    if !is_valid_phone(&phone) {
        errors.add("phone", INVALID_PHONE);
    }
    Some(phone)
}

fn us_state(errors: &mut FormErrors, value: &str) -> Option<UsState> {
    if value.is_empty() {
        errors.add("state", REQUIRED);
        return None;
    }
    let state = UsState::from_str(value);
    if state.is_none() {
        errors.add("state", INVALID_CHOICE);
    }
    state
}

fn genre_list(errors: &mut FormErrors, values: &[String]) -> Vec<Genre> {
    if values.is_empty() {
        errors.add("genres", REQUIRED);
        return Vec::new();
    }

    let mut genres = Vec::with_capacity(values.len());
    for value in values {
        match Genre::from_str(value) {
            Some(genre) if !genres.contains(&genre) => genres.push(genre),
            Some(_) => {}
            None => errors.add("genres", format!("'{}' is not a valid genre.", value)),
        }
    }
    genres
}

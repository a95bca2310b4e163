pub mod artists;
pub mod shows;
pub mod venues;

pub use artists::Entity as Artist;
pub use shows::Entity as Show;
pub use venues::Entity as Venue;

/// Decode a JSON-encoded genre column. Undecodable values read as no genres.
pub(crate) fn decode_genres(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Encode a genre list for storage.
pub(crate) fn encode_genres(genres: &[String]) -> String {
    serde_json::to_string(genres).unwrap_or_else(|_| "[]".to_string())
}

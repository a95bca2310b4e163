//! Test utilities for Fyyur
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - AppState factories
//! - Venue, artist and show factories

use chrono::{DateTime, Duration, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

use crate::{
    config::{Config, LogFormat},
    db::entities::{artists, encode_genres, shows, venues},
    state::AppState,
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database, so tests can run in parallel
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 5000,
        static_dir: "static".to_string(),
        log_format: LogFormat::Text,
    }
}

/// Create a complete test AppState backed by a fresh database
pub async fn setup_test_app_state() -> AppState {
    AppState::new(setup_test_db().await, test_config())
}

// ============================================================================
// Test Data Factories
// ============================================================================

/// Create a test venue in the database
pub async fn create_test_venue(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> venues::Model {
    let now = Utc::now().into();
    let venue = venues::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        address: Set("1015 Folsom Street".to_string()),
        genres: Set(encode_genres(&["Jazz".to_string(), "Folk".to_string()])),
        phone: Set(Some("123-123-1234".to_string())),
        image_link: Set(None),
        facebook_link: Set(None),
        website_link: Set(None),
        seeking_talent: Set(true),
        seeking_description: Set(Some("Looking for local acts".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    venue.insert(db).await.expect("Failed to insert test venue")
}

/// Create a test artist in the database
pub async fn create_test_artist(db: &DatabaseConnection, name: &str) -> artists::Model {
    let now = Utc::now().into();
    let artist = artists::ActiveModel {
        name: Set(name.to_string()),
        city: Set("San Francisco".to_string()),
        state: Set("CA".to_string()),
        phone: Set(None),
        genres: Set(encode_genres(&["Rock n Roll".to_string()])),
        image_link: Set(None),
        facebook_link: Set(None),
        website_link: Set(None),
        seeking_venue: Set(false),
        seeking_description: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    artist.insert(db).await.expect("Failed to insert test artist")
}

/// Create a test show in the database
pub async fn create_test_show(
    db: &DatabaseConnection,
    artist_id: i32,
    venue_id: i32,
    start_time: DateTime<Utc>,
) -> shows::Model {
    let show = shows::ActiveModel {
        artist_id: Set(artist_id),
        venue_id: Set(venue_id),
        start_time: Set(start_time.into()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    show.insert(db).await.expect("Failed to insert test show")
}

/// A start time `days` from now; negative values lie in the past.
pub fn days_from_now(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        let venues = venues::Entity::find().all(&db).await.unwrap();
        assert_eq!(venues.len(), 0);
    }

    #[tokio::test]
    async fn test_create_test_show() {
        let db = setup_test_db().await;
        let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = create_test_artist(&db, "Guns N Petals").await;
        let show = create_test_show(&db, artist.id, venue.id, days_from_now(3)).await;

        assert_eq!(show.venue_id, venue.id);
        assert_eq!(show.artist_id, artist.id);
        assert_eq!(venue.genre_list(), vec!["Jazz", "Folk"]);
    }

    #[tokio::test]
    async fn test_parallel_databases() {
        let (db1, db2) = tokio::join!(setup_test_db(), setup_test_db());

        let artist1 = create_test_artist(&db1, "Artist 1").await;
        let artist2 = create_test_artist(&db2, "Artist 2").await;

        // Separate databases hand out the same first id
        assert_eq!(artist1.id, 1);
        assert_eq!(artist2.id, 1);

        let db1_artists = artists::Entity::find().all(&db1).await.unwrap();
        assert_eq!(db1_artists.len(), 1);
        assert_eq!(db1_artists[0].name, "Artist 1");
    }
}

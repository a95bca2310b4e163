//! Write-side operations. Each runs in its own transaction: any error before
//! `commit` drops the transaction, which rolls it back.

use chrono::Utc;
use sea_orm::{
    prelude::DateTimeWithTimeZone, ActiveModelTrait, ColumnTrait, DatabaseConnection,
    EntityTrait, ModelTrait, QueryFilter, Set, TransactionTrait,
};
use tracing::info;

use crate::{
    db::entities::{artists, encode_genres, shows, venues},
    db::enums::Genre,
    error::{AppError, Result},
    forms::{ArtistInput, FormErrors, ShowInput, VenueInput},
};

/// What a cascading delete removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub id: i32,
    pub name: String,
    pub shows_removed: u64,
}

fn genre_column(genres: &[Genre]) -> String {
    let names: Vec<String> = genres.iter().map(|g| g.as_str().to_string()).collect();
    encode_genres(&names)
}

fn apply_venue(active: &mut venues::ActiveModel, input: VenueInput, now: DateTimeWithTimeZone) {
    active.name = Set(input.name);
    active.city = Set(input.city);
    active.state = Set(input.state.as_str().to_string());
    active.address = Set(input.address);
    active.phone = Set(input.phone);
    active.genres = Set(genre_column(&input.genres));
    active.image_link = Set(input.image_link);
    active.facebook_link = Set(input.facebook_link);
    active.website_link = Set(input.website_link);
    active.seeking_talent = Set(input.seeking_talent);
    active.seeking_description = Set(input.seeking_description);
    active.updated_at = Set(now);
}

fn apply_artist(active: &mut artists::ActiveModel, input: ArtistInput, now: DateTimeWithTimeZone) {
    active.name = Set(input.name);
    active.city = Set(input.city);
    active.state = Set(input.state.as_str().to_string());
    active.phone = Set(input.phone);
    active.genres = Set(genre_column(&input.genres));
    active.image_link = Set(input.image_link);
    active.facebook_link = Set(input.facebook_link);
    active.website_link = Set(input.website_link);
    active.seeking_venue = Set(input.seeking_venue);
    active.seeking_description = Set(input.seeking_description);
    active.updated_at = Set(now);
}

pub async fn create_venue(db: &DatabaseConnection, input: VenueInput) -> Result<venues::Model> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let txn = db.begin().await?;

    let mut active = venues::ActiveModel {
        created_at: Set(now),
        ..Default::default()
    };
    apply_venue(&mut active, input, now);
    let venue = active.insert(&txn).await?;

    txn.commit().await?;
    info!(venue_id = venue.id, "Created venue '{}'", venue.name);
    Ok(venue)
}

pub async fn update_venue(
    db: &DatabaseConnection,
    id: i32,
    input: VenueInput,
) -> Result<venues::Model> {
    let txn = db.begin().await?;

    let existing = venues::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

    let mut active: venues::ActiveModel = existing.into();
    apply_venue(&mut active, input, Utc::now().into());
    let venue = active.update(&txn).await?;

    txn.commit().await?;
    info!(venue_id = venue.id, "Updated venue '{}'", venue.name);
    Ok(venue)
}

/// Delete a venue together with all of its shows.
pub async fn delete_venue(db: &DatabaseConnection, id: i32) -> Result<Removed> {
    let txn = db.begin().await?;

    let venue = venues::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

    let shows_removed = shows::Entity::delete_many()
        .filter(shows::Column::VenueId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;

    let name = venue.name.clone();
    venue.delete(&txn).await?;

    txn.commit().await?;
    info!(venue_id = id, shows_removed, "Deleted venue '{}'", name);
    Ok(Removed {
        id,
        name,
        shows_removed,
    })
}

pub async fn create_artist(db: &DatabaseConnection, input: ArtistInput) -> Result<artists::Model> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let txn = db.begin().await?;

    let mut active = artists::ActiveModel {
        created_at: Set(now),
        ..Default::default()
    };
    apply_artist(&mut active, input, now);
    let artist = active.insert(&txn).await?;

    txn.commit().await?;
    info!(artist_id = artist.id, "Created artist '{}'", artist.name);
    Ok(artist)
}

pub async fn update_artist(
    db: &DatabaseConnection,
    id: i32,
    input: ArtistInput,
) -> Result<artists::Model> {
    let txn = db.begin().await?;

    let existing = artists::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

    let mut active: artists::ActiveModel = existing.into();
    apply_artist(&mut active, input, Utc::now().into());
    let artist = active.update(&txn).await?;

    txn.commit().await?;
    info!(artist_id = artist.id, "Updated artist '{}'", artist.name);
    Ok(artist)
}

/// Delete an artist together with all of their shows.
pub async fn delete_artist(db: &DatabaseConnection, id: i32) -> Result<Removed> {
    let txn = db.begin().await?;

    let artist = artists::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

    let shows_removed = shows::Entity::delete_many()
        .filter(shows::Column::ArtistId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;

    let name = artist.name.clone();
    artist.delete(&txn).await?;

    txn.commit().await?;
    info!(artist_id = id, shows_removed, "Deleted artist '{}'", name);
    Ok(Removed {
        id,
        name,
        shows_removed,
    })
}

/// Book a show. Both parents must exist; a missing one is reported against
/// its form field as [`AppError::Validation`].
pub async fn create_show(db: &DatabaseConnection, input: ShowInput) -> Result<shows::Model> {
    let txn = db.begin().await?;

    let mut errors = FormErrors::new();
    if artists::Entity::find_by_id(input.artist_id).one(&txn).await?.is_none() {
        errors.add("artist_id", format!("No artist with ID {}.", input.artist_id));
    }
    if venues::Entity::find_by_id(input.venue_id).one(&txn).await?.is_none() {
        errors.add("venue_id", format!("No venue with ID {}.", input.venue_id));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let show = shows::ActiveModel {
        artist_id: Set(input.artist_id),
        venue_id: Set(input.venue_id),
        start_time: Set(input.start_time.into()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!(
        show_id = show.id,
        artist_id = show.artist_id,
        venue_id = show.venue_id,
        "Listed show starting {}",
        show.start_time
    );
    Ok(show)
}

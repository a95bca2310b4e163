//! Read-side queries: area grouping, search, detail pages and the show list.
//!
//! Every function that classifies shows takes `now` explicitly; a show is
//! upcoming when its start time is strictly after `now`, past otherwise.

use chrono::{DateTime, Utc};
use sea_orm::{
    prelude::{DateTimeWithTimeZone, Expr},
    sea_query::{Func, LikeExpr},
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::{
    db::entities::{artists, shows, venues},
    error::Result,
};

/// One row of a listing or search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Venues sharing a city and state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<DirectoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<DirectoryEntry>,
}

/// A show as seen from a venue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct VenueShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

/// A show as seen from an artist page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct ArtistShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

/// A row of the shows page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct ShowListing {
    pub id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Count upcoming shows grouped by `owner` (the venue or artist foreign key).
async fn upcoming_counts<C: ConnectionTrait>(
    db: &C,
    owner: shows::Column,
    now: DateTime<Utc>,
) -> Result<HashMap<i32, i64>> {
    let now: DateTimeWithTimeZone = now.into();

    let rows: Vec<(i32, i64)> = shows::Entity::find()
        .select_only()
        .column(owner)
        .column_as(Expr::col(shows::Column::Id).count(), "upcoming")
        .filter(shows::Column::StartTime.gt(now))
        .group_by(owner)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows.into_iter().collect())
}

fn entries(
    rows: Vec<(i32, String)>,
    counts: &HashMap<i32, i64>,
) -> Vec<DirectoryEntry> {
    rows.into_iter()
        .map(|(id, name)| DirectoryEntry {
            id,
            name,
            num_upcoming_shows: counts.get(&id).copied().unwrap_or(0),
        })
        .collect()
}

/// Substring pattern over a lowercased name. `%`, `_` and `\` in the term
/// match literally.
fn like_pattern(term: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(term.len() + 2);
    for c in term.trim().to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    LikeExpr::new(format!("%{}%", escaped)).escape('\\')
}

/// All venues grouped into areas, ordered by city then state.
pub async fn venue_areas<C: ConnectionTrait>(db: &C, now: DateTime<Utc>) -> Result<Vec<Area>> {
    let rows: Vec<(i32, String, String, String)> = venues::Entity::find()
        .select_only()
        .column(venues::Column::Id)
        .column(venues::Column::Name)
        .column(venues::Column::City)
        .column(venues::Column::State)
        .order_by_asc(venues::Column::City)
        .order_by_asc(venues::Column::State)
        .order_by_asc(venues::Column::Name)
        .into_tuple()
        .all(db)
        .await?;

    let counts = upcoming_counts(db, shows::Column::VenueId, now).await?;

    let mut areas: Vec<Area> = Vec::new();
    for (id, name, city, state) in rows {
        let entry = DirectoryEntry {
            id,
            name,
            num_upcoming_shows: counts.get(&id).copied().unwrap_or(0),
        };

        // Rows arrive sorted by (city, state), so an area is always the last one pushed
        match areas.last_mut() {
            Some(area) if area.city == city && area.state == state => area.venues.push(entry),
            _ => areas.push(Area {
                city,
                state,
                venues: vec![entry],
            }),
        }
    }

    Ok(areas)
}

/// Case-insensitive partial match on venue name.
pub async fn search_venues<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults> {
    let rows: Vec<(i32, String)> = venues::Entity::find()
        .select_only()
        .column(venues::Column::Id)
        .column(venues::Column::Name)
        .filter(Expr::expr(Func::lower(Expr::col(venues::Column::Name))).like(like_pattern(term)))
        .order_by_asc(venues::Column::Name)
        .into_tuple()
        .all(db)
        .await?;

    let counts = upcoming_counts(db, shows::Column::VenueId, now).await?;
    let data = entries(rows, &counts);

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

/// Case-insensitive partial match on artist name.
pub async fn search_artists<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults> {
    let rows: Vec<(i32, String)> = artists::Entity::find()
        .select_only()
        .column(artists::Column::Id)
        .column(artists::Column::Name)
        .filter(Expr::expr(Func::lower(Expr::col(artists::Column::Name))).like(like_pattern(term)))
        .order_by_asc(artists::Column::Name)
        .into_tuple()
        .all(db)
        .await?;

    let counts = upcoming_counts(db, shows::Column::ArtistId, now).await?;
    let data = entries(rows, &counts);

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

/// Every artist, ordered by name.
pub async fn list_artists<C: ConnectionTrait>(db: &C) -> Result<Vec<(i32, String)>> {
    Ok(artists::Entity::find()
        .select_only()
        .column(artists::Column::Id)
        .column(artists::Column::Name)
        .order_by_asc(artists::Column::Name)
        .order_by_asc(artists::Column::Id)
        .into_tuple()
        .all(db)
        .await?)
}

/// Split shows sorted by start time into (past newest-first, upcoming soonest-first).
fn split_by_time<T>(
    shows: Vec<T>,
    start: impl Fn(&T) -> DateTimeWithTimeZone,
    now: DateTime<Utc>,
) -> (Vec<T>, Vec<T>) {
    let (upcoming, mut past): (Vec<T>, Vec<T>) =
        shows.into_iter().partition(|show| start(show) > now);
    past.reverse();
    (past, upcoming)
}

pub async fn venue_detail<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTime<Utc>,
) -> Result<Option<VenueDetail>> {
    let Some(venue) = venues::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let rows: Vec<VenueShow> = shows::Entity::find()
        .filter(shows::Column::VenueId.eq(id))
        .select_only()
        .column(shows::Column::ArtistId)
        .column_as(artists::Column::Name, "artist_name")
        .column_as(artists::Column::ImageLink, "artist_image_link")
        .column(shows::Column::StartTime)
        .join(JoinType::InnerJoin, shows::Relation::Artists.def())
        .order_by_asc(shows::Column::StartTime)
        .into_model::<VenueShow>()
        .all(db)
        .await?;

    let (past_shows, upcoming_shows) = split_by_time(rows, |s| s.start_time, now);
    let genres = venue.genre_list();

    Ok(Some(VenueDetail {
        id: venue.id,
        name: venue.name,
        genres,
        address: venue.address,
        city: venue.city,
        state: venue.state,
        phone: venue.phone,
        website_link: venue.website_link,
        facebook_link: venue.facebook_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        image_link: venue.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

pub async fn artist_detail<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTime<Utc>,
) -> Result<Option<ArtistDetail>> {
    let Some(artist) = artists::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let rows: Vec<ArtistShow> = shows::Entity::find()
        .filter(shows::Column::ArtistId.eq(id))
        .select_only()
        .column(shows::Column::VenueId)
        .column_as(venues::Column::Name, "venue_name")
        .column_as(venues::Column::ImageLink, "venue_image_link")
        .column(shows::Column::StartTime)
        .join(JoinType::InnerJoin, shows::Relation::Venues.def())
        .order_by_asc(shows::Column::StartTime)
        .into_model::<ArtistShow>()
        .all(db)
        .await?;

    let (past_shows, upcoming_shows) = split_by_time(rows, |s| s.start_time, now);
    let genres = artist.genre_list();

    Ok(Some(ArtistDetail {
        id: artist.id,
        name: artist.name,
        genres,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        website_link: artist.website_link,
        facebook_link: artist.facebook_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        image_link: artist.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// Every show joined with its venue and artist, ordered by start time.
pub async fn list_shows<C: ConnectionTrait>(db: &C) -> Result<Vec<ShowListing>> {
    Ok(shows::Entity::find()
        .select_only()
        .column(shows::Column::Id)
        .column(shows::Column::VenueId)
        .column_as(venues::Column::Name, "venue_name")
        .column(shows::Column::ArtistId)
        .column_as(artists::Column::Name, "artist_name")
        .column_as(artists::Column::ImageLink, "artist_image_link")
        .column(shows::Column::StartTime)
        .join(JoinType::InnerJoin, shows::Relation::Venues.def())
        .join(JoinType::InnerJoin, shows::Relation::Artists.def())
        .order_by_asc(shows::Column::StartTime)
        .order_by_asc(shows::Column::Id)
        .into_model::<ShowListing>()
        .all(db)
        .await?)
}

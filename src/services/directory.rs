//! Read models for the booking directory: venue areas, listings, name
//! search and per-venue/per-artist show partitions.

use chrono::NaiveDateTime;
use sea_orm::{
    sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr},
    ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, LoaderTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;

use crate::{
    db::entities::{artist, show, venue},
    error::{AppError, Result},
    services::time_format::{format_timestamp, DateFormat},
};

/// The `{id, name}` pair used by every listing and search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub id: i32,
    pub name: String,
}

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<Summary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<Summary>,
}

impl From<Vec<Summary>> for SearchResults {
    fn from(data: Vec<Summary>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// A show as seen from its venue's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistAppearance {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// A show as seen from its artist's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueBooking {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    pub venue: venue::Model,
    pub past_shows: Vec<ArtistAppearance>,
    pub upcoming_shows: Vec<ArtistAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    pub artist: artist::Model,
    pub past_shows: Vec<VenueBooking>,
    pub upcoming_shows: Vec<VenueBooking>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// Which side of `now` a show falls on. Shows starting exactly at `now`
/// belong to neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    Past,
    Upcoming,
}

impl Window {
    fn condition(self, now: NaiveDateTime) -> SimpleExpr {
        match self {
            Self::Past => show::Column::StartTime.lt(now),
            Self::Upcoming => show::Column::StartTime.gt(now),
        }
    }
}

const LIKE_ESCAPE: char = '!';

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive "name contains term" that treats LIKE wildcards in the
/// term literally.
fn name_contains(column: impl IntoColumnRef, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

pub async fn venue_areas<C: ConnectionTrait>(db: &C) -> Result<Vec<Area>> {
    let locations: Vec<(String, String)> = venue::Entity::find()
        .select_only()
        .column(venue::Column::City)
        .column(venue::Column::State)
        .distinct()
        .order_by_asc(venue::Column::State)
        .order_by_asc(venue::Column::City)
        .into_tuple()
        .all(db)
        .await?;

    let mut areas = Vec::with_capacity(locations.len());
    for (city, state) in locations {
        let venues = venue::Entity::find()
            .filter(venue::Column::City.eq(city.as_str()))
            .filter(venue::Column::State.eq(state.as_str()))
            .order_by_asc(venue::Column::Name)
            .all(db)
            .await?
            .into_iter()
            .map(|v| Summary {
                id: v.id,
                name: v.name,
            })
            .collect();

        areas.push(Area {
            city,
            state,
            venues,
        });
    }

    Ok(areas)
}

pub async fn list_artists<C: ConnectionTrait>(db: &C) -> Result<Vec<Summary>> {
    let artists = artist::Entity::find()
        .order_by_asc(artist::Column::Name)
        .all(db)
        .await?;

    Ok(artists
        .into_iter()
        .map(|a| Summary {
            id: a.id,
            name: a.name,
        })
        .collect())
}

/// SQLite's `LOWER()` only folds ASCII, so on that backend the match runs
/// here with the same Unicode folding applied to both sides.
fn folds_in_store<C: ConnectionTrait>(db: &C) -> bool {
    db.get_database_backend() != DbBackend::Sqlite
}

fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

fn search_results(rows: Vec<Summary>, term: &str, prefiltered: bool) -> SearchResults {
    rows.into_iter()
        .filter(|s| prefiltered || name_matches(&s.name, term))
        .collect::<Vec<_>>()
        .into()
}

pub async fn search_venues<C: ConnectionTrait>(db: &C, term: &str) -> Result<SearchResults> {
    let in_store = folds_in_store(db);
    let mut query = venue::Entity::find().order_by_asc(venue::Column::Name);
    if in_store {
        query = query.filter(name_contains(venue::Column::Name, term));
    }

    let venues = query.all(db).await?;
    let rows = venues
        .into_iter()
        .map(|v| Summary {
            id: v.id,
            name: v.name,
        })
        .collect();

    Ok(search_results(rows, term, in_store))
}

pub async fn search_artists<C: ConnectionTrait>(db: &C, term: &str) -> Result<SearchResults> {
    let in_store = folds_in_store(db);
    let mut query = artist::Entity::find().order_by_asc(artist::Column::Name);
    if in_store {
        query = query.filter(name_contains(artist::Column::Name, term));
    }

    let artists = query.all(db).await?;
    let rows = artists
        .into_iter()
        .map(|a| Summary {
            id: a.id,
            name: a.name,
        })
        .collect();

    Ok(search_results(rows, term, in_store))
}

async fn appearances_at<C: ConnectionTrait>(
    db: &C,
    venue_id: i32,
    window: Window,
    now: NaiveDateTime,
) -> Result<Vec<ArtistAppearance>> {
    let rows = show::Entity::find()
        .filter(show::Column::VenueId.eq(venue_id))
        .filter(window.condition(now))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(artist::Entity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(show, artist)| {
            artist.map(|a| ArtistAppearance {
                artist_id: a.id,
                artist_name: a.name,
                artist_image_link: a.image_link,
                start_time: format_timestamp(&show.start_time, DateFormat::default()),
            })
        })
        .collect())
}

async fn bookings_for<C: ConnectionTrait>(
    db: &C,
    artist_id: i32,
    window: Window,
    now: NaiveDateTime,
) -> Result<Vec<VenueBooking>> {
    let rows = show::Entity::find()
        .filter(show::Column::ArtistId.eq(artist_id))
        .filter(window.condition(now))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(venue::Entity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(show, venue)| {
            venue.map(|v| VenueBooking {
                venue_id: v.id,
                venue_name: v.name,
                venue_image_link: v.image_link,
                start_time: format_timestamp(&show.start_time, DateFormat::default()),
            })
        })
        .collect())
}

/// Venue page model. Shows are split around `now`, each side taken from its
/// own filtered query.
pub async fn venue_detail<C: ConnectionTrait>(
    db: &C,
    venue_id: i32,
    now: NaiveDateTime,
) -> Result<VenueDetail> {
    let venue = venue::Entity::find_by_id(venue_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", venue_id)))?;

    let past_shows = appearances_at(db, venue_id, Window::Past, now).await?;
    let upcoming_shows = appearances_at(db, venue_id, Window::Upcoming, now).await?;

    Ok(VenueDetail {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

pub async fn artist_detail<C: ConnectionTrait>(
    db: &C,
    artist_id: i32,
    now: NaiveDateTime,
) -> Result<ArtistDetail> {
    let artist = artist::Entity::find_by_id(artist_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", artist_id)))?;

    let past_shows = bookings_for(db, artist_id, Window::Past, now).await?;
    let upcoming_shows = bookings_for(db, artist_id, Window::Upcoming, now).await?;

    Ok(ArtistDetail {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

pub async fn find_venue<C: ConnectionTrait>(db: &C, venue_id: i32) -> Result<venue::Model> {
    venue::Entity::find_by_id(venue_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", venue_id)))
}

pub async fn find_artist<C: ConnectionTrait>(db: &C, artist_id: i32) -> Result<artist::Model> {
    artist::Entity::find_by_id(artist_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", artist_id)))
}

/// Every show with both parties resolved, earliest first.
pub async fn list_shows<C: ConnectionTrait>(db: &C) -> Result<Vec<ShowListing>> {
    let shows = show::Entity::find()
        .order_by_asc(show::Column::StartTime)
        .all(db)
        .await?;

    let venues = shows.load_one(venue::Entity, db).await?;
    let artists = shows.load_one(artist::Entity, db).await?;

    Ok(shows
        .into_iter()
        .zip(venues)
        .zip(artists)
        .filter_map(|((show, venue), artist)| {
            let (venue, artist) = (venue?, artist?);
            Some(ShowListing {
                venue_id: venue.id,
                venue_name: venue.name,
                artist_id: artist.id,
                artist_name: artist.name,
                artist_image_link: artist.image_link,
                start_time: format_timestamp(&show.start_time, DateFormat::default()),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use chrono::{Duration, NaiveDate};
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%_a!b"), "100!%!_a!!b");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[tokio::test]
    async fn test_venue_areas_group_by_city_and_state() {
        let db = setup_test_db().await;
        let hop = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let pianos = create_test_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;
        let park = create_test_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;

        let areas = venue_areas(&db).await.unwrap();

        assert_eq!(
            areas,
            vec![
                Area {
                    city: "San Francisco".to_string(),
                    state: "CA".to_string(),
                    venues: vec![
                        Summary { id: park.id, name: park.name.clone() },
                        Summary { id: hop.id, name: hop.name.clone() },
                    ],
                },
                Area {
                    city: "New York".to_string(),
                    state: "NY".to_string(),
                    venues: vec![Summary { id: pianos.id, name: pianos.name.clone() }],
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_same_city_different_state_are_separate_areas() {
        let db = setup_test_db().await;
        create_test_venue(&db, "Opry", "Portland", "OR").await;
        create_test_venue(&db, "Harbor", "Portland", "ME").await;

        let areas = venue_areas(&db).await.unwrap();
        assert_eq!(areas.len(), 2);
        assert!(areas.iter().all(|a| a.venues.len() == 1));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let db = setup_test_db().await;
        create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        create_test_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
        create_test_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;

        let results = search_venues(&db, "MUSIC").await.unwrap();
        let names: Vec<&str> = results.data.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(results.count, 2);
        assert_eq!(names, vec!["Park Square Live Music & Coffee", "The Musical Hop"]);

        let results = search_venues(&db, "hop").await.unwrap();
        assert_eq!(results.count, 1);

        let results = search_venues(&db, "nothing like this").await.unwrap();
        assert_eq!(results.count, 0);
        assert!(results.data.is_empty());
    }

    #[tokio::test]
    async fn test_empty_search_matches_everything() {
        let db = setup_test_db().await;
        create_test_artist(&db, "Guns N Petals", "San Francisco", "CA").await;
        create_test_artist(&db, "Matt Quevedo", "New York", "NY").await;

        let results = search_artists(&db, "").await.unwrap();
        assert_eq!(results.count, 2);
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let db = setup_test_db().await;
        create_test_artist(&db, "100% Pure", "Austin", "TX").await;
        create_test_artist(&db, "100 Proof", "Austin", "TX").await;
        create_test_artist(&db, "Under_score", "Austin", "TX").await;
        create_test_artist(&db, "Underscore", "Austin", "TX").await;

        let percent = search_artists(&db, "100%").await.unwrap();
        assert_eq!(percent.count, 1);
        assert_eq!(percent.data[0].name, "100% Pure");

        let underscore = search_artists(&db, "r_s").await.unwrap();
        assert_eq!(underscore.count, 1);
        assert_eq!(underscore.data[0].name, "Under_score");
    }

    #[test]
    fn test_name_matches_folds_unicode() {
        assert!(name_matches("ÉCOLE Band", "école"));
        assert!(!name_matches("Ecole Band", "école"));
    }

    #[tokio::test]
    async fn test_search_matches_non_ascii_names_case_insensitively() {
        let db = setup_test_db().await;
        create_test_artist(&db, "ÉCOLE Band", "Montréal", "QC").await;
        create_test_artist(&db, "Ecole Normale", "Montréal", "QC").await;
        create_test_venue(&db, "Café Ömer", "Berlin", "BE").await;

        let artists = search_artists(&db, "école").await.unwrap();
        assert_eq!(artists.count, 1);
        assert_eq!(artists.data[0].name, "ÉCOLE Band");

        let venues = search_venues(&db, "CAFÉ öMER").await.unwrap();
        assert_eq!(venues.count, 1);
    }

    #[tokio::test]
    async fn test_venue_detail_partitions_around_now() {
        let db = setup_test_db().await;
        let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let early = create_test_artist(&db, "Guns N Petals", "San Francisco", "CA").await;
        let late = create_test_artist(&db, "The Wild Sax Band", "San Francisco", "CA").await;
        let exact = create_test_artist(&db, "Right On Time", "San Francisco", "CA").await;

        create_test_show(&db, venue.id, early.id, now() - Duration::days(30)).await;
        create_test_show(&db, venue.id, late.id, now() + Duration::days(30)).await;
        create_test_show(&db, venue.id, late.id, now() + Duration::days(31)).await;
        create_test_show(&db, venue.id, exact.id, now()).await;

        let detail = venue_detail(&db, venue.id, now()).await.unwrap();

        assert_eq!(detail.past_shows_count, 1);
        assert_eq!(detail.upcoming_shows_count, 2);
        assert_eq!(detail.past_shows[0].artist_name, "Guns N Petals");
        assert!(detail
            .upcoming_shows
            .iter()
            .all(|s| s.artist_name == "The Wild Sax Band"));
        assert!(detail
            .past_shows
            .iter()
            .chain(detail.upcoming_shows.iter())
            .all(|s| s.artist_id != exact.id));
    }

    #[tokio::test]
    async fn test_artist_detail_partitions_around_now() {
        let db = setup_test_db().await;
        let artist = create_test_artist(&db, "Matt Quevedo", "New York", "NY").await;
        let pianos = create_test_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;
        let hop = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;

        create_test_show(&db, pianos.id, artist.id, now() - Duration::minutes(1)).await;
        create_test_show(&db, hop.id, artist.id, now() + Duration::minutes(1)).await;

        let detail = artist_detail(&db, artist.id, now()).await.unwrap();

        assert_eq!(detail.past_shows_count, 1);
        assert_eq!(detail.past_shows[0].venue_id, pianos.id);
        assert_eq!(detail.upcoming_shows_count, 1);
        assert_eq!(detail.upcoming_shows[0].venue_id, hop.id);
        assert_eq!(detail.upcoming_shows[0].start_time, "Sun 03, 01, 2026 12:01PM");
    }

    #[tokio::test]
    async fn test_detail_for_missing_id_is_not_found() {
        let db = setup_test_db().await;

        assert!(matches!(
            venue_detail(&db, 1, now()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            artist_detail(&db, 1, now()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_shows_resolves_both_sides() {
        let db = setup_test_db().await;
        let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = create_test_artist(&db, "Guns N Petals", "San Francisco", "CA").await;
        let second = create_test_artist(&db, "The Wild Sax Band", "San Francisco", "CA").await;

        create_test_show(&db, venue.id, second.id, now() + Duration::days(2)).await;
        create_test_show(&db, venue.id, artist.id, now() + Duration::days(1)).await;

        let shows = list_shows(&db).await.unwrap();

        assert_eq!(shows.len(), 2);
        assert_eq!(shows[0].artist_name, "Guns N Petals");
        assert_eq!(shows[0].venue_name, "The Musical Hop");
        assert_eq!(shows[1].artist_id, second.id);
    }
}

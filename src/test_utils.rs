//! Test utilities for Fyyur
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - AppState factories
//! - Test data generators

use chrono::NaiveDateTime;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

use crate::{
    db::entities::{artist, show, venue},
    state::AppState,
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database perfect for parallel testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    // Run all migrations
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a complete test AppState with an isolated database
pub async fn setup_test_app_state() -> AppState {
    AppState::new(setup_test_db().await)
}

// ============================================================================
// Test Data Factories
// ============================================================================

/// Create a test venue with every required field filled in
pub async fn create_test_venue(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> venue::Model {
    let venue = venue::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        address: Set("1015 Folsom Street".to_string()),
        phone: Set(Some("123-123-1234".to_string())),
        image_link: Set(Some("https://images.example.com/venue.jpg".to_string())),
        facebook_link: Set(Some("https://www.facebook.com/venue".to_string())),
        website: Set(None),
        genres: Set(vec!["Jazz".to_string(), "Folk".to_string()].into()),
        seeking_talent: Set(false),
        seeking_description: Set(None),
        ..Default::default()
    };

    venue.insert(db).await.expect("Failed to insert test venue")
}

/// Create a test artist with every required field filled in
pub async fn create_test_artist(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> artist::Model {
    let artist = artist::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        phone: Set(Some("326-123-5000".to_string())),
        image_link: Set(Some("https://images.example.com/artist.jpg".to_string())),
        facebook_link: Set(Some("https://www.facebook.com/artist".to_string())),
        website: Set(None),
        genres: Set(vec!["Rock n Roll".to_string()].into()),
        seeking_venue: Set(false),
        seeking_description: Set(None),
        ..Default::default()
    };

    artist.insert(db).await.expect("Failed to insert test artist")
}

/// Create a test show linking an existing venue and artist
pub async fn create_test_show(
    db: &DatabaseConnection,
    venue_id: i32,
    artist_id: i32,
    start_time: NaiveDateTime,
) -> show::Model {
    let show = show::ActiveModel {
        venue_id: Set(venue_id),
        artist_id: Set(artist_id),
        start_time: Set(start_time),
        ..Default::default()
    };

    show.insert(db).await.expect("Failed to insert test show")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        // Tables exist and start empty
        assert!(venue::Entity::find().all(&db).await.unwrap().is_empty());
        assert!(artist::Entity::find().all(&db).await.unwrap().is_empty());
        assert!(show::Entity::find().all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_test_show() {
        let db = setup_test_db().await;
        let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = create_test_artist(&db, "Guns N Petals", "San Francisco", "CA").await;
        let at = NaiveDate::from_ymd_opt(2019, 5, 21).unwrap().and_hms_opt(21, 30, 0).unwrap();

        let show = create_test_show(&db, venue.id, artist.id, at).await;

        assert_eq!(show.venue_id, venue.id);
        assert_eq!(show.artist_id, artist.id);
        assert_eq!(show.start_time, at);
    }

    #[tokio::test]
    async fn test_parallel_databases() {
        // Run two database setups in parallel - they should not interfere
        let (db1, db2) = tokio::join!(setup_test_db(), setup_test_db());

        let venue1 = create_test_venue(&db1, "Venue 1", "Austin", "TX").await;
        let venue2 = create_test_venue(&db2, "Venue 2", "Austin", "TX").await;

        // Both should be ID 1 (separate databases)
        assert_eq!(venue1.id, 1);
        assert_eq!(venue2.id, 1);

        let db1_venues = venue::Entity::find().all(&db1).await.unwrap();
        let db2_venues = venue::Entity::find().all(&db2).await.unwrap();

        assert_eq!(db1_venues.len(), 1);
        assert_eq!(db2_venues.len(), 1);
        assert_eq!(db1_venues[0].name, "Venue 1");
        assert_eq!(db2_venues[0].name, "Venue 2");
    }
}

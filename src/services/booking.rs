//! Mutations over venues, artists and shows.
//!
//! Each operation consumes the request's transaction: it is committed when
//! the operation succeeds and rolled back on any failure, so a failed
//! submission never leaves a partial record behind.

use chrono::NaiveDateTime;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set};

use crate::{
    db::entities::{artist, show, venue},
    error::{AppError, Result},
};

/// Validated venue fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueInput {
    fn apply(self, active: &mut venue::ActiveModel) {
        active.name = Set(self.name);
        active.city = Set(self.city);
        active.state = Set(self.state);
        active.address = Set(self.address);
        active.phone = Set(self.phone);
        active.genres = Set(self.genres.into());
        active.image_link = Set(self.image_link);
        active.facebook_link = Set(self.facebook_link);
        active.website = Set(self.website);
        active.seeking_talent = Set(self.seeking_talent);
        active.seeking_description = Set(self.seeking_description);
    }
}

/// Validated artist fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistInput {
    fn apply(self, active: &mut artist::ActiveModel) {
        active.name = Set(self.name);
        active.city = Set(self.city);
        active.state = Set(self.state);
        active.phone = Set(self.phone);
        active.genres = Set(self.genres.into());
        active.image_link = Set(self.image_link);
        active.facebook_link = Set(self.facebook_link);
        active.website = Set(self.website);
        active.seeking_venue = Set(self.seeking_venue);
        active.seeking_description = Set(self.seeking_description);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowInput {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: NaiveDateTime,
}

/// Commit on success, roll back on failure. The transaction is consumed
/// either way.
async fn settle<T>(txn: DatabaseTransaction, outcome: Result<T>) -> Result<T> {
    match outcome {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("Rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}

pub async fn create_venue(txn: DatabaseTransaction, input: VenueInput) -> Result<venue::Model> {
    let mut active = venue::ActiveModel {
        ..Default::default()
    };
    input.apply(&mut active);

    let outcome = active.insert(&txn).await.map_err(AppError::from);
    let venue = settle(txn, outcome).await?;

    tracing::info!(venue_id = venue.id, "Venue listed");
    Ok(venue)
}

async fn apply_venue_update(
    txn: &DatabaseTransaction,
    venue_id: i32,
    input: VenueInput,
) -> Result<venue::Model> {
    let venue = venue::Entity::find_by_id(venue_id)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", venue_id)))?;

    let mut active: venue::ActiveModel = venue.into();
    input.apply(&mut active);
    Ok(active.update(txn).await?)
}

pub async fn update_venue(
    txn: DatabaseTransaction,
    venue_id: i32,
    input: VenueInput,
) -> Result<venue::Model> {
    let outcome = apply_venue_update(&txn, venue_id, input).await;
    let venue = settle(txn, outcome).await?;

    tracing::info!(venue_id = venue.id, "Venue updated");
    Ok(venue)
}

/// Delete every venue with `venue_id`, returning how many rows went away.
///
/// Matching nothing is not an error. Shows at the venue are removed by the
/// foreign key cascade.
pub async fn delete_venue(txn: DatabaseTransaction, venue_id: i32) -> Result<u64> {
    let outcome = venue::Entity::delete_many()
        .filter(venue::Column::Id.eq(venue_id))
        .exec(&txn)
        .await
        .map(|res| res.rows_affected)
        .map_err(AppError::from);
    let deleted = settle(txn, outcome).await?;

    tracing::info!(venue_id, deleted, "Venue delete committed");
    Ok(deleted)
}

pub async fn create_artist(txn: DatabaseTransaction, input: ArtistInput) -> Result<artist::Model> {
    let mut active = artist::ActiveModel {
        ..Default::default()
    };
    input.apply(&mut active);

    let outcome = active.insert(&txn).await.map_err(AppError::from);
    let artist = settle(txn, outcome).await?;

    tracing::info!(artist_id = artist.id, "Artist listed");
    Ok(artist)
}

async fn apply_artist_update(
    txn: &DatabaseTransaction,
    artist_id: i32,
    input: ArtistInput,
) -> Result<artist::Model> {
    let artist = artist::Entity::find_by_id(artist_id)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", artist_id)))?;

    let mut active: artist::ActiveModel = artist.into();
    input.apply(&mut active);
    Ok(active.update(txn).await?)
}

pub async fn update_artist(
    txn: DatabaseTransaction,
    artist_id: i32,
    input: ArtistInput,
) -> Result<artist::Model> {
    let outcome = apply_artist_update(&txn, artist_id, input).await;
    let artist = settle(txn, outcome).await?;

    tracing::info!(artist_id = artist.id, "Artist updated");
    Ok(artist)
}

async fn insert_show(txn: &DatabaseTransaction, input: ShowInput) -> Result<show::Model> {
    if venue::Entity::find_by_id(input.venue_id).one(txn).await?.is_none() {
        return Err(AppError::NotFound(format!("Venue {} not found", input.venue_id)));
    }
    if artist::Entity::find_by_id(input.artist_id).one(txn).await?.is_none() {
        return Err(AppError::NotFound(format!("Artist {} not found", input.artist_id)));
    }

    let show = show::ActiveModel {
        venue_id: Set(input.venue_id),
        artist_id: Set(input.artist_id),
        start_time: Set(input.start_time),
        ..Default::default()
    };
    Ok(show.insert(txn).await?)
}

pub async fn create_show(txn: DatabaseTransaction, input: ShowInput) -> Result<show::Model> {
    let outcome = insert_show(&txn, input).await;
    let show = settle(txn, outcome).await?;

    tracing::info!(
        show_id = show.id,
        venue_id = show.venue_id,
        artist_id = show.artist_id,
        "Show listed"
    );
    Ok(show)
}

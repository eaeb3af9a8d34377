//! Typed form submissions.
//!
//! Every POST body is deserialized into one of the `*Form` structs and then
//! validated into the input type the booking service expects. Missing or
//! blank required fields never reach the database.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use axum_extra::extract::Form;
use serde::{de::DeserializeOwned, Deserialize};

use crate::{
    error::{AppError, Result},
    services::{
        booking::{ArtistInput, ShowInput, VenueInput},
        time_format::parse_timestamp,
    },
};

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// A raw form body that knows how to validate itself.
pub trait Submission: DeserializeOwned {
    type Output;

    fn validate(self) -> Result<Self::Output>;
}

/// Extractor yielding the validated output of a [`Submission`].
///
/// Rejects with `400 Bad Request` when the body is malformed or a required
/// field is missing.
pub struct ValidForm<T: Submission>(pub T::Output);

#[async_trait]
impl<T, S> FromRequest<S> for ValidForm<T>
where
    T: Submission + Send,
    T::Output: Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let Form(form) = Form::<T>::from_request(req, state)
            .await
            .map_err(|_| AppError::BadRequest("Malformed form submission".to_string()))?;

        Ok(Self(form.validate()?))
    }
}

/// `"Yes"` is the only affirmative answer; anything else reads as `false`.
pub fn is_yes(choice: &str) -> bool {
    choice == "Yes"
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn required(entity: &'static str, field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AppError::missing_field(entity, field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn required_genres(entity: &'static str, genres: Vec<String>) -> Result<Vec<String>> {
    let genres: Vec<String> = genres
        .into_iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect();

    if genres.is_empty() {
        Err(AppError::missing_field(entity, "genres"))
    } else {
        Ok(genres)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub image_link: String,
    pub website: String,
    pub seeking_talent: String,
    pub seeking_description: String,
}

impl Submission for VenueForm {
    type Output = VenueInput;

    fn validate(self) -> Result<VenueInput> {
        const ENTITY: &str = "Venue";

        Ok(VenueInput {
            name: required(ENTITY, "name", self.name)?,
            city: required(ENTITY, "city", self.city)?,
            state: required(ENTITY, "state", self.state)?,
            address: required(ENTITY, "address", self.address)?,
            phone: Some(required(ENTITY, "phone", self.phone)?),
            genres: required_genres(ENTITY, self.genres)?,
            facebook_link: Some(required(ENTITY, "facebook_link", self.facebook_link)?),
            image_link: Some(required(ENTITY, "image_link", self.image_link)?),
            website: optional(self.website),
            seeking_talent: is_yes(&self.seeking_talent),
            seeking_description: optional(self.seeking_description),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub image_link: String,
    pub website: String,
    pub seeking_venue: String,
    pub seeking_description: String,
}

impl Submission for ArtistForm {
    type Output = ArtistInput;

    fn validate(self) -> Result<ArtistInput> {
        const ENTITY: &str = "Artist";

        Ok(ArtistInput {
            name: required(ENTITY, "name", self.name)?,
            city: required(ENTITY, "city", self.city)?,
            state: required(ENTITY, "state", self.state)?,
            phone: Some(required(ENTITY, "phone", self.phone)?),
            genres: required_genres(ENTITY, self.genres)?,
            facebook_link: Some(required(ENTITY, "facebook_link", self.facebook_link)?),
            image_link: Some(required(ENTITY, "image_link", self.image_link)?),
            website: optional(self.website),
            seeking_venue: is_yes(&self.seeking_venue),
            seeking_description: optional(self.seeking_description),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl Submission for ShowForm {
    type Output = ShowInput;

    fn validate(self) -> Result<ShowInput> {
        const ENTITY: &str = "Show";

        let artist_id = required(ENTITY, "artist_id", self.artist_id)?;
        let venue_id = required(ENTITY, "venue_id", self.venue_id)?;
        let start_time = required(ENTITY, "start_time", self.start_time)?;

        Ok(ShowInput {
            artist_id: artist_id
                .parse()
                .map_err(|e| AppError::invalid_field(ENTITY, "artist_id", e))?,
            venue_id: venue_id
                .parse()
                .map_err(|e| AppError::invalid_field(ENTITY, "venue_id", e))?,
            start_time: parse_timestamp(&start_time)
                .map_err(|e| AppError::invalid_field(ENTITY, "start_time", e))?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

impl Submission for SearchForm {
    type Output = String;

    fn validate(self) -> Result<String> {
        Ok(self.search_term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue_form() -> VenueForm {
        VenueForm {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            genres: vec!["Jazz".to_string(), "Folk".to_string()],
            facebook_link: "https://www.facebook.com/TheMusicalHop".to_string(),
            image_link: "https://images.example.com/hop.jpg".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_yes_is_the_only_true_choice() {
        assert!(is_yes("Yes"));
        for other in ["yes", "YES", "No", "no", "", " Yes", "true"] {
            assert!(!is_yes(other), "{:?} should read as false", other);
        }
    }

    #[test]
    fn test_venue_form_validates() {
        let input = venue_form().validate().unwrap();
        assert_eq!(input.name, "The Musical Hop");
        assert_eq!(input.genres, vec!["Jazz", "Folk"]);
        assert_eq!(input.website, None);
        assert!(!input.seeking_talent);
    }

    #[test]
    fn test_venue_form_rejects_blank_required_field() {
        let form = VenueForm {
            city: "   ".to_string(),
            ..venue_form()
        };
        match form.validate() {
            Err(AppError::Validation { entity, message }) => {
                assert_eq!(entity, "Venue");
                assert!(message.contains("city"));
            }
            other => panic!("expected validation error, got {:?}", other.map(|v| v.name)),
        }
    }

    #[test]
    fn test_venue_form_requires_a_genre() {
        let form = VenueForm {
            genres: vec![" ".to_string()],
            ..venue_form()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_artist_form_seeking_venue() {
        let base = ArtistForm {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "326-123-5000".to_string(),
            genres: vec!["Rock n Roll".to_string()],
            facebook_link: "https://www.facebook.com/GunsNPetals".to_string(),
            image_link: "https://images.example.com/gnp.jpg".to_string(),
            ..Default::default()
        };

        let yes = ArtistForm {
            seeking_venue: "Yes".to_string(),
            ..base
        };
        assert!(yes.validate().unwrap().seeking_venue);
    }

    #[test]
    fn test_show_form_parses_ids_and_time() {
        let input = ShowForm {
            artist_id: "4".to_string(),
            venue_id: "1".to_string(),
            start_time: "2035-04-01T20:00".to_string(),
        }
        .validate()
        .unwrap();

        assert_eq!(input.artist_id, 4);
        assert_eq!(input.venue_id, 1);
        assert_eq!(input.start_time.to_string(), "2035-04-01 20:00:00");
    }

    #[test]
    fn test_show_form_rejects_bad_values() {
        let bad_id = ShowForm {
            artist_id: "four".to_string(),
            venue_id: "1".to_string(),
            start_time: "2035-04-01T20:00".to_string(),
        };
        assert!(bad_id.validate().is_err());

        let bad_time = ShowForm {
            artist_id: "4".to_string(),
            venue_id: "1".to_string(),
            start_time: "soon".to_string(),
        };
        assert!(bad_time.validate().is_err());

        assert!(ShowForm::default().validate().is_err());
    }
}

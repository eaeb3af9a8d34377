pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::{
    state::AppState,
    templates::{Notice, NoticeLevel},
};

pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health::health_check))

        // Venues
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/create",
            get(venues::create_venue_form).post(venues::create_venue_submission),
        )
        .route("/venues/:id", get(venues::show_venue).delete(venues::delete_venue))
        .route(
            "/venues/:id/edit",
            get(venues::edit_venue_form).post(venues::edit_venue_submission),
        )

        // Artists
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/create",
            get(artists::create_artist_form).post(artists::create_artist_submission),
        )
        .route("/artists/:id", get(artists::show_artist))
        .route(
            "/artists/:id/edit",
            get(artists::edit_artist_form).post(artists::edit_artist_submission),
        )

        // Shows
        .route("/shows", get(shows::list_shows))
        .route(
            "/shows/create",
            get(shows::create_show_form).post(shows::create_show_submission),
        )

        .fallback(home::not_found)
}

/// Notice carried across a redirect in the query string.
///
/// Anyone can craft such a link, so the message is untrusted text: it is only
/// ever rendered escaped inside the banner and never as markup.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
    pub level: Option<NoticeLevel>,
}

impl NoticeQuery {
    pub fn into_notice(self) -> Option<Notice> {
        let message = self.notice.filter(|m| !m.is_empty())?;
        Some(Notice {
            level: self.level.unwrap_or(NoticeLevel::Success),
            message,
        })
    }
}

/// 303 to `path` with the notice appended to the query string.
pub(crate) fn redirect_with_notice(path: &str, notice: &Notice) -> Redirect {
    Redirect::to(&format!("{}?{}", path, notice.to_query()))
}

/// Wall-clock time used to split shows into past and upcoming.
pub(crate) fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}

use axum::{extract::State, response::Html};

use crate::{
    db::Txn,
    error::Result,
    forms::{ShowForm, ValidForm},
    services::{booking, directory},
    state::AppState,
    templates::{home_page, show_form_page, shows_page, Notice},
};

pub async fn list_shows(State(state): State<AppState>) -> Result<Html<String>> {
    let shows = directory::list_shows(&state.db).await?;
    Ok(Html(shows_page(&shows).into_string()))
}

pub async fn create_show_form() -> Html<String> {
    Html(show_form_page().into_string())
}

/// A show naming an unknown venue or artist is reported like any other
/// failed listing.
pub async fn create_show_submission(
    Txn(txn): Txn,
    ValidForm(input): ValidForm<ShowForm>,
) -> Html<String> {
    let notice = match booking::create_show(txn, input).await {
        Ok(_) => Notice::success("Show was successfully listed!"),
        Err(e) => {
            tracing::error!(
                entity = "Show",
                venue_id = input.venue_id,
                artist_id = input.artist_id,
                "Failed to list show: {}",
                e
            );
            Notice::error("An error occurred. Show could not be listed.")
        }
    };

    Html(home_page(Some(&notice)).into_string())
}

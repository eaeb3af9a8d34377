use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
};

use super::{now, redirect_with_notice, NoticeQuery};
use crate::{
    db::Txn,
    error::{AppError, Result},
    forms::{ArtistForm, SearchForm, ValidForm},
    services::{booking, directory},
    state::AppState,
    templates::{
        artist_detail_page, artist_form_page, artists_page, home_page, search_results_page, Notice,
    },
};

pub async fn list_artists(State(state): State<AppState>) -> Result<Html<String>> {
    let artists = directory::list_artists(&state.db).await?;
    Ok(Html(artists_page(&artists).into_string()))
}

pub async fn search_artists(
    State(state): State<AppState>,
    ValidForm(term): ValidForm<SearchForm>,
) -> Result<Html<String>> {
    let results = directory::search_artists(&state.db, &term).await?;
    Ok(Html(
        search_results_page("Artists", "/artists", &term, &results).into_string(),
    ))
}

pub async fn show_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>> {
    let detail = directory::artist_detail(&state.db, id, now()).await?;
    Ok(Html(
        artist_detail_page(&detail, query.into_notice().as_ref()).into_string(),
    ))
}

pub async fn create_artist_form() -> Html<String> {
    Html(artist_form_page(None).into_string())
}

pub async fn create_artist_submission(
    Txn(txn): Txn,
    ValidForm(input): ValidForm<ArtistForm>,
) -> Html<String> {
    let name = input.name.clone();

    let notice = match booking::create_artist(txn, input).await {
        Ok(_) => Notice::success(format!("Artist {} was successfully listed!", name)),
        Err(e) => {
            tracing::error!(entity = "Artist", "Failed to list artist {}: {}", name, e);
            Notice::error(format!(
                "An error occurred. Artist {} could not be listed.",
                name
            ))
        }
    };

    Html(home_page(Some(&notice)).into_string())
}

pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>> {
    let artist = directory::find_artist(&state.db, id).await?;
    Ok(Html(artist_form_page(Some(&artist)).into_string()))
}

pub async fn edit_artist_submission(
    Path(id): Path<i32>,
    Txn(txn): Txn,
    ValidForm(input): ValidForm<ArtistForm>,
) -> Result<Redirect> {
    let name = input.name.clone();

    let notice = match booking::update_artist(txn, id, input).await {
        Ok(_) => Notice::success(format!("Artist {} was successfully updated!", name)),
        Err(e @ AppError::NotFound(_)) => return Err(e),
        Err(e) => {
            tracing::error!(entity = "Artist", artist_id = id, "Failed to update artist: {}", e);
            Notice::error(format!(
                "An error occurred. Artist {} could not be updated.",
                name
            ))
        }
    };

    Ok(redirect_with_notice(&format!("/artists/{}", id), &notice))
}

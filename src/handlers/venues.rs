use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Redirect, Response},
};

use super::{now, redirect_with_notice, NoticeQuery};
use crate::{
    db::Txn,
    error::{AppError, Result},
    forms::{SearchForm, ValidForm, VenueForm},
    services::{booking, directory},
    state::AppState,
    templates::{
        home_page, search_results_page, venue_detail_page, venue_form_page, venues_page, Notice,
    },
};

/// Venues grouped by (city, state)
pub async fn list_venues(State(state): State<AppState>) -> Result<Html<String>> {
    let areas = directory::venue_areas(&state.db).await?;
    Ok(Html(venues_page(&areas).into_string()))
}

pub async fn search_venues(
    State(state): State<AppState>,
    ValidForm(term): ValidForm<SearchForm>,
) -> Result<Html<String>> {
    let results = directory::search_venues(&state.db, &term).await?;
    Ok(Html(
        search_results_page("Venues", "/venues", &term, &results).into_string(),
    ))
}

pub async fn show_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>> {
    let detail = directory::venue_detail(&state.db, id, now()).await?;
    Ok(Html(
        venue_detail_page(&detail, query.into_notice().as_ref()).into_string(),
    ))
}

pub async fn create_venue_form() -> Html<String> {
    Html(venue_form_page(None).into_string())
}

pub async fn create_venue_submission(
    Txn(txn): Txn,
    ValidForm(input): ValidForm<VenueForm>,
) -> Html<String> {
    let name = input.name.clone();

    let notice = match booking::create_venue(txn, input).await {
        Ok(_) => Notice::success(format!("Venue {} was successfully listed!", name)),
        Err(e) => {
            tracing::error!(entity = "Venue", "Failed to list venue {}: {}", name, e);
            Notice::error(format!(
                "An error occurred. Venue {} could not be listed.",
                name
            ))
        }
    };

    Html(home_page(Some(&notice)).into_string())
}

pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>> {
    let venue = directory::find_venue(&state.db, id).await?;
    Ok(Html(venue_form_page(Some(&venue)).into_string()))
}

pub async fn edit_venue_submission(
    Path(id): Path<i32>,
    Txn(txn): Txn,
    ValidForm(input): ValidForm<VenueForm>,
) -> Result<Redirect> {
    let name = input.name.clone();

    let notice = match booking::update_venue(txn, id, input).await {
        Ok(_) => Notice::success(format!("Venue {} was successfully updated!", name)),
        Err(e @ AppError::NotFound(_)) => return Err(e),
        Err(e) => {
            tracing::error!(entity = "Venue", venue_id = id, "Failed to update venue: {}", e);
            Notice::error(format!(
                "An error occurred. Venue {} could not be updated.",
                name
            ))
        }
    };

    Ok(redirect_with_notice(&format!("/venues/{}", id), &notice))
}

/// Removes every venue with this id, then returns to the landing page.
///
/// htmx requests get an `HX-Redirect` instead of a 303, which the XHR would
/// otherwise follow and swap into the current page.
pub async fn delete_venue(Path(id): Path<i32>, headers: HeaderMap, Txn(txn): Txn) -> Response {
    let notice = match booking::delete_venue(txn, id).await {
        Ok(_) => Notice::success("Venue was successfully deleted."),
        Err(e) => {
            tracing::error!(entity = "Venue", venue_id = id, "Failed to delete venue: {}", e);
            Notice::error("An error occurred. Venue could not be deleted.")
        }
    };

    if headers.contains_key("hx-request") {
        let mut response_headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&format!("/?{}", notice.to_query())) {
            response_headers.insert("hx-redirect", value);
        }
        return (response_headers, "").into_response();
    }

    redirect_with_notice("/", &notice).into_response()
}

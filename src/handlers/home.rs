use axum::{extract::Query, response::Html};

use super::NoticeQuery;
use crate::{error::AppError, templates::home_page};

/// Landing page, showing the notice a redirect brought along.
pub async fn index(Query(query): Query<NoticeQuery>) -> Html<String> {
    Html(home_page(query.into_notice().as_ref()).into_string())
}

pub async fn not_found() -> AppError {
    AppError::NotFound("The page you requested does not exist".to_string())
}

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::templates::{error_page, Notice};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid {entity} submission: {message}")]
    Validation {
        entity: &'static str,
        message: String,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn missing_field(entity: &'static str, field: &str) -> Self {
        Self::Validation {
            entity,
            message: format!("missing required field `{}`", field),
        }
    }

    pub fn invalid_field(entity: &'static str, field: &str, reason: impl std::fmt::Display) -> Self {
        Self::Validation {
            entity,
            message: format!("invalid value for `{}`: {}", field, reason),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, notice) = match self {
            Self::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Notice::error("Database error occurred"),
                )
            }
            Self::NotFound(ref msg) => (StatusCode::NOT_FOUND, Notice::error(msg)),
            Self::Validation { entity, ref message } => {
                tracing::warn!(entity, "Rejected submission: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    Notice::error(format!(
                        "An error occurred. {} could not be saved: {}.",
                        entity, message
                    )),
                )
            }
            Self::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, Notice::error(msg)),
        };

        (status, Html(error_page(status, &notice).into_string())).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

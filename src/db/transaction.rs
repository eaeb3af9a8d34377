use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sea_orm::{DatabaseTransaction, TransactionTrait};

use crate::{error::AppError, state::AppState};

/// Transaction handle scoped to a single request.
///
/// Work done through it becomes visible only after an explicit commit.
/// Dropping the handle without committing rolls everything back and returns
/// the connection to the pool.
pub struct Txn(pub DatabaseTransaction);

#[async_trait]
impl FromRequestParts<AppState> for Txn {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let txn = state.db.begin().await?;
        Ok(Self(txn))
    }
}

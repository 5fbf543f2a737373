//! Handlers for the `/dashboard` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use signage_core::dashboard::summarize_ads;
use signage_db::repositories::{AdRepo, CondominiumRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/stats
///
/// Active and expired counts are derived from expiration dates at request time.
pub async fn stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let total_condominiums = CondominiumRepo::count(&state.pool).await?;
    let expirations = AdRepo::list_expirations(&state.pool).await?;

    let stats = summarize_ads(
        total_condominiums,
        expirations.into_iter().map(Some),
        state.clock.today(),
    );
    Ok(Json(DataResponse { data: stats }))
}

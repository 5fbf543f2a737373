//! Route definitions for the `/condominiums` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::condominiums;
use crate::state::AppState;

/// Routes mounted at `/condominiums`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_detail
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(condominiums::list).post(condominiums::create))
        .route(
            "/{id}",
            get(condominiums::get_detail)
                .put(condominiums::update)
                .delete(condominiums::delete),
        )
}

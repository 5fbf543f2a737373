//! Route definitions for the `/ads` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::ads;
use crate::state::AppState;

/// Routes mounted at `/ads`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ads::list).post(ads::create))
        .route(
            "/{id}",
            get(ads::get_by_id).put(ads::update).delete(ads::delete),
        )
}

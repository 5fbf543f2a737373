//! Route definitions for the `/tvs` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{rotation, tvs};
use crate::state::AppState;

/// Routes mounted at `/tvs`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// POST   /{id}/connection-code      -> regenerate_connection_code
/// GET    /{id}/rotation             -> rotation::get_for_tv
/// PUT    /{id}/rotation             -> rotation::update_for_tv
/// GET    /{id}/rotation/preview     -> rotation::preview_for_tv
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tvs::list).post(tvs::create))
        .route(
            "/{id}",
            get(tvs::get_by_id).put(tvs::update).delete(tvs::delete),
        )
        .route(
            "/{id}/connection-code",
            post(tvs::regenerate_connection_code),
        )
        .route(
            "/{id}/rotation",
            get(rotation::get_for_tv).put(rotation::update_for_tv),
        )
        .route("/{id}/rotation/preview", get(rotation::preview_for_tv))
}

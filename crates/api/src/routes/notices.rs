//! Route definitions for the `/notices` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::notices;
use crate::state::AppState;

/// Routes mounted at `/notices`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// GET    /manager/{manager_id}    -> list_by_manager
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notices::list).post(notices::create))
        .route(
            "/{id}",
            get(notices::get_by_id)
                .put(notices::update)
                .delete(notices::delete),
        )
        .route("/manager/{manager_id}", get(notices::list_by_manager))
}

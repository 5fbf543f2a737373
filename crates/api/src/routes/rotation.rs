//! Route definitions for stateless rotation tools.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::rotation;
use crate::state::AppState;

/// Routes mounted at `/rotation`.
///
/// ```text
/// POST   /preview    -> preview
/// GET    /presets    -> list_presets
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/preview", post(rotation::preview))
        .route("/presets", get(rotation::list_presets))
}

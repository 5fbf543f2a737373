pub mod ads;
pub mod condominiums;
pub mod dashboard;
pub mod health;
pub mod notices;
pub mod rotation;
pub mod tvs;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                                   list, create
/// /users/{id}                              get, update, delete
///
/// /condominiums                            list (with tv_count), create
/// /condominiums/{id}                       detail, update, delete
///
/// /tvs                                     list (?condominium_id), create
/// /tvs/{id}                                get, update, delete
/// /tvs/{id}/connection-code                regenerate (POST)
/// /tvs/{id}/rotation                       get, replace quotas
/// /tvs/{id}/rotation/preview               preview stored rotation
///
/// /rotation/preview                        stateless preview (POST)
/// /rotation/presets                        preset table
///
/// /ads                                     list (?condominium_id, ?status), create
/// /ads/{id}                                get, update, delete
///
/// /notices                                 list (?condominium_id, ?status), create
/// /notices/{id}                            get, update, delete
/// /notices/manager/{manager_id}            notices by manager
///
/// /dashboard/stats                         ad and condominium counts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/condominiums", condominiums::router())
        .nest("/tvs", tvs::router())
        .nest("/rotation", rotation::router())
        .nest("/ads", ads::router())
        .nest("/notices", notices::router())
        .nest("/dashboard", dashboard::router())
}

use std::sync::Arc;

use signage_core::status::Clock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: signage_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Reference date source for ad and notice status.
    pub clock: Arc<dyn Clock>,
}

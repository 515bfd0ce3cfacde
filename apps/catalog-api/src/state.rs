//! Application state management

/// Shared application state.
///
/// Cloned into the readiness handler; the connection pool is reference
/// counted so clones share it.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
}

//! Application state management.
//!
//! Shared state passed to request handlers: configuration plus the MongoDB
//! client and database handle, constructed once at startup and injected
//! down the repository/service/router chain.

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloned per use; the MongoDB client shares its underlying connection
/// pool across clones.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
}

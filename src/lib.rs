//! Carnet — local-first storage engine for a patient record manager.
//!
//! One SQLite file on device, opened lazily and exactly once. The screen
//! layer constructs a single [`db::Database`] handle at startup and passes
//! clones of it everywhere:
//!
//! ```no_run
//! use carnet::db::Database;
//!
//! # async fn demo() -> Result<(), carnet::db::DatabaseError> {
//! let db = Database::open(carnet::config::database_path());
//! db.ensure_initialized().await?;
//! let patients = db
//!     .with_conn(|conn| carnet::db::repository::list_patients(conn))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod models;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the embedding application.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}

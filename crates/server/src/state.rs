//! Application state shared across handlers.

use std::sync::Arc;

use argon2::{Algorithm, Argon2, Params, Version};
use sqlx::SqlitePool;

use crate::config::{AppConfig, Argon2Config};
use crate::services::ImageStore;

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("invalid argon2 parameters: {0}")]
    InvalidHashParams(argon2::Error),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: SqlitePool,
    hasher: Argon2<'static>,
    images: ImageStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured Argon2 parameters are invalid.
    pub fn new(config: AppConfig, pool: SqlitePool) -> Result<Self, StateError> {
        let hasher = create_hasher(config.argon2)?;
        let images = ImageStore::new(config.upload_dir.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                hasher,
                images,
            }),
        })
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the shared password hasher.
    #[must_use]
    pub fn hasher(&self) -> &Argon2<'static> {
        &self.inner.hasher
    }

    /// Get a reference to the image store.
    #[must_use]
    pub fn images(&self) -> &ImageStore {
        &self.inner.images
    }
}

/// Build the Argon2id hasher from configured cost parameters.
fn create_hasher(config: Argon2Config) -> Result<Argon2<'static>, StateError> {
    let params = Params::new(
        config.memory_kib,
        config.iterations,
        config.parallelism,
        None,
    )
    .map_err(StateError::InvalidHashParams)?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

//! Database module - AppState and database operations
//!
//! `AppState` owns the connection pool, the logo storage handle, and the
//! media configuration. Consultation row operations live in `consultation`.

mod consultation;

use std::env;
use std::sync::Arc;

use dotenvy::dotenv;
use sqlx::PgPool;

use crate::config::MediaConfig;
use crate::storage::{LocalLogoStorage, LogoStorage};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub storage: Arc<dyn LogoStorage + Send + Sync>,
    pub media: MediaConfig,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::new_with_config(MediaConfig::from_env()).await
    }

    pub async fn new_with_config(media: MediaConfig) -> anyhow::Result<Self> {
        dotenv().ok();
        let database_url = env::var("DATABASE_URL")?;

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(20)
            .min_connections(2)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .idle_timeout(std::time::Duration::from_secs(900))
            .connect(&database_url)
            .await?;

        let storage = Arc::new(LocalLogoStorage::new(media.media_root.clone()));

        Ok(AppState {
            pool,
            storage,
            media,
        })
    }

    /// Build state from pre-made parts. Used by tests that stub storage or
    /// point it at a temp directory.
    pub fn new_with_pool_and_storage(
        pool: PgPool,
        storage: Arc<dyn LogoStorage + Send + Sync>,
        media: MediaConfig,
    ) -> Self {
        AppState {
            pool,
            storage,
            media,
        }
    }
}

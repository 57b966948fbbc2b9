use std::sync::Arc;

use polls::config::{Config, ConfigError};
use polls::store::{MemoryStore, PgStore};
use polls::{logging, web};

#[tokio::main]
async fn main() -> Result<(), ConfigError> {
    let config = Config::from_env()?;
    logging::init_tracing(&config)?;

    let store: web::SharedStore = match &config.database_url {
        Some(url) => {
            let (url, pool_size) = (url.clone(), config.db_pool_size);
            // r2d2 opens its first connections eagerly
            let store = tokio::task::spawn_blocking(move || PgStore::connect(&url, pool_size))
                .await
                .map_err(|e| ConfigError::Invalid(format!("store setup task failed: {e}")))??;
            Arc::new(store)
        },
        None => {
            tracing::warn!("DATABASE_URL not set, questions are kept in memory only");
            Arc::new(MemoryStore::new())
        },
    };

    web::serve(&config, store).await
}

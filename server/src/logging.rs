use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError};

pub fn init_tracing(config: &Config) -> Result<(), ConfigError> {
    // RUST_LOG wins over the configured level
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let level = config.log_level.trim();
            EnvFilter::try_new(format!("{level},diesel=warn,warp=info"))
                .map_err(|e| ConfigError::Invalid(format!("invalid POLLS_LOG: {e}")))?
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
    Ok(())
}

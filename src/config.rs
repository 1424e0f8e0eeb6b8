use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing per-symbol signal files
    pub data_dir: PathBuf,

    /// Period passed to the store when none is given on the command line
    pub default_period: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            data_dir: env::var("DATA_DIR")
                .unwrap_or_else(|_| "data".to_string())
                .into(),

            default_period: env::var("DEFAULT_PERIOD").unwrap_or_else(|_| "1y".to_string()),
        })
    }
}

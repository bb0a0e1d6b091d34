use std::env;
use serde::{Deserialize, Serialize};

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> i64;
}

pub const DEFAULT_DB_PATH: &str = "new-books-collection.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

// Configuration abstracts config options for the book catalog
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub app_name: String,
    pub db_path: String,
    pub bind_addr: String,
    pub log_level: String,
    pub seed_sample: bool,
}

impl Configuration {
    pub fn new(app_name: &str) -> Self {
        Configuration {
            app_name: app_name.to_string(),
            db_path: DEFAULT_DB_PATH.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_level: "info".to_string(),
            seed_sample: true,
        }
    }

    /// Builds the defaults and then applies `BOOKS_DB_PATH`, `BOOKS_BIND_ADDR`,
    /// `BOOKS_LOG_LEVEL` and `BOOKS_SEED_SAMPLE` when they are set.
    pub fn from_env(app_name: &str) -> Self {
        let mut config = Configuration::new(app_name);
        if let Ok(path) = env::var("BOOKS_DB_PATH") {
            config.db_path = path;
        }
        if let Ok(addr) = env::var("BOOKS_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(level) = env::var("BOOKS_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Ok(seed) = env::var("BOOKS_SEED_SAMPLE") {
            config.seed_sample = parse_flag(seed.as_str());
        }
        config
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

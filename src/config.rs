use crate::models::errors::ConfigError;

pub const CRAWLER_LABEL_ENV: &str = "SEER_CRAWLER_INDEXER_LABEL";
pub const INDEXES_URI_ENV: &str = "MOONSTREAM_DB_V3_INDEXES_URI";

/// Process-wide settings, resolved once at startup and passed explicitly
/// to the components that need them: the label string every label row
/// carries, and the analytics sink location handed to the embedding
/// storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerSettings {
    pub crawler_label: String,
    pub database_uri: String,
}

impl IndexerSettings {
    /// Build settings from explicit values. Empty values are rejected here
    /// rather than at first use.
    pub fn new(crawler_label: String, database_uri: String) -> Result<Self, ConfigError> {
        if crawler_label.is_empty() {
            return Err(ConfigError::Missing {
                var: CRAWLER_LABEL_ENV,
            });
        }
        if database_uri.is_empty() {
            return Err(ConfigError::Missing {
                var: INDEXES_URI_ENV,
            });
        }
        Ok(Self {
            crawler_label,
            database_uri,
        })
    }

    /// Read settings from the environment. Absence of either variable is a
    /// fatal startup error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let crawler_label = std::env::var(CRAWLER_LABEL_ENV).unwrap_or_default();
        let database_uri = std::env::var(INDEXES_URI_ENV).unwrap_or_default();
        Self::new(crawler_label, database_uri)
    }
}

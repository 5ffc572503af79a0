//! Configuration management for the social graph store.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (SOCIAL__ prefix, e.g. `SOCIAL__NEO4J__URI`)
//! 2. Config file (`social.toml`, `[neo4j]` section)
//! 3. Defaults

use serde::Deserialize;

use crate::error::Result;

/// Connection settings for the graph backend.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Bolt endpoint, scheme + host + port.
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Principal passed through verbatim to the backend.
    #[serde(default = "default_user")]
    pub user: String,

    /// Credential passed through verbatim to the backend.
    #[serde(default = "default_password")]
    pub password: String,

    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Rows pulled per round trip when streaming results.
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,

    /// Target database; the server default when unset.
    #[serde(default)]
    pub database: Option<String>,
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_password() -> String {
    "social-dev".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: default_password(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
            database: None,
        }
    }
}

/// Environment keys passed to the backend verbatim, never number-parsed.
const ENV_USER: &str = "SOCIAL__NEO4J__USER";
const ENV_PASSWORD: &str = "SOCIAL__NEO4J__PASSWORD";

impl StoreConfig {
    /// Load the `[neo4j]` section from `<file_prefix>.toml` (optional) and
    /// `SOCIAL__NEO4J__*` environment variables.
    ///
    /// A missing section falls back to defaults; a malformed one is an error.
    pub fn load(file_prefix: &str) -> Result<Self> {
        let env = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self::load_from(file_prefix, env)
    }

    fn load_from(file_prefix: &str, env: config::Map<String, String>) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("SOCIAL")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env.clone())),
            )
            .build()?;

        let mut store = match cfg.get::<StoreConfig>("neo4j") {
            Ok(c) => c,
            Err(config::ConfigError::NotFound(_)) => {
                tracing::debug!(file_prefix, "No [neo4j] section, using defaults");
                StoreConfig::default()
            }
            Err(e) => return Err(e.into()),
        };

        // try_parsing turns "007" into 7; credentials must reach the server as typed.
        if let Some(user) = env.get(ENV_USER) {
            store.user = user.clone();
        }
        if let Some(password) = env.get(ENV_PASSWORD) {
            store.password = password.clone();
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.uri, "bolt://localhost:7687");
        assert_eq!(config.user, "neo4j");
        assert_eq!(config.max_connections, 16);
        assert_eq!(config.fetch_size, 256);
        assert!(config.database.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("social.toml"),
            "[neo4j]\nuri = \"bolt://graph.internal:7687\"\npassword = \"s3cret\"\ndatabase = \"people\"\n",
        )
        .unwrap();

        let prefix = dir.path().join("social");
        let config = StoreConfig::load_from(prefix.to_str().unwrap(), config::Map::new()).unwrap();
        assert_eq!(config.uri, "bolt://graph.internal:7687");
        assert_eq!(config.password, "s3cret");
        assert_eq!(config.database.as_deref(), Some("people"));
        // Unset keys keep their defaults.
        assert_eq!(config.user, "neo4j");
        assert_eq!(config.fetch_size, 256);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("absent");
        let config = StoreConfig::load_from(prefix.to_str().unwrap(), config::Map::new()).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_malformed_section_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("bad.toml"),
            "[neo4j]\nmax_connections = \"lots\"\n",
        )
        .unwrap();

        let prefix = dir.path().join("bad");
        assert!(StoreConfig::load_from(prefix.to_str().unwrap(), config::Map::new()).is_err());
    }

    #[test]
    fn test_env_credentials_are_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("absent");
        let env = config::Map::from([
            (ENV_USER.to_string(), "00042".to_string()),
            (ENV_PASSWORD.to_string(), "007".to_string()),
            ("SOCIAL__NEO4J__FETCH_SIZE".to_string(), "64".to_string()),
        ]);

        let config = StoreConfig::load_from(prefix.to_str().unwrap(), env).unwrap();
        assert_eq!(config.user, "00042");
        assert_eq!(config.password, "007");
        assert_eq!(config.fetch_size, 64);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("social.toml"),
            "[neo4j]\nuri = \"bolt://from-file:7687\"\npassword = \"file-pw\"\n",
        )
        .unwrap();
        let env = config::Map::from([(ENV_PASSWORD.to_string(), "env-pw".to_string())]);

        let prefix = dir.path().join("social");
        let config = StoreConfig::load_from(prefix.to_str().unwrap(), env).unwrap();
        assert_eq!(config.uri, "bolt://from-file:7687");
        assert_eq!(config.password, "env-pw");
    }
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// Default connection string: a redb file in the working directory.
pub const DEFAULT_CONNECTION: &str = "redb://cattlecare.redb";

/// Where documents are stored.
///
/// Parsed from a single connection string:
/// - `redb://<path>`: embedded redb database file (created if missing)
/// - `memory://`: process-local map, discarded on exit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connection {
    Redb(PathBuf),
    Memory,
}

impl Connection {
    pub fn parse(s: &str) -> Result<Self, ServiceError> {
        if let Some(path) = s.strip_prefix("redb://") {
            if path.is_empty() {
                return Err(ServiceError::Config(format!(
                    "connection '{}' has no database path",
                    s
                )));
            }
            Ok(Connection::Redb(PathBuf::from(path)))
        } else if s == "memory://" {
            Ok(Connection::Memory)
        } else {
            Err(ServiceError::Config(format!(
                "unsupported connection string '{}' (expected redb://<path> or memory://)",
                s
            )))
        }
    }
}

/// Store configuration.
///
/// Loaded from a TOML file:
///
/// ```toml
/// [store]
/// connection = "redb:///var/lib/cattlecare/data.redb"
/// ```
///
/// and then overridden by command-line flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    #[serde(default = "default_connection")]
    pub connection: String,
}

fn default_connection() -> String {
    DEFAULT_CONNECTION.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            connection: default_connection(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    store: StoreConfig,
}

impl StoreConfig {
    /// Parse the `[store]` table out of a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ServiceError> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| ServiceError::Config(format!("invalid config: {}", e)))?;
        Ok(file.store)
    }

    /// Load config from disk, or return default if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ServiceError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ServiceError::Config(format!("read {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Apply command-line overrides.
    ///
    /// Supported flags:
    /// - `--db=CONNECTION`
    pub fn apply_args(&mut self, args: &[String]) {
        for arg in args {
            if let Some(val) = arg.strip_prefix("--db=") {
                self.connection = val.to_string();
            }
        }
    }

    pub fn resolve(&self) -> Result<Connection, ServiceError> {
        Connection::parse(&self.connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_connections() {
        assert_eq!(
            Connection::parse("redb:///tmp/herd.redb").unwrap(),
            Connection::Redb(PathBuf::from("/tmp/herd.redb"))
        );
        assert_eq!(
            Connection::parse("redb://data/herd.redb").unwrap(),
            Connection::Redb(PathBuf::from("data/herd.redb"))
        );
        assert_eq!(Connection::parse("memory://").unwrap(), Connection::Memory);
    }

    #[test]
    fn rejects_unknown_scheme() {
        let err = Connection::parse("mongodb://localhost:27017/herd").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(Connection::parse("redb://").is_err());
    }

    #[test]
    fn from_toml_and_args() {
        let mut config = StoreConfig::from_toml("[store]\nconnection = \"memory://\"\n").unwrap();
        assert_eq!(config.resolve().unwrap(), Connection::Memory);

        config.apply_args(&["--verbose".to_string(), "--db=redb://x.redb".to_string()]);
        assert_eq!(config.connection, "redb://x.redb");
    }

    #[test]
    fn empty_toml_uses_default() {
        let config = StoreConfig::from_toml("").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(
            config.resolve().unwrap(),
            Connection::Redb(PathBuf::from("cattlecare.redb"))
        );
    }

    #[test]
    fn missing_file_is_default() {
        let config = StoreConfig::load(Path::new("/nonexistent/cattlecare.toml")).unwrap();
        assert_eq!(config.connection, DEFAULT_CONNECTION);
    }
}

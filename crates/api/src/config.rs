//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use services::FaultTable;
use thiserror::Error;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read fault table {path}: {source}")]
    ReadFaultTable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fault table {path}: {source}")]
    ParseFaultTable {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `8080`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `json` for JSON lines, anything else for text
/// - `FAULT_TABLE_PATH` — JSON fault table replacing the built-in demo rules
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub fault_table_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: std::env::var("LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or_default(),
            fault_table_path: std::env::var_os("FAULT_TABLE_PATH").map(PathBuf::from),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Loads the configured fault table, or the built-in one if none is set.
    pub fn fault_table(&self) -> Result<FaultTable, ConfigError> {
        let Some(path) = &self.fault_table_path else {
            return Ok(FaultTable::default());
        };

        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFaultTable {
            path: path.clone(),
            source,
        })?;
        FaultTable::from_json(&json).map_err(|source| ConfigError::ParseFaultTable {
            path: path.clone(),
            source,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            fault_table_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use services::{FaultBehavior, FaultRule};

    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.fault_table_path.is_none());
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 9000,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:9000");
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(""), LogFormat::Pretty);
    }

    #[test]
    fn test_fault_table_defaults_without_path() {
        let table = Config::default().fault_table().unwrap();
        assert_eq!(table, FaultTable::default());
    }

    #[test]
    fn test_fault_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"payment":[{{"customer":"Late Larry","behavior":"delay","seconds":5}}]}}"#
        )
        .unwrap();

        let config = Config {
            fault_table_path: Some(file.path().to_path_buf()),
            ..Config::default()
        };
        let table = config.fault_table().unwrap();

        assert_eq!(
            table.payment,
            vec![FaultRule::new(
                "Late Larry",
                FaultBehavior::Delay { seconds: 5 }
            )]
        );
        assert!(table.shipping.is_empty());
    }

    #[test]
    fn test_fault_table_missing_file() {
        let config = Config {
            fault_table_path: Some(PathBuf::from("/nonexistent/faults.json")),
            ..Config::default()
        };
        assert!(matches!(
            config.fault_table(),
            Err(ConfigError::ReadFaultTable { .. })
        ));
    }

    #[test]
    fn test_fault_table_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let config = Config {
            fault_table_path: Some(file.path().to_path_buf()),
            ..Config::default()
        };
        assert!(matches!(
            config.fault_table(),
            Err(ConfigError::ParseFaultTable { .. })
        ));
    }
}

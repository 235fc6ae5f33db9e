//! Configuration for the league console.
//!
//! Database settings come from a `key=value` file (dotenv syntax, `#`
//! comments) with the keys `db.url`, `db.username` and `db.password`. The
//! file is read with `dotenvy` without touching the process environment. It
//! is located with the following precedence:
//! 1. `--config` command line flag
//! 2. `VNL_CONFIG` environment variable
//! 3. `./application.properties`
//!
//! A missing file is not an error: the database then lives in the data
//! directory (`VNL_DATA_DIR`, else the platform data dir, else `./data`).

use std::fmt;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "application.properties";
const DEV_DATA_DIR: &str = "./data";
const DATABASE_FILE: &str = "vnl.db";

/// Connection settings for the league database.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl DatabaseConfig {
    /// Settings used when no properties file exists.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self {
            url: format!("sqlite://{}", data_dir.join(DATABASE_FILE).display()),
            username: None,
            password: None,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path}: cannot parse '{content}' at position {position}")]
    Malformed {
        path: PathBuf,
        content: String,
        position: usize,
    },
}

/// Pick the properties file to read.
pub fn resolve_config_path(cli: Option<PathBuf>, env: Option<String>) -> PathBuf {
    cli.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Get the data directory for the default database file.
///
/// Priority:
/// 1. VNL_DATA_DIR env variable if set
/// 2. the platform data directory for `vnl`
/// 3. ./data as fallback
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("VNL_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(dirs) = directories::ProjectDirs::from("", "", "vnl") {
        return dirs.data_dir().to_path_buf();
    }

    PathBuf::from(DEV_DATA_DIR)
}

/// Load database settings from `path`, falling back to defaults under
/// `data_dir` when the file does not exist.
pub fn load_database_config(path: &Path, data_dir: &Path) -> Result<DatabaseConfig, ConfigError> {
    let defaults = DatabaseConfig::in_data_dir(data_dir);
    if !path.exists() {
        tracing::info!(path = %path.display(), "No configuration file, using defaults");
        return Ok(defaults);
    }

    let mut config = DatabaseConfig {
        url: defaults.url,
        username: None,
        password: None,
    };
    let entries = dotenvy::from_path_iter(path).map_err(|e| config_error(path, e))?;
    for entry in entries {
        let (key, value) = entry.map_err(|e| config_error(path, e))?;
        let value = Some(value).filter(|v| !v.is_empty());
        match key.as_str() {
            "db.url" => {
                if let Some(url) = value {
                    config.url = url;
                }
            }
            "db.username" => config.username = value,
            "db.password" => config.password = value,
            other => tracing::debug!(key = other, "Ignoring unknown configuration key"),
        }
    }
    Ok(config)
}

fn config_error(path: &Path, error: dotenvy::Error) -> ConfigError {
    match error {
        dotenvy::Error::Io(source) => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
        dotenvy::Error::LineParse(content, position) => ConfigError::Malformed {
            path: path.to_path_buf(),
            content,
            position,
        },
        other => ConfigError::Malformed {
            path: path.to_path_buf(),
            content: other.to_string(),
            position: 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_config_path_precedence() {
        assert_eq!(
            resolve_config_path(Some(PathBuf::from("cli.properties")), Some("env.properties".into())),
            PathBuf::from("cli.properties")
        );
        assert_eq!(
            resolve_config_path(None, Some("env.properties".into())),
            PathBuf::from("env.properties")
        );
        assert_eq!(
            resolve_config_path(None, Some(String::new())),
            PathBuf::from(DEFAULT_CONFIG_FILE)
        );
        assert_eq!(resolve_config_path(None, None), PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_get_data_dir_is_not_empty() {
        // Depends on VNL_DATA_DIR and the platform; only the shape is checked.
        assert!(!get_data_dir().as_os_str().is_empty());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_database_config(&dir.path().join("absent.properties"), dir.path()).unwrap();
        assert_eq!(config, DatabaseConfig::in_data_dir(dir.path()));
        assert!(config.url.starts_with("sqlite://"));
        assert!(config.url.ends_with("vnl.db"));
    }

    #[test]
    fn test_reads_properties_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("application.properties");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "# league database").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "db.url = sqlite://league.db").unwrap();
        writeln!(file, "db.username=admin").unwrap();
        writeln!(file, "db.password='s3cret'").unwrap();
        writeln!(file, "db.pool=ignored").unwrap();
        drop(file);

        let config = load_database_config(&path, dir.path()).unwrap();
        assert_eq!(config.url, "sqlite://league.db");
        assert_eq!(config.username.as_deref(), Some("admin"));
        assert_eq!(config.password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_missing_url_key_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("application.properties");
        std::fs::write(&path, "db.username=\n").unwrap();

        let config = load_database_config(&path, dir.path()).unwrap();
        assert_eq!(config.url, DatabaseConfig::in_data_dir(dir.path()).url);
        assert_eq!(config.username, None);
    }

    #[test]
    fn test_malformed_line_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("application.properties");
        std::fs::write(&path, "db.url=sqlite://a.db\njust some words\n").unwrap();

        match load_database_config(&path, dir.path()) {
            Err(ConfigError::Malformed { content, .. }) => {
                assert!(content.contains("just some words"), "got {content}");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = DatabaseConfig {
            url: "sqlite://x.db".to_string(),
            username: Some("admin".to_string()),
            password: Some("s3cret".to_string()),
        };
        let shown = format!("{config:?}");
        assert!(!shown.contains("s3cret"));
        assert!(shown.contains("redacted"));
    }
}

//! Configuration management.
//!
//! Settings come from three layers: built-in defaults, an optional
//! `perch.toml` in the data directory, and environment variables
//! (`PERCH_*`). The data directory holds the SQLite database.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::repository::DbContext;

/// Default bind address for the web server.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Posts per feed page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default session lifetime in days.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 30;

/// Optional on-disk configuration file (`perch.toml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub bind: Option<String>,
    pub page_size: Option<usize>,
    pub session_ttl_days: Option<i64>,
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding the database and config file.
    pub data_dir: PathBuf,
    /// Bind address for `serve` (overridable per invocation).
    pub bind: String,
    /// Posts per feed page.
    pub page_size: usize,
    /// Session lifetime in days.
    pub session_ttl_days: i64,
}

impl Settings {
    /// Load settings, resolving the data directory from the CLI flag,
    /// `PERCH_DATA_DIR`, or the `./perch-data` default, in that order.
    pub fn load(data_dir_flag: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = data_dir_flag
            .or_else(|| std::env::var_os("PERCH_DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("perch-data"));

        let file = Self::read_config_file(&data_dir.join("perch.toml"))?;

        Ok(Self {
            bind: std::env::var("PERCH_BIND")
                .ok()
                .or(file.bind)
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            page_size: file.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            session_ttl_days: file.session_ttl_days.unwrap_or(DEFAULT_SESSION_TTL_DAYS),
            data_dir,
        })
    }

    fn read_config_file(path: &Path) -> anyhow::Result<ConfigFile> {
        if !path.exists() {
            return Ok(ConfigFile::default());
        }
        let raw = fs::read_to_string(path)?;
        let parsed = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("invalid config file {}: {}", path.display(), e))?;
        Ok(parsed)
    }

    /// Path to the SQLite database.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("perch.sqlite")
    }

    /// Create the data directory if missing.
    pub fn ensure_directories(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Create a database context for the configured database.
    pub fn create_db_context(&self) -> DbContext {
        DbContext::new(&self.database_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = tempdir().unwrap();
        let settings = Settings::load(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(settings.session_ttl_days, DEFAULT_SESSION_TTL_DAYS);
        assert_eq!(settings.database_path(), dir.path().join("perch.sqlite"));
    }

    #[test]
    fn test_config_file_overrides() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("perch.toml"),
            "page_size = 25\nsession_ttl_days = 7\n",
        )
        .unwrap();
        let settings = Settings::load(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.session_ttl_days, 7);
    }

    #[test]
    fn test_invalid_config_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("perch.toml"), "page_size = \"ten\"").unwrap();
        assert!(Settings::load(Some(dir.path().to_path_buf())).is_err());
    }
}

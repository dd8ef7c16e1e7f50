use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// CLI configuration, loaded from `catalog.toml` when present.
///
/// Precedence: config file < `CATALOG_*` environment variables < CLI flags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Database file; `catalog.db` in the working directory by default.
    pub database: Option<PathBuf>,

    /// CSV of `username,password` rows backing the session gate.
    pub credentials: Option<PathBuf>,

    /// Whether commands must present credentials at all.
    #[serde(default)]
    pub require_login: bool,
}

impl CatalogConfig {
    /// Load from `path`; a missing file is the default configuration, a
    /// present-but-broken one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            let mut config = Self::default();
            config.apply_env();
            return Ok(config);
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: Self = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(db) = std::env::var("CATALOG_DB") {
            self.database = Some(PathBuf::from(db));
        }
        if let Ok(creds) = std::env::var("CATALOG_CREDENTIALS") {
            self.credentials = Some(PathBuf::from(creds));
        }
        if let Ok(flag) = std::env::var("CATALOG_REQUIRE_LOGIN") {
            self.require_login = matches!(flag.as_str(), "1" | "true" | "TRUE" | "True");
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| PathBuf::from("catalog.db"))
    }
}

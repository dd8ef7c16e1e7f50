use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::config::CatalogConfig;
use crate::csv;

// Fallback pair used when no credentials file is configured.
const FALLBACK_USER: &str = "admin";
const FALLBACK_PASSWORD: &str = "admin123";

/// Session gate for the presentation layer.
///
/// Credentials live in a small CSV of `username,password` rows; without one
/// the single fallback pair applies. The core crates never see the identity:
/// there is no per-user data partitioning to feed it into.
pub fn enforce(config: &CatalogConfig, user: Option<&str>, password: Option<&str>) -> Result<()> {
    if !config.require_login {
        return Ok(());
    }
    let (Some(user), Some(password)) = (user, password) else {
        bail!("this catalog requires login: pass --user and --password");
    };
    if verify(config.credentials.as_deref(), user, password)? {
        log::debug!("session gate passed for {user}");
        Ok(())
    } else {
        bail!("invalid credentials for {user}");
    }
}

fn verify(credentials_file: Option<&Path>, user: &str, password: &str) -> Result<bool> {
    let Some(path) = credentials_file else {
        return Ok(user == FALLBACK_USER && password == FALLBACK_PASSWORD);
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading credentials {}", path.display()))?;
    let accepted = csv::parse_rows(&text).into_iter().any(|row| {
        row.len() >= 2 && row[0] == user && row[1] == password
    });
    Ok(accepted)
}

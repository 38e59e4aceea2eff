use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

/// Upper bound on a history list; smaller limits may be configured.
pub const MAX_HISTORY_LIMIT: usize = 10;
pub const DEFAULT_HISTORY_LIMIT: usize = MAX_HISTORY_LIMIT;

/// Digest scheme used when registering new users. Verification always
/// accepts both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    #[default]
    Argon2,
    /// 32-bit rolling hash kept for stores written by the browser version.
    /// Not a security mechanism.
    Legacy,
}

impl FromStr for PasswordScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "argon2" => Ok(Self::Argon2),
            "legacy" => Ok(Self::Legacy),
            other => anyhow::bail!("unknown password scheme `{other}`"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub history_limit: usize,
    pub password_scheme: PasswordScheme,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".profitcheck"),
            history_limit: DEFAULT_HISTORY_LIMIT,
            password_scheme: PasswordScheme::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let data_dir = std::env::var("PROFITCHECK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let history_limit = match std::env::var("PROFITCHECK_HISTORY_LIMIT") {
            Ok(v) => parse_history_limit(&v)?,
            Err(_) => defaults.history_limit,
        };
        let password_scheme = match std::env::var("PROFITCHECK_PASSWORD_SCHEME") {
            Ok(v) => v.parse()?,
            Err(_) => defaults.password_scheme,
        };
        Ok(Self {
            data_dir,
            history_limit,
            password_scheme,
        })
    }
}

fn parse_history_limit(raw: &str) -> anyhow::Result<usize> {
    let limit = raw
        .trim()
        .parse::<usize>()
        .with_context(|| format!("PROFITCHECK_HISTORY_LIMIT `{raw}` is not a number"))?;
    anyhow::ensure!(
        (1..=MAX_HISTORY_LIMIT).contains(&limit),
        "PROFITCHECK_HISTORY_LIMIT must be between 1 and {MAX_HISTORY_LIMIT}, got {limit}"
    );
    Ok(limit)
}

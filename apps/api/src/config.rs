use std::time::Duration;

use anyhow::{Context, Result};

use crate::jobs::sources::{ARBEITNOW_URL, REMOTIVE_URL};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub jobs_top_k: usize,
    pub job_fetch_timeout: Duration,
    pub enable_external_job_sources: bool,
    pub remotive_url: String,
    pub arbeitnow_url: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            jobs_top_k: var("JOBS_TOP_K", "10")
                .parse::<usize>()
                .context("JOBS_TOP_K must be a non-negative integer")?,
            job_fetch_timeout: Duration::from_secs(
                var("JOB_FETCH_TIMEOUT_SECS", "45")
                    .parse::<u64>()
                    .context("JOB_FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            enable_external_job_sources: parse_bool(&var("ENABLE_EXTERNAL_JOB_SOURCES", "true"))
                .context("ENABLE_EXTERNAL_JOB_SOURCES must be true or false")?,
            remotive_url: var("REMOTIVE_URL", REMOTIVE_URL),
            arbeitnow_url: var("ARBEITNOW_URL", ARBEITNOW_URL),
            max_upload_bytes: var("MAX_UPLOAD_BYTES", "10485760")
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("invalid boolean '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.jobs_top_k, 10);
        assert_eq!(config.job_fetch_timeout, Duration::from_secs(45));
        assert!(config.enable_external_job_sources);
        assert_eq!(config.remotive_url, REMOTIVE_URL);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("JOBS_TOP_K", "3"),
            ("ENABLE_EXTERNAL_JOB_SOURCES", "off"),
            ("JOB_FETCH_TIMEOUT_SECS", "2"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.jobs_top_k, 3);
        assert!(!config.enable_external_job_sources);
        assert_eq!(config.job_fetch_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_invalid_bool_is_an_error() {
        assert!(config_from(&[("ENABLE_EXTERNAL_JOB_SOURCES", "maybe")]).is_err());
    }
}

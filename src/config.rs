//! Process configuration, read once at startup.
//!
//! Everything is parsed through a lookup function so tests can inject
//! fixtures; [`AppConfig::from_env`] wires it to the process environment
//! after loading `.env`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::generators::common::get_assets_dir;

const DEFAULT_OUTPUT_DIR: &str = "./output";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TYPST_BIN: &str = "typst";
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
const LOGO_FILE: &str = "logo.png";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value '{value}' for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Identity of the organization receiving the authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartyProfile {
    pub name: String,
    pub short_name: String,
    pub tax_id: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub number: String,
    pub neighborhood: String,
}

impl CounterpartyProfile {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| -> Result<String, ConfigError> {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        Ok(Self {
            name: required("BENEFICIARY_COMPANY")?,
            short_name: required("SHORT_NAME_OF_THE_BENEFICIARY_COMPANY")?,
            tax_id: required("CNPJ_BENEFICIARY_COMPANY")?,
            city: required("BENEFICIARY_COMPANY_CITY")?,
            state: required("BENEFICIARY_COMPANY_STATE")?,
            address: required("BENEFICIARY_COMPANY_ADDRESS")?,
            number: required("BENEFICIARY_COMPANY_NUMBER")?,
            neighborhood: required("BENEFICIARY_COMPANY_NEIGHBORHOOD")?,
        })
    }
}

/// What the batch does when one partner's document fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failed document and report its error.
    FailFast,
    /// Attempt every partner and report the failures at the end.
    #[default]
    BestEffort,
}

impl FromStr for FailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "fail-fast" => Ok(Self::FailFast),
            "best-effort" => Ok(Self::BestEffort),
            _ => Err(ConfigError::Invalid {
                var: "FAILURE_POLICY",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub db_acquire_timeout: Duration,
    pub output_dir: PathBuf,
    pub logo_path: PathBuf,
    pub typst_bin: PathBuf,
    pub failure_policy: FailurePolicy,
    pub bind_addr: String,
    pub counterparty: CounterpartyProfile,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let db_acquire_timeout = match lookup("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid {
                    var: "DATABASE_ACQUIRE_TIMEOUT_SECS",
                    value: value.clone(),
                })?,
            None => Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        };

        let output_dir = lookup("OUTPUT_DIR").unwrap_or_else(|| {
            log::warn!("OUTPUT_DIR not set, using default: {}", DEFAULT_OUTPUT_DIR);
            DEFAULT_OUTPUT_DIR.to_string()
        });

        let logo_path = lookup("LOGO_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| get_assets_dir().join(LOGO_FILE));

        let failure_policy = match lookup("FAILURE_POLICY") {
            Some(value) => value.parse()?,
            None => FailurePolicy::default(),
        };

        Ok(Self {
            database_url,
            db_acquire_timeout,
            output_dir: PathBuf::from(output_dir),
            logo_path,
            typst_bin: PathBuf::from(
                lookup("TYPST_BIN").unwrap_or_else(|| DEFAULT_TYPST_BIN.to_string()),
            ),
            failure_policy,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            counterparty: CounterpartyProfile::from_lookup(&lookup)?,
        })
    }
}

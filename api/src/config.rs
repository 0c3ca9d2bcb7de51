use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Directory served under `/image`
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => compose_database_url(&get)?,
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => 3000,
        };

        Ok(Self {
            database_url,
            port,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("image")),
        })
    }
}

/// Assemble a connection string from its parts
///
/// User and password are percent-encoded so special characters survive.
fn compose_database_url<F>(get: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let prefix = get("DB_PREFIX").unwrap_or_else(|| "postgres://".to_string());
    let user = get("DB_USER").ok_or(ConfigError::Missing("DATABASE_URL or DB_USER"))?;
    let password = get("DB_PWD").ok_or(ConfigError::Missing("DATABASE_URL or DB_PWD"))?;
    let host = get("DB_HOST").unwrap_or_else(|| "localhost:5432".to_string());
    let name = get("DB_NAME").unwrap_or_else(|| "lessons".to_string());
    let params = get("DB_PARAMS").unwrap_or_default();

    Ok(format!(
        "{}{}:{}@{}/{}{}",
        prefix,
        urlencoding::encode(&user),
        urlencoding::encode(&password),
        host,
        name,
        params
    ))
}

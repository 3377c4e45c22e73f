use std::{env, path::PathBuf, time::Duration};

use crate::error::AppError;

pub const DEFAULT_FORGE_BASE_URL: &str = "https://developer.api.autodesk.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub forge_base_url: String,
    pub upstream_timeout: Duration,
    pub token_cookie: String,
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid SERVER_PORT: {err}")))?;

        let forge_base_url = env::var("FORGE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_FORGE_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();
        if forge_base_url.is_empty() {
            return Err(AppError::Config("FORGE_BASE_URL must not be empty".into()));
        }

        let timeout_secs: u64 = env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid UPSTREAM_TIMEOUT_SECS: {err}")))?;

        let token_cookie = env::var("TOKEN_COOKIE").unwrap_or_else(|_| "access_token".into());

        let log_dir = PathBuf::from(env::var("TREE_LOG_DIR").unwrap_or_else(|_| "../log".into()));

        Ok(Self {
            host,
            port,
            forge_base_url,
            upstream_timeout: Duration::from_secs(timeout_secs),
            token_cookie,
            log_dir,
        })
    }
}

use std::env;

use anyhow::{Context, bail};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub admin_secret: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .or_else(|_| env::var("DB_URI"))
            .context("DATABASE_URL is not set")?;
        let admin_secret = env::var("ADMIN_SECRET").context("ADMIN_SECRET is not set")?;
        if admin_secret.trim().is_empty() {
            bail!("ADMIN_SECRET must not be empty");
        }
        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        Ok(Self {
            port,
            database_url,
            admin_secret,
            host,
        })
    }
}

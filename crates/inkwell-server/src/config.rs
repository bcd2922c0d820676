use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use tracing::warn;

/// Runtime settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub display_zone: Tz,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let db_path = std::env::var("INKWELL_DB_PATH").unwrap_or_else(|_| "data/history.db".into());
        let host = std::env::var("INKWELL_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("INKWELL_PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .context("INKWELL_PORT must be a port number")?;
        let display_zone = resolve_timezone(std::env::var("TZ").ok().as_deref());

        Ok(Self {
            db_path: db_path.into(),
            host,
            port,
            display_zone,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

/// Parse an IANA zone name. Unset or empty means UTC; an unknown name also
/// falls back to UTC, with a warning, rather than stopping startup.
pub fn resolve_timezone(raw: Option<&str>) -> Tz {
    let name = match raw.map(str::trim) {
        None | Some("") => return Tz::UTC,
        Some(name) => name,
    };

    match name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(e) => {
            warn!("Invalid timezone '{}', defaulting to UTC: {}", name, e);
            Tz::UTC
        }
    }
}

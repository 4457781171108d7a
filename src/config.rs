//! Service configuration.
//!
//! Values come from built-in defaults, then `VENDOR_*` environment variables,
//! then command-line flags, each layer overriding the previous one.

use crate::default_catalog_path;
use anyhow::{Context, Result, bail};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

pub const BIND_ADDR_ENV: &str = "VENDOR_BIND_ADDR";
pub const CATALOG_PATH_ENV: &str = "VENDOR_CATALOG_PATH";
pub const LOG_LEVEL_ENV: &str = "VENDOR_LOG_LEVEL";

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub catalog_path: PathBuf,
    pub log_level: Level,
}

impl ServiceConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each `VENDOR_*` key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr = match present(BIND_ADDR_ENV) {
            Some(raw) => {
                parse_bind_addr(&raw).with_context(|| format!("reading {BIND_ADDR_ENV}"))?
            }
            None => parse_bind_addr(DEFAULT_BIND_ADDR)?,
        };
        let catalog_path = present(CATALOG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_catalog_path);
        let log_level = match present(LOG_LEVEL_ENV) {
            Some(raw) => {
                parse_log_level(&raw).with_context(|| format!("reading {LOG_LEVEL_ENV}"))?
            }
            None => Level::INFO,
        };

        Ok(Self {
            bind_addr,
            catalog_path,
            log_level,
        })
    }

    /// Apply `--bind`, `--catalog`, and `--log-level` flags.
    pub fn apply_args<I>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .with_context(|| format!("{flag} requires a value"))
            };
            match flag.as_str() {
                "--bind" => self.bind_addr = parse_bind_addr(&value()?)?,
                "--catalog" => self.catalog_path = PathBuf::from(value()?),
                "--log-level" => self.log_level = parse_log_level(&value()?)?,
                other => bail!("unknown argument '{other}'"),
            }
        }
        Ok(())
    }
}

/// Path to the catalog honoring `VENDOR_CATALOG_PATH`, for tools that need
/// nothing else from the service configuration.
pub fn catalog_path_from_env() -> PathBuf {
    env::var(CATALOG_PATH_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_catalog_path)
}

fn parse_bind_addr(raw: &str) -> Result<SocketAddr> {
    raw.trim()
        .parse()
        .with_context(|| format!("invalid bind address '{raw}' (expected host:port)"))
}

fn parse_log_level(raw: &str) -> Result<Level> {
    Level::from_str(raw.trim()).with_context(|| {
        format!("invalid log level '{raw}' (expected trace|debug|info|warn|error)")
    })
}

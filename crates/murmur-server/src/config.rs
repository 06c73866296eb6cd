use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = lookup("MURMUR_DB_PATH").unwrap_or_else(|| "murmur.db".into());
        let host = lookup("MURMUR_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("MURMUR_PORT")
            .unwrap_or_else(|| "8080".into())
            .parse()
            .context("MURMUR_PORT must be a port number")?;

        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", host, port))?;

        Ok(Self {
            db_path: db_path.into(),
            addr,
        })
    }

    pub fn in_memory(&self) -> bool {
        self.db_path.as_os_str() == IN_MEMORY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("murmur.db"));
        assert_eq!(cfg.addr, "0.0.0.0:8080".parse().unwrap());
        assert!(!cfg.in_memory());
    }

    #[test]
    fn overrides() {
        let cfg = config(&[
            ("MURMUR_DB_PATH", ":memory:"),
            ("MURMUR_HOST", "127.0.0.1"),
            ("MURMUR_PORT", "9000"),
        ])
        .unwrap();
        assert!(cfg.in_memory());
        assert_eq!(cfg.addr, "127.0.0.1:9000".parse().unwrap());
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(config(&[("MURMUR_PORT", "eighty")]).is_err());
        assert!(config(&[("MURMUR_PORT", "70000")]).is_err());
        assert!(config(&[("MURMUR_HOST", "not a host")]).is_err());
    }
}

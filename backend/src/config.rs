//! Server settings read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `SOH_HOST` | `127.0.0.1` |
//! | `SOH_PORT` | `8080` |
//! | `SOH_DB_PATH` | `soh_audits.sqlite` |
//! | `SOH_ADMIN_ID` | `admin` |
//! | `SOH_ADMIN_PASSWORD` | `admin123` |
//! | `SOH_OPEN_BROWSER` | `true` |
//! | `SOH_JSON_LIMIT` | `10485760` (10 MB) |

use common::workflow::StaticAdminGate;
use log::warn;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub admin_id: String,
    pub admin_password: String,
    pub open_browser: bool,
    pub json_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            db_path: PathBuf::from("soh_audits.sqlite"),
            admin_id: "admin".to_string(),
            admin_password: "admin123".to_string(),
            open_browser: true,
            json_limit: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unparseable values fall back to
    /// the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("SOH_HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "SOH_PORT", defaults.port),
            db_path: lookup("SOH_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            admin_id: lookup("SOH_ADMIN_ID").unwrap_or(defaults.admin_id),
            admin_password: lookup("SOH_ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
            open_browser: parsed(&lookup, "SOH_OPEN_BROWSER", defaults.open_browser),
            json_limit: parsed(&lookup, "SOH_JSON_LIMIT", defaults.json_limit),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn admin_gate(&self) -> StaticAdminGate {
        StaticAdminGate::new(&self.admin_id, &self.admin_password)
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value {:?}, using the default", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_variables_use_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.url(), "http://127.0.0.1:8080");
        assert!(config.open_browser);
    }

    #[test]
    fn overrides_and_bad_values() {
        let vars: HashMap<&str, &str> = [
            ("SOH_PORT", "9090"),
            ("SOH_OPEN_BROWSER", "false"),
            ("SOH_JSON_LIMIT", "lots"),
            ("SOH_DB_PATH", "/tmp/x.sqlite"),
        ]
        .into_iter()
        .collect();
        let config = ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.port, 9090);
        assert!(!config.open_browser);
        assert_eq!(config.json_limit, 10 * 1024 * 1024);
        assert_eq!(config.db_path, PathBuf::from("/tmp/x.sqlite"));
    }
}

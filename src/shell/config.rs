use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    /// JSON file holding tracker data. In-memory only when unset.
    pub data_file: Option<PathBuf>,
}

impl AppConfig {
    /// Reads `HOST`, `PORT` and `TRACKER_DATA_FILE`, after loading a `.env`
    /// file when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = match value("HOST") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "HOST",
                value: raw,
            })?,
            None => DEFAULT_HOST.parse().map_err(|_| ConfigError::Invalid {
                name: "HOST",
                value: DEFAULT_HOST.into(),
            })?,
        };
        let port = match value("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };
        let data_file = value("TRACKER_DATA_FILE").map(PathBuf::from);

        Ok(Self {
            host,
            port,
            data_file,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod app_config_tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[rstest]
    fn it_should_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr().to_string(), "0.0.0.0:3001");
        assert_eq!(config.data_file, None);
    }

    #[rstest]
    fn it_should_read_every_variable() {
        let config = AppConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("TRACKER_DATA_FILE", "data/tracker.json"),
        ]))
        .unwrap();
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.data_file, Some(PathBuf::from("data/tracker.json")));
    }

    #[rstest]
    fn it_should_treat_blank_values_as_unset() {
        let config = AppConfig::from_lookup(lookup(&[("PORT", " "), ("TRACKER_DATA_FILE", "")]))
            .unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.data_file, None);
    }

    #[rstest]
    #[case("PORT", "eighty")]
    #[case("PORT", "70000")]
    #[case("HOST", "localhost:3000")]
    fn it_should_reject_unparseable_values(#[case] name: &'static str, #[case] raw: &str) {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[(name, raw)])),
            Err(ConfigError::Invalid {
                name,
                value: raw.to_string(),
            })
        );
    }
}

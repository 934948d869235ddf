use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    str::FromStr,
};

use thiserror::Error;

const DEFAULT_PORT: u16 = 3978;
const DEFAULT_DATA_PATH: &str = "data/avengers.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) listen_addr: SocketAddr,
    pub(crate) data_path: PathBuf,
    /// Defer reading the data file until the first query
    pub(crate) lazy_load: bool,
    pub(crate) metrics_addr: Option<SocketAddr>,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host: IpAddr =
            parse_var(&lookup, "HOST")?.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port: u16 = parse_var(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT);
        let metrics_port: Option<u16> = parse_var(&lookup, "METRICS_PORT")?;
        let metrics_addr = metrics_port.map(|port| SocketAddr::new(host, port));
        let data_path = lookup("AVENGERS_DATA_PATH")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let lazy_load = match lookup("AVENGERS_LAZY_LOAD").as_deref() {
            None | Some("") => false,
            Some(value) => parse_flag(value).ok_or_else(|| ConfigError::InvalidValue {
                name: "AVENGERS_LAZY_LOAD",
                value: value.to_string(),
            })?,
        };
        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            data_path,
            lazy_load,
            metrics_addr,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) if value.is_empty() => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

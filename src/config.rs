use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "LetterRegister";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_PORT: u16 = 8080;

/// Environment variable names.
pub const ENV_HOST: &str = "REGISTER_HOST";
pub const ENV_PORT: &str = "REGISTER_PORT";
pub const ENV_DB_PATH: &str = "REGISTER_DB_PATH";
pub const ENV_ADMIN_TOKEN: &str = "REGISTER_ADMIN_TOKEN";
pub const ENV_SEED_SAMPLE: &str = "REGISTER_SEED_SAMPLE";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "letter_register=info,tower_http=info"
}

/// Application data directory: the platform data dir, falling back to
/// the working directory when none can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default SQLite database location.
pub fn default_db_path() -> PathBuf {
    app_data_dir().join("register.db")
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub db_path: PathBuf,
    /// `None` means a token is generated at startup.
    pub admin_token: Option<String>,
    pub seed_sample_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            db_path: default_db_path(),
            admin_token: None,
            seed_sample_data: false,
        }
    }
}

impl ServerConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable source. Unset or blank
    /// variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(value) = get(ENV_HOST) {
            config.host = value.parse().map_err(|_| ConfigError::InvalidValue {
                name: ENV_HOST,
                value,
            })?;
        }
        if let Some(value) = get(ENV_PORT) {
            config.port = value.parse().map_err(|_| ConfigError::InvalidValue {
                name: ENV_PORT,
                value,
            })?;
        }
        if let Some(value) = get(ENV_DB_PATH) {
            config.db_path = PathBuf::from(value);
        }
        config.admin_token = get(ENV_ADMIN_TOKEN);
        if let Some(value) = get(ENV_SEED_SAMPLE) {
            config.seed_sample_data = parse_flag(&value).ok_or(ConfigError::InvalidValue {
                name: ENV_SEED_SAMPLE,
                value,
            })?;
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the calculator surfaces.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            display: DisplayConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log filter used when `RUST_LOG` is unset.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Labels rendered by the payout form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Name shown in the intermediary field for three-party contracts.
    pub intermediary_name: String,
    /// Shown (disabled) in the intermediary field for two-party contracts.
    pub not_applicable_label: String,
    /// Shown instead of an amount when no rule covers the selection.
    pub placeholder: String,
    pub currency_suffix: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            intermediary_name: "드롭샷매치".to_string(),
            not_applicable_label: "해당 없음".to_string(),
            placeholder: "추가 예정".to_string(),
            currency_suffix: "원".to_string(),
        }
    }
}

impl DisplayConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            intermediary_name: label_from_env(
                "PAYOUT_INTERMEDIARY_NAME",
                defaults.intermediary_name,
            )?,
            not_applicable_label: label_from_env(
                "PAYOUT_NOT_APPLICABLE_LABEL",
                defaults.not_applicable_label,
            )?,
            placeholder: label_from_env("PAYOUT_PLACEHOLDER", defaults.placeholder)?,
            // An empty suffix is allowed; it drops the unit from rendered amounts.
            currency_suffix: env::var("PAYOUT_CURRENCY_SUFFIX")
                .map(|value| value.trim().to_string())
                .unwrap_or(defaults.currency_suffix),
        })
    }
}

fn label_from_env(name: &'static str, default: String) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyLabel { name }),
        Ok(value) => Ok(value.trim().to_string()),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    EmptyLabel { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::EmptyLabel { name } => write!(f, "{name} must not be blank when set"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort | ConfigError::EmptyLabel { .. } => None,
        }
    }
}

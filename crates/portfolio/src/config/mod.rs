use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_SECRET_KEY: &str = "dev_secret_key";

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub secret_key: String,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub database: DatabaseConfig,
    pub mail: Option<MailConfig>,
    pub projects: ProjectsConfig,
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
            .map_err(|_| ConfigError::InvalidPort("APP_PORT"))?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let secret_key = env::var("SECRET_KEY").unwrap_or_else(|_| DEFAULT_SECRET_KEY.to_string());
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://db.sqlite3".to_string());

        Ok(Self {
            environment,
            secret_key,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            database: DatabaseConfig { url: database_url },
            mail: MailConfig::from_env()?,
            projects: ProjectsConfig::from_env()?,
        })
    }

    /// True when the session secret is still the development placeholder.
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the relational store holding contact submissions.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// SMTP relay settings. Present only when both username and password are set.
#[derive(Clone)]
pub struct MailConfig {
    pub server: String,
    pub port: u16,
    pub use_tls: bool,
    pub username: String,
    pub password: String,
    pub default_sender: String,
    pub recipient: String,
    pub timeout: Duration,
}

impl MailConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let username = non_empty_var("MAIL_USERNAME");
        let password = non_empty_var("MAIL_PASSWORD");
        let (Some(username), Some(password)) = (username, password) else {
            return Ok(None);
        };

        let server = env::var("MAIL_SERVER").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let port = env::var("MAIL_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort("MAIL_PORT"))?;
        let use_tls = parse_flag("MAIL_USE_TLS", true)?;
        let default_sender = non_empty_var("MAIL_DEFAULT_SENDER").unwrap_or_else(|| username.clone());
        let recipient = non_empty_var("MAIL_RECIPIENT").unwrap_or_else(|| username.clone());
        let timeout = parse_seconds("MAIL_TIMEOUT_SECS", 5)?;

        Ok(Some(Self {
            server,
            port,
            use_tls,
            username,
            password,
            default_sender,
            recipient,
            timeout,
        }))
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("use_tls", &self.use_tls)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("default_sender", &self.default_sender)
            .field("recipient", &self.recipient)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Where the public repository listing is fetched from.
#[derive(Debug, Clone)]
pub struct ProjectsConfig {
    pub api_base: String,
    pub account: String,
    pub timeout: Duration,
}

impl ProjectsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_base =
            env::var("PROJECTS_API_BASE").unwrap_or_else(|_| "https://api.github.com".to_string());
        let account = env::var("GITHUB_ACCOUNT").unwrap_or_else(|_| "octocat".to_string());
        let timeout = parse_seconds("PROJECTS_TIMEOUT_SECS", 5)?;

        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            account,
            timeout,
        })
    }

    pub fn listing_url(&self) -> String {
        format!("{}/users/{}/repos", self.api_base, self.account)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_flag(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match non_empty_var(key) {
        None => Ok(default),
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidFlag(key)),
        },
    }
}

fn parse_seconds(key: &'static str, default: u64) -> Result<Duration, ConfigError> {
    match non_empty_var(key) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or(ConfigError::InvalidTimeout(key)),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(&'static str),
    InvalidHost { source: std::net::AddrParseError },
    InvalidFlag(&'static str),
    InvalidTimeout(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort(key) => write!(f, "{key} must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFlag(key) => write!(f, "{key} must be true or false"),
            ConfigError::InvalidTimeout(key) => {
                write!(f, "{key} must be a positive number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

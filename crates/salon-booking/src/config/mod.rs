use axum::http::HeaderValue;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_CORS_ORIGINS: &str = "https://nikhaar.vercel.app,http://localhost:3000";
pub const DEFAULT_SHEET_RANGE: &str = "'Nikhaar Beauty Salon'!A:H";
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

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

    pub fn label(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

/// Top-level configuration for the booking service.
///
/// Collaborator sections ([`SheetsConfig`], [`MailConfig`]) are loaded on their
/// own; a missing credential disables that side effect only.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "5001".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let origins =
            env::var("APP_CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            cors: CorsConfig::parse(&origins)?,
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

/// Log filter fallback used when `RUST_LOG` is not set.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Browser origins allowed to call the booking endpoint with credentials.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<HeaderValue>,
}

impl CorsConfig {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let allowed_origins = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin {
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { allowed_origins })
    }
}

/// Destination of the appointment spreadsheet and the service account used to write it.
#[derive(Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub range: String,
    pub client_email: String,
    pub private_key: String,
}

impl SheetsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let spreadsheet_id = required("SPREADSHEET_ID")?;
        let client_email = required("GOOGLE_CLIENT_EMAIL")?;
        // Keys pasted into a single-line env var carry escaped newlines.
        let private_key = required("GOOGLE_PRIVATE_KEY")?.replace("\\n", "\n");
        let range = env::var("SHEET_RANGE").unwrap_or_else(|_| DEFAULT_SHEET_RANGE.to_string());

        Ok(Self {
            spreadsheet_id,
            range,
            client_email,
            private_key,
        })
    }
}

impl fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("range", &self.range)
            .field("client_email", &self.client_email)
            .finish_non_exhaustive()
    }
}

/// SMTP account used for confirmations plus the operator inbox that receives booking alerts.
#[derive(Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub user: String,
    pub app_password: String,
    pub operator_address: String,
}

impl MailConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let user = required("EMAIL_USER")?;
        let app_password = required("EMAIL_APP_PASSWORD")?;
        let operator_address = required("ADMIN_EMAIL")?;
        let smtp_host = env::var("SMTP_HOST").unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string());

        Ok(Self {
            smtp_host,
            user,
            app_password,
            operator_address,
        })
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("user", &self.user)
            .field("operator_address", &self.operator_address)
            .finish_non_exhaustive()
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidOrigin { value: String },
    MissingVar(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidOrigin { value } => {
                write!(f, "APP_CORS_ORIGINS contains an invalid origin '{value}'")
            }
            ConfigError::MissingVar(name) => write!(f, "{name} is not set"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidOrigin { .. }
            | ConfigError::MissingVar(_) => None,
        }
    }
}

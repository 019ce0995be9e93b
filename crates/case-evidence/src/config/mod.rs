use std::env;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use tracing::info;

use crate::workflows::evidence::{
    CatalogError, CatalogRegistry, ResolutionPolicy, SlotCatalog, VisaType,
};

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
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub evidence: EvidenceConfig,
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
        let ansi = flag("APP_LOG_ANSI", false)?;

        let raw_visa_type =
            env::var("APP_DEFAULT_VISA_TYPE").unwrap_or_else(|_| "marriage_green_card".to_string());
        let default_visa_type = VisaType::parse(&raw_visa_type)
            .ok_or(ConfigError::InvalidVisaType(raw_visa_type))?;

        let strict_quality_check = flag("APP_STRICT_QUALITY_CHECK", false)?;
        let catalog_path = env::var("APP_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, ansi },
            evidence: EvidenceConfig {
                default_visa_type,
                strict_quality_check,
                catalog_path,
            },
        })
    }
}

fn flag(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::InvalidFlag { name, value }),
        },
        Err(_) => Ok(default),
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
    pub ansi: bool,
}

/// Catalog selection and resolution leniency.
#[derive(Debug, Clone)]
pub struct EvidenceConfig {
    pub default_visa_type: VisaType,
    pub strict_quality_check: bool,
    /// Optional JSON catalog replacing the built-in one for `default_visa_type`.
    pub catalog_path: Option<PathBuf>,
}

impl EvidenceConfig {
    pub fn policy(&self) -> ResolutionPolicy {
        if self.strict_quality_check {
            ResolutionPolicy::strict()
        } else {
            ResolutionPolicy::default()
        }
    }

    /// Build the catalog registry, validating any custom catalog at load time.
    pub fn registry(&self) -> Result<CatalogRegistry, CatalogError> {
        let registry = CatalogRegistry::standard()?;

        let Some(path) = &self.catalog_path else {
            return Ok(registry);
        };

        let reader = BufReader::new(File::open(path)?);
        let catalog = SlotCatalog::from_json(self.default_visa_type, reader)?;
        info!(
            path = %path.display(),
            visa_type = self.default_visa_type.key(),
            templates = catalog.templates().len(),
            "loaded custom evidence catalog"
        );
        Ok(registry.with_catalog(catalog))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidVisaType(String),
    InvalidFlag { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidVisaType(value) => {
                write!(f, "APP_DEFAULT_VISA_TYPE '{value}' is not a supported visa type")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be a boolean flag, found '{value}'")
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::evidence::MissingQualityCheck;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_ANSI",
            "APP_DEFAULT_VISA_TYPE",
            "APP_STRICT_QUALITY_CHECK",
            "APP_CATALOG_PATH",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.evidence.default_visa_type, VisaType::MarriageGreenCard);
        assert!(!config.evidence.strict_quality_check);
        assert!(config.evidence.catalog_path.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn strict_quality_flag_selects_strict_policy() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_STRICT_QUALITY_CHECK", "true");
        env::set_var("APP_DEFAULT_VISA_TYPE", "h1b-specialty");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.evidence.default_visa_type, VisaType::H1bSpecialty);
        assert_eq!(
            config.evidence.policy().missing_quality_check,
            MissingQualityCheck::TreatAsIssue
        );
        reset_env();
    }

    #[test]
    fn rejects_unknown_visa_type_and_bad_flags() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DEFAULT_VISA_TYPE", "tourist");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidVisaType(value)) if value == "tourist"
        ));

        reset_env();
        env::set_var("APP_STRICT_QUALITY_CHECK", "sometimes");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidFlag { name: "APP_STRICT_QUALITY_CHECK", .. })
        ));
        reset_env();
    }

    #[test]
    fn registry_rejects_missing_catalog_file() {
        let config = EvidenceConfig {
            default_visa_type: VisaType::FianceK1,
            strict_quality_check: false,
            catalog_path: Some(PathBuf::from("/nonexistent/catalog.json")),
        };
        assert!(matches!(config.registry(), Err(CatalogError::Io(_))));
    }
}

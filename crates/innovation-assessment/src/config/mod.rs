use crate::assessment::{AssessmentMode, AssessmentSettings, MissingAnswerPolicy, RatingScaleKind};
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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub assessment: AssessmentSettings,
}

impl AppConfig {
    /// Read `.env` (when present) and the `APP_*` variables, falling back to
    /// development defaults.
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

        let defaults = AssessmentSettings::default();
        let assessment = AssessmentSettings {
            scale: optional_var("APP_RATING_SCALE", parse_scale)?.unwrap_or(defaults.scale),
            mode: optional_var("APP_ASSESSMENT_MODE", parse_mode)?.unwrap_or(defaults.mode),
            missing_answers: optional_var("APP_MISSING_ANSWERS", parse_missing_answers)?
                .unwrap_or(defaults.missing_answers),
            allow_back_navigation: optional_var("APP_ALLOW_BACK_NAVIGATION", parse_flag)?
                .unwrap_or(defaults.allow_back_navigation),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            assessment,
        })
    }
}

fn optional_var<T>(
    variable: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, ConfigError> {
    match env::var(variable) {
        Ok(value) if !value.trim().is_empty() => parse(&value)
            .map(Some)
            .ok_or(ConfigError::InvalidValue { variable, value }),
        _ => Ok(None),
    }
}

pub fn parse_scale(value: &str) -> Option<RatingScaleKind> {
    match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "four_point" | "4" | "4_point" => Some(RatingScaleKind::FourPoint),
        "six_point" | "6" | "6_point" => Some(RatingScaleKind::SixPoint),
        _ => None,
    }
}

pub fn parse_mode(value: &str) -> Option<AssessmentMode> {
    match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "gap" | "gap_analysis" => Some(AssessmentMode::GapAnalysis),
        "single" | "single_state" => Some(AssessmentMode::SingleState),
        _ => None,
    }
}

pub fn parse_missing_answers(value: &str) -> Option<MissingAnswerPolicy> {
    match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "exclude" | "exclude_unanswered" => Some(MissingAnswerPolicy::ExcludeUnanswered),
        "zero" | "zero_fill" => Some(MissingAnswerPolicy::ZeroFill),
        _ => None,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
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

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue { variable: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValue { variable, value } => {
                write!(f, "{} has unsupported value '{}'", variable, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort | ConfigError::InvalidValue { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for variable in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_RATING_SCALE",
            "APP_ASSESSMENT_MODE",
            "APP_MISSING_ANSWERS",
            "APP_ALLOW_BACK_NAVIGATION",
        ] {
            env::remove_var(variable);
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
        assert_eq!(config.assessment, AssessmentSettings::default());
    }

    #[test]
    fn assessment_settings_follow_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("APP_RATING_SCALE", "six-point");
        env::set_var("APP_ASSESSMENT_MODE", "single_state");
        env::set_var("APP_MISSING_ANSWERS", "zero_fill");
        env::set_var("APP_ALLOW_BACK_NAVIGATION", "false");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.assessment.scale, RatingScaleKind::SixPoint);
        assert_eq!(config.assessment.mode, AssessmentMode::SingleState);
        assert_eq!(
            config.assessment.missing_answers,
            MissingAnswerPolicy::ZeroFill
        );
        assert!(!config.assessment.allow_back_navigation);
    }

    #[test]
    fn rejects_unknown_scale() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_RATING_SCALE", "ten_point");

        let error = AppConfig::load().expect_err("unknown scale rejected");
        reset_env();

        assert!(matches!(
            error,
            ConfigError::InvalidValue {
                variable: "APP_RATING_SCALE",
                ..
            }
        ));
        assert_eq!(
            error.to_string(),
            "APP_RATING_SCALE has unsupported value 'ten_point'"
        );
    }

    #[test]
    fn rejects_invalid_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "not-a-port");

        let error = AppConfig::load().expect_err("port must be numeric");
        reset_env();

        assert!(matches!(error, ConfigError::InvalidPort));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        reset_env();
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }
}

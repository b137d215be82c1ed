//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las variables tienen un valor por defecto salvo `DATABASE_URL`.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::services::DEFAULT_WARNING_DAYS;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
    pub max_concurrent_requests: usize,
    pub maintenance_warning_days: i64,
    pub run_migrations: bool,
    pub log_level: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3001,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
            max_concurrent_requests: 256,
            maintenance_warning_days: DEFAULT_WARNING_DAYS,
            run_migrations: true,
            log_level: "info".to_string(),
        }
    }
}

/// Leer una variable opcional y parsearla
pub(crate) fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid value, got '{}'", name, raw)),
        _ => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl EnvironmentConfig {
    /// Cargar la configuración desde el entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
            request_timeout: Duration::from_secs(parse_var(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            max_concurrent_requests: parse_var(
                "MAX_CONCURRENT_REQUESTS",
                defaults.max_concurrent_requests,
            )?,
            maintenance_warning_days: parse_var(
                "MAINTENANCE_WARNING_DAYS",
                defaults.maintenance_warning_days,
            )?,
            run_migrations: parse_var("RUN_MIGRATIONS", defaults.run_migrations)?,
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::default();
        assert_eq!(config.server_url(), "0.0.0.0:3001");
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.maintenance_warning_days, 30);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_parse_origins_skips_blanks() {
        assert_eq!(
            parse_origins("http://localhost:3000, ,https://fleet.example.com"),
            vec!["http://localhost:3000", "https://fleet.example.com"]
        );
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("FLEET_TEST_PORT_GARBAGE", "abc");
        assert!(parse_var::<u16>("FLEET_TEST_PORT_GARBAGE", 1).is_err());
        env::remove_var("FLEET_TEST_PORT_GARBAGE");
        assert_eq!(parse_var::<u16>("FLEET_TEST_PORT_GARBAGE", 7).unwrap(), 7);
    }
}

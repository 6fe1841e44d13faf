use crate::{env_or_default, env_parse_or, ConfigError, Environment, FromEnv};

/// Settings shared by every binary in the workspace
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: Environment,
    /// Forward window used by "due soon" task queries
    pub due_soon_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "tracker".to_string(),
            environment: Environment::Development,
            due_soon_days: 7,
        }
    }
}

impl FromEnv for AppConfig {
    /// Reads from environment variables with sensible defaults:
    /// - SERVICE_NAME: defaults to "tracker"
    /// - APP_ENV: see [`Environment::from_env`]
    /// - DUE_SOON_DAYS: defaults to 7
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            service_name: env_or_default("SERVICE_NAME", "tracker"),
            environment: Environment::from_env(),
            due_soon_days: env_parse_or("DUE_SOON_DAYS", 7)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_from_env_with_defaults() {
        temp_env::with_vars(
            [
                ("SERVICE_NAME", None::<&str>),
                ("APP_ENV", None),
                ("DUE_SOON_DAYS", None),
            ],
            || {
                let config = AppConfig::from_env().unwrap();
                assert_eq!(config, AppConfig::default());
            },
        );
    }

    #[test]
    fn test_app_config_from_env_with_custom_values() {
        temp_env::with_vars(
            [
                ("SERVICE_NAME", Some("tracker-worker")),
                ("APP_ENV", Some("production")),
                ("DUE_SOON_DAYS", Some("3")),
            ],
            || {
                let config = AppConfig::from_env().unwrap();
                assert_eq!(config.service_name, "tracker-worker");
                assert!(config.environment.is_production());
                assert_eq!(config.due_soon_days, 3);
            },
        );
    }

    #[test]
    fn test_app_config_invalid_window() {
        temp_env::with_var("DUE_SOON_DAYS", Some("-1"), || {
            let result = AppConfig::from_env();
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("DUE_SOON_DAYS"));
        });
    }
}

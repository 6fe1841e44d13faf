use crate::{AppConfig, Environment};
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in main() before any fallible operations. Safe to call
/// multiple times.
///
/// Configuration:
/// - Shows file:line where errors occur
/// - Hides environment variables (less noise)
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Default filter when `RUST_LOG` is not set
fn default_filter(environment: &Environment) -> EnvFilter {
    if environment.is_production() {
        EnvFilter::new("warn,domain_projects=info,domain_tasks=info,messaging=info")
    } else {
        EnvFilter::new("info,domain_projects=debug,domain_tasks=debug,messaging=debug")
    }
}

/// Initialize tracing with environment-aware configuration and error span capture.
///
/// - **Production** (`APP_ENV=production`):
///   - JSON format, flattened events, no module targets
///   - Domain crates at info, everything else at warn
///
/// - **Development** (default):
///   - Pretty-printed format
///   - Domain crates at debug, so every published event is visible
///
/// Both install `tracing_error::ErrorLayer` so eyre reports carry span traces.
///
/// Environment variables:
/// - `APP_ENV`: Set to "production" for JSON logs (default: "development")
/// - `RUST_LOG`: Override log levels (e.g., "debug", "domain_tasks=trace")
///
/// # Multiple Calls
///
/// If tracing is already initialized (common in tests) the call is a no-op.
pub fn init_tracing(config: &AppConfig) {
    let environment = config.environment;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(&environment));

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => {
            info!(
                service = %config.service_name,
                environment = ?environment,
                "Tracing initialized"
            );
        }
        Err(_) => {
            debug!("Tracing already initialized, skipping re-initialization");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_development() {
        // Should not panic
        init_tracing(&AppConfig::default());
    }

    #[test]
    fn test_init_tracing_production() {
        let config = AppConfig {
            environment: Environment::Production,
            ..AppConfig::default()
        };
        init_tracing(&config);
    }

    #[test]
    fn test_init_tracing_multiple_calls() {
        let config = AppConfig::default();
        init_tracing(&config);
        init_tracing(&config);
    }

    #[test]
    fn test_init_tracing_with_rust_log_env() {
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            init_tracing(&AppConfig::default());
        });
    }
}

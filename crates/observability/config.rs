use std::env;

#[derive(Clone)]
pub(crate) struct ServiceContext {
    pub(crate) service_name: String,
    pub(crate) environment: String,
    pub(crate) component: String,
}

#[derive(Clone)]
pub(crate) struct ObservabilityConfig {
    pub(crate) service_context: ServiceContext,
    /// Filter used when `RUST_LOG` is unset.
    pub(crate) default_filter: String,
    /// Warnings captured during config parsing so they can be logged after tracing is initialized.
    pub(crate) warnings: Vec<String>,
}

impl ObservabilityConfig {
    pub(crate) fn from_env(component: &str) -> Self {
        let component = component.trim().to_string();

        let service_name = env_string("SERVICE_NAME")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| component.clone());

        let environment = env_string("STAGE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        let mut warnings = Vec::new();
        let default_filter = match env_string("LOG_LEVEL") {
            Some(raw) if !raw.trim().is_empty() => match parse_level(&raw) {
                Some(level) => level.to_string(),
                None => {
                    warnings.push(format!(
                        "LOG_LEVEL is invalid (value: {raw}); defaulting to info"
                    ));
                    "info".to_string()
                }
            },
            _ => "info".to_string(),
        };

        Self {
            service_context: ServiceContext {
                service_name,
                environment,
                component,
            },
            default_filter,
            warnings,
        }
    }
}

fn parse_level(input: &str) -> Option<&'static str> {
    match input.trim().to_ascii_lowercase().as_str() {
        "error" => Some("error"),
        "warn" | "warning" => Some("warn"),
        "info" => Some("info"),
        "debug" => Some("debug"),
        "trace" => Some("trace"),
        _ => None,
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok()
}

//! Tracing subscriber setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::{ConfigError, ObservabilityConfig};

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise every `loan_assistant_*` crate logs at
/// `log_level`.
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<(), ConfigError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.log_level.to_lowercase();
        EnvFilter::new(format!(
            "loan_assistant_agent={level},loan_assistant_knowledge={level},\
             loan_assistant_text_processing={level},loan_assistant_config={level}"
        ))
    });

    let fmt_layer = if config.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::Tracing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_error() {
        let config = ObservabilityConfig::default();
        // Another test binary may already own the global subscriber
        let _ = init_tracing(&config);
        assert!(matches!(
            init_tracing(&config),
            Err(ConfigError::Tracing(_))
        ));
    }
}

//! Environment-driven runtime configuration.
//!
//! The command line carries only the program path, so anything else the
//! runner can be told comes from the environment.

use std::env;

use ls8_core::RunConfig;

/// Environment variable that turns on per-instruction tracing to stderr.
pub const TRACE_ENV_VAR: &str = "LS8_TRACE";

/// Default `env_logger` filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Runner configuration resolved at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CliConfig {
    /// Settings passed through to the interpreter core.
    pub run: RunConfig,
}

impl CliConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_trace_value(env::var(TRACE_ENV_VAR).ok().as_deref())
    }

    fn from_trace_value(value: Option<&str>) -> Self {
        Self {
            run: RunConfig {
                tracing_enabled: value.is_some_and(is_truthy),
            },
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::CliConfig;

    #[test]
    fn unset_variable_disables_tracing() {
        assert!(!CliConfig::from_trace_value(None).run.tracing_enabled);
    }

    #[test]
    fn truthy_values_enable_tracing() {
        for value in ["1", "true", "YES", " on "] {
            assert!(
                CliConfig::from_trace_value(Some(value)).run.tracing_enabled,
                "{value:?} should enable tracing"
            );
        }
    }

    #[test]
    fn other_values_keep_tracing_off() {
        for value in ["0", "false", "", "trace"] {
            assert!(!CliConfig::from_trace_value(Some(value)).run.tracing_enabled);
        }
    }
}

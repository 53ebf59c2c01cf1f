use std::env;

use halbridge_api::ClientConfig;

/// Environment variable enabling diagnostic tracing (`1` or `true`).
pub const DEBUG_ENV: &str = "HALBRIDGE_DEBUG";

/// Settings for [`data_provider`](crate::data_provider).
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Trace every operation and its outcome. Off by default.
    pub debug: bool,
    pub client: ClientConfig,
}

impl ProviderConfig {
    /// Defaults, with `debug` taken from [`DEBUG_ENV`] when set.
    pub fn from_env() -> Self {
        let debug = env::var(DEBUG_ENV)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Self {
            debug,
            ..Self::default()
        }
    }
}

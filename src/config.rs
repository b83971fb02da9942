use std::time::Duration;

use dioxus::prelude::*;

use crate::utils::log_error;

const ENV_SHOW_DELAY_MS: &str = "STOREFRONT_SHOW_DELAY_MS";
const ENV_MIN_VISIBLE_MS: &str = "STOREFRONT_MIN_VISIBLE_MS";
const ENV_MAX_WAIT_MS: &str = "STOREFRONT_MAX_WAIT_MS";
const ENV_TRANSITION_ENTER_MS: &str = "STOREFRONT_TRANSITION_ENTER_MS";
const ENV_TRANSITION_EXIT_MS: &str = "STOREFRONT_TRANSITION_EXIT_MS";
const ENV_BACKEND_LATENCY_MS: &str = "STOREFRONT_BACKEND_LATENCY_MS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}, expected a number of milliseconds: {source}")]
    InvalidMillis {
        key: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Timing of the navigation loading indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingConfig {
    /// Work must stay outstanding this long before the indicator appears
    pub show_delay_ms: u64,
    /// Once visible, the indicator stays at least this long
    pub min_visible_ms: u64,
    /// A navigation stops waiting for its registered data loads after this long
    pub max_wait_ms: u64,
}
impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            show_delay_ms: 200,
            min_visible_ms: 200,
            max_wait_ms: 2500,
        }
    }
}
impl LoadingConfig {
    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms)
    }
    pub fn min_visible(&self) -> Duration {
        Duration::from_millis(self.min_visible_ms)
    }
    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionConfig {
    pub enter_ms: u64,
    pub exit_ms: u64,
}
impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            enter_ms: 300,
            exit_ms: 200,
        }
    }
}
impl TransitionConfig {
    pub fn enter(&self) -> Duration {
        Duration::from_millis(self.enter_ms)
    }
    pub fn exit(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }
}

/// Settings of the in-memory backend standing in for the managed one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub latency_ms: u64,
}
impl Default for BackendConfig {
    fn default() -> Self {
        Self { latency_ms: 350 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub loading: LoadingConfig,
    pub transition: TransitionConfig,
    pub backend: BackendConfig,
}

impl AppConfig {
    /// Builds the configuration from the `STOREFRONT_*` environment variables
    ///
    /// Unset variables keep their default. Invalid ones are logged and also
    /// keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<L: Fn(&str) -> Option<String>>(lookup: L) -> Self {
        let mut config = Self::default();
        let fields: [(&'static str, &mut u64); 6] = [
            (ENV_SHOW_DELAY_MS, &mut config.loading.show_delay_ms),
            (ENV_MIN_VISIBLE_MS, &mut config.loading.min_visible_ms),
            (ENV_MAX_WAIT_MS, &mut config.loading.max_wait_ms),
            (ENV_TRANSITION_ENTER_MS, &mut config.transition.enter_ms),
            (ENV_TRANSITION_EXIT_MS, &mut config.transition.exit_ms),
            (ENV_BACKEND_LATENCY_MS, &mut config.backend.latency_ms),
        ];
        for (key, slot) in fields {
            match read_millis(&lookup, key) {
                Ok(Some(ms)) => *slot = ms,
                Ok(None) => (),
                Err(e) => {
                    log_error(e);
                }
            }
        }
        log::debug!("AppConfig loaded: {config:?}");
        config
    }
}

fn read_millis<L: Fn(&str) -> Option<String>>(
    lookup: &L,
    key: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|source| ConfigError::InvalidMillis { key, value, source })
}

pub static APP_CONFIG: GlobalSignal<AppConfig> = Signal::global(AppConfig::from_env);

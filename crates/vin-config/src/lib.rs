//! # vin-config
//!
//! Layered configuration for the Vinventory client, loaded with figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`VINVENTORY_*` prefix, `__` separates sections)
//! 2. Caller-supplied overrides (see [`VinConfig::load_with_env_overrides`])
//! 3. Project-level `.vinventory/config.toml`
//! 4. User-level `~/.config/vinventory/config.toml`
//! 5. Built-in defaults
//!
//! `VINVENTORY_API__BASE_URL` maps to `api.base_url`,
//! `VINVENTORY_AUTH__REDIRECT_PORT` to `auth.redirect_port`, and so on.
//!
//! ```no_run
//! use vin_config::VinConfig;
//!
//! let config = VinConfig::load_with_dotenv().expect("config");
//! println!("API: {}", config.api.normalized_base_url());
//! ```

mod api;
mod auth;
mod error;
mod general;

pub use api::ApiConfig;
pub use auth::AuthConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "VINVENTORY_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VinConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl VinConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load `.env` from the workspace (or current directory), then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Load with extra `VINVENTORY_*` style pairs layered under the process
    /// environment. Used for values the CLI resolves itself, like `--api-url`
    /// forwarded through the same key space.
    ///
    /// Pairs without the prefix are ignored.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_env_overrides(overrides: &[(String, String)]) -> Result<Self, ConfigError> {
        let mut figment = Self::file_figment();
        for (key, raw) in overrides {
            let Some(path) = Self::env_key_to_path(key) else {
                continue;
            };
            let value = raw.parse::<Value>().unwrap_or_else(|never| match never {});
            figment = figment.merge(Serialized::default(&path, value));
        }
        Self::extract(figment.merge(Self::env_provider()))
    }

    /// Full provider chain: defaults, global TOML, local TOML, environment.
    pub fn figment() -> Figment {
        Self::file_figment().merge(Self::env_provider())
    }

    fn file_figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".vinventory/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    fn env_provider() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.api.validate()?;
        Ok(config)
    }

    /// `VINVENTORY_API__BASE_URL` -> `api.base_url`.
    fn env_key_to_path(key: &str) -> Option<String> {
        let rest = key.strip_prefix(ENV_PREFIX)?;
        if rest.is_empty() {
            return None;
        }
        Some(rest.to_ascii_lowercase().replace("__", "."))
    }

    /// Path to the user-global config file.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vinventory").join("config.toml"))
    }

    /// Walk up from `CARGO_MANIFEST_DIR` looking for `.env`, falling back to
    /// the current directory. Missing files are not an error.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

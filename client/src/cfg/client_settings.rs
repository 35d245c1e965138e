use std::{env, path::Path};

use config::{ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::cfg;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ClientSettings {
    #[serde(default)]
    pub api: cfg::ApiSettings,

    #[serde(default)]
    pub auth: cfg::AuthSettings,

    #[serde(default)]
    pub checkin: cfg::CheckinSettings,

    #[serde(default = "default_log_directives")]
    pub log_directives: String,
}

fn default_log_directives() -> String {
    "sawadee_client=info".to_string()
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api: cfg::ApiSettings::default(),
            auth: cfg::AuthSettings::default(),
            checkin: cfg::CheckinSettings::default(),
            log_directives: default_log_directives(),
        }
    }
}

impl ClientSettings {
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let app_run_env = Self::get_app_run_env();
        let config_path = Self::get_config_path();
        let mut builder = config::Config::builder();

        // Layer 0: Set defaults from ClientSettings::default()
        let default_settings = Self::default();
        let default_toml = toml::to_string(&default_settings)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize defaults: {e}")))?;
        builder = builder.add_source(File::from_str(&default_toml, config::FileFormat::Toml));

        // Layer 1: Add default configuration from files
        let default_config_path = config_path.join("configs.default.toml");
        if default_config_path.exists() {
            builder = builder.add_source(File::from(default_config_path));
        }

        // Layer 2: Add environment-specific config
        let env_config_path = config_path.join(format!("configs.{app_run_env}.toml"));
        if env_config_path.exists() {
            builder = builder.add_source(File::from(env_config_path));
        }

        // Layer 3: Add local config overrides
        let local_config_path = config_path.join("configs.local.toml");
        if local_config_path.exists() {
            builder = builder.add_source(File::from(local_config_path));
        }

        // Layer 4: Override with environment variables
        // Use APP_API__BASE_URL, APP_AUTH__CLIENT_ID, etc.
        builder = builder.add_source(Environment::with_prefix("APP").separator("__"));

        builder.build()?.try_deserialize::<Self>()
    }

    #[must_use]
    pub fn get_app_run_env() -> String {
        env::var("APP_RUN_ENV").unwrap_or_else(|_| "production".to_string())
    }

    #[must_use]
    pub fn get_config_path() -> &'static Path {
        Path::new(".")
    }
}

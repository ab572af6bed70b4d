use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Common service settings loaded from `configuration.*` and `APP__*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8000
}

impl CommonConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[derive(Debug, Clone)]
pub struct AsanaConfig {
    pub common: CommonConfig,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Multimodal model used for pose analysis (e.g., gemini-2.0-flash).
    pub vision_model: String,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Origins allowed to call the service from a browser.
    pub allowed_origins: Vec<String>,
}

impl AsanaConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = CommonConfig::load()?;

        Ok(AsanaConfig {
            common,
            google: GoogleConfig {
                // Required in every environment: without a credential the
                // service cannot serve a single request, so refuse to start.
                api_key: get_env("GOOGLE_API_KEY", None)?,
            },
            models: ModelConfig {
                vision_model: get_env("ASANA_VISION_MODEL", Some("gemini-2.0-flash"))?,
            },
            security: SecurityConfig {
                allowed_origins: get_env(
                    "ALLOWED_ORIGINS",
                    Some("http://localhost:3000,http://127.0.0.1:3000"),
                )?
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_env_falls_back_to_default() {
        let value = get_env("ASANA_TEST_UNSET_WITH_DEFAULT", Some("fallback")).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn get_env_fails_when_required_var_is_missing() {
        let result = get_env("ASANA_TEST_UNSET_REQUIRED", None);
        assert!(result.is_err());
    }

    #[test]
    fn get_env_prefers_set_value_over_default() {
        std::env::set_var("ASANA_TEST_SET_VAR", "explicit");
        let value = get_env("ASANA_TEST_SET_VAR", Some("fallback")).unwrap();
        assert_eq!(value, "explicit");
    }
}

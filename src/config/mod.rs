use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl CommonConfig {
    fn load() -> Result<Self, AppError> {
        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[derive(Debug, Clone)]
pub struct CourierConfig {
    pub auth_token: String,
    pub base_url: String,
    pub enabled: bool,
}

/// Template identifiers are opaque values owned by the provider account,
/// one per channel.
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    pub email: String,
    pub sms: String,
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: CommonConfig,
    pub courier: CourierConfig,
    pub templates: TemplateConfig,
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let common = CommonConfig::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(RelayConfig {
            common,
            courier: CourierConfig {
                auth_token: get_env("COURIER_AUTH_TOKEN", Some(""), is_prod)?,
                base_url: get_env("COURIER_BASE_URL", Some("https://api.courier.com"), is_prod)?,
                enabled: env::var("COURIER_ENABLED")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()
                    .unwrap_or(false),
            },
            templates: TemplateConfig {
                email: get_env("COURIER_EMAIL_TEMPLATE", Some(""), is_prod)?,
                sms: get_env("COURIER_SMS_TEMPLATE", Some(""), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
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

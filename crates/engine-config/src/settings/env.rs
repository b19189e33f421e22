use crate::{error::ConfigError, settings::ImportSettings};
use std::collections::HashMap;

pub const ENV_HOST: &str = "CSVLOAD_HOST";
pub const ENV_PORT: &str = "CSVLOAD_PORT";
pub const ENV_USER: &str = "CSVLOAD_USER";
pub const ENV_PASSWORD: &str = "CSVLOAD_PASSWORD";
pub const ENV_DATABASE: &str = "CSVLOAD_DATABASE";

impl ImportSettings {
    /// Connection settings taken from environment variables.
    pub fn from_env(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| vars.get(key).filter(|v| !v.is_empty()).cloned();

        let port = get(ENV_PORT)
            .map(|raw| {
                raw.parse::<u16>()
                    .map_err(|e| ConfigError::invalid(ENV_PORT, e.to_string()))
            })
            .transpose()?;

        Ok(ImportSettings {
            host: get(ENV_HOST),
            port,
            user: get(ENV_USER),
            password: get(ENV_PASSWORD),
            database: get(ENV_DATABASE),
            ..Default::default()
        })
    }
}

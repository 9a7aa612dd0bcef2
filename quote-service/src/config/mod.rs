use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_file_path")]
    pub file_path: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    File,
}

fn default_port() -> u16 {
    8080
}

fn default_file_path() -> String {
    "data/quotes.json".to_string()
}

impl Default for StoreBackend {
    fn default() -> Self {
        Self::Memory
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            file_path: default_file_path(),
        }
    }
}

impl QuoteConfig {
    /// Layered load: optional `configuration` file, then `APP__`-prefixed
    /// environment variables (e.g. APP__PORT, APP__STORE__BACKEND).
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_empty_config() {
        let config: QuoteConfig = serde_json::from_str("{}").expect("deserialize failed");
        assert_eq!(config.port, 8080);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.file_path, "data/quotes.json");
    }

    #[test]
    fn backend_names_are_lowercase() {
        let config: QuoteConfig =
            serde_json::from_str(r#"{ "store": { "backend": "file" } }"#)
                .expect("deserialize failed");
        assert_eq!(config.store.backend, StoreBackend::File);
    }
}

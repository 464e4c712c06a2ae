#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::utils::error::{ProductApiError, Result};
use crate::utils::validation::{
    validate_aws_region, validate_range, validate_table_name, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_TABLE_NAME: &str = "productTable-1";
pub const DEFAULT_REGION: &str = "ap-southeast-1";
pub const MAX_SCAN_PAGE_SIZE: usize = 1000;

/// 儲存層設定：在第一個請求之前載入一次，注入到 store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_table_name")]
    pub table_name: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub scan_page_size: Option<usize>,
}

fn default_table_name() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            table_name: default_table_name(),
            region: default_region(),
            endpoint_url: None,
            scan_page_size: None,
        }
    }
}

impl ServiceConfig {
    /// 從環境變數載入（Lambda 執行環境）
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scan_page_size = match lookup("SCAN_PAGE_SIZE") {
            Some(raw) => Some(raw.trim().parse::<usize>().map_err(|_| {
                ProductApiError::InvalidConfigValueError {
                    field: "SCAN_PAGE_SIZE".to_string(),
                    value: raw.clone(),
                    reason: "must be a positive integer".to_string(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            table_name: lookup("PRODUCT_TABLE").unwrap_or_else(default_table_name),
            region: lookup("AWS_REGION").unwrap_or_else(default_region),
            endpoint_url: lookup("DYNAMODB_ENDPOINT_URL").filter(|url| !url.is_empty()),
            scan_page_size,
        })
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_table_name("table_name", &self.table_name)?;
        validate_aws_region("region", &self.region)?;

        if let Some(endpoint) = &self.endpoint_url {
            validate_url("endpoint_url", endpoint)?;
        }

        if let Some(page_size) = self.scan_page_size {
            validate_range("scan_page_size", page_size, 1, MAX_SCAN_PAGE_SIZE)?;
        }

        tracing::debug!("✅ Service configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_table_and_region() {
        let config = ServiceConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.table_name, "productTable-1");
        assert_eq!(config.region, "ap-southeast-1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("PRODUCT_TABLE", "products-dev"),
            ("AWS_REGION", "eu-west-1"),
            ("DYNAMODB_ENDPOINT_URL", "http://localhost:8000"),
            ("SCAN_PAGE_SIZE", "25"),
        ]))
        .unwrap();

        assert_eq!(config.table_name, "products-dev");
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.scan_page_size, Some(25));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_page_size_is_config_error() {
        let err = ServiceConfig::from_lookup(lookup_from(&[("SCAN_PAGE_SIZE", "lots")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ProductApiError::InvalidConfigValueError { .. }
        ));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = ServiceConfig {
            table_name: "x".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ServiceConfig {
            region: "EU West".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ServiceConfig {
            endpoint_url: Some("ftp://localhost".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ServiceConfig {
            scan_page_size: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

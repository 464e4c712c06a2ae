use crate::config::ServiceConfig;
use crate::utils::error::{ProductApiError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// 設定檔格式：
///
/// ```toml
/// [store]
/// table_name = "productTable-1"
/// region = "ap-southeast-1"
/// endpoint_url = "${DYNAMODB_ENDPOINT_URL}"
/// scan_page_size = 100
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub store: ServiceConfig,
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid placeholder regex"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProductApiError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ProductApiError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PRODUCT_TABLE})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        placeholder_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn into_service_config(self) -> ServiceConfig {
        self.store
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.store.validate()
    }
}

use crate::config::{ServiceConfig, TomlConfig};
use crate::domain::model::Request;
use crate::utils::error::{ProductApiError, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// 記憶體內的表，可用 --seed 預先載入資料
    Memory,
    /// 真實的 DynamoDB 表（需要 dynamodb feature）
    Dynamodb,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "product-api")]
#[command(about = "Invoke the product API router locally against an in-memory or DynamoDB table")]
pub struct CliConfig {
    #[arg(long, default_value = "GET")]
    pub method: String,

    #[arg(long, default_value = "/health")]
    pub path: String,

    /// Query string parameter as key=value, may be repeated
    #[arg(long = "query", value_parser = parse_query_pair)]
    pub query: Vec<(String, String)>,

    /// Raw request body (JSON text)
    #[arg(long)]
    pub body: Option<String>,

    /// API Gateway proxy event file; overrides --method/--path/--query/--body
    #[arg(long)]
    pub event: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "memory")]
    pub backend: Backend,

    /// JSON array of products loaded into the memory backend
    #[arg(long)]
    pub seed: Option<PathBuf>,

    /// TOML config file with a [store] section
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub table_name: Option<String>,

    #[arg(long)]
    pub region: Option<String>,

    #[arg(long)]
    pub endpoint_url: Option<String>,

    #[arg(long)]
    pub page_size: Option<usize>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

fn parse_query_pair(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

impl CliConfig {
    /// 命令列參數覆蓋基底設定。基底是設定檔；沒給設定檔時才讀環境變數。
    /// 設定檔內要用環境變數時以 `${VAR}` 引用。
    pub fn service_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_service_config(),
            None => ServiceConfig::from_env()?,
        };

        if let Some(table_name) = &self.table_name {
            config.table_name = table_name.clone();
        }
        if let Some(region) = &self.region {
            config.region = region.clone();
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            config.endpoint_url = Some(endpoint_url.clone());
        }
        if let Some(page_size) = self.page_size {
            config.scan_page_size = Some(page_size);
        }

        Ok(config)
    }

    pub fn request(&self) -> Result<Request> {
        if let Some(path) = &self.event {
            let content = std::fs::read_to_string(path)?;
            return serde_json::from_str(&content).map_err(|e| ProductApiError::ConfigError {
                message: format!("invalid event file {}: {}", path.display(), e),
            });
        }

        let mut request = Request::new(self.method.to_uppercase(), self.path.clone());
        for (key, value) in &self.query {
            request = request.with_query(key.clone(), value.clone());
        }
        if let Some(body) = &self.body {
            request = request.with_body(body.clone());
        }
        Ok(request)
    }
}

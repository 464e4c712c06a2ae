use crate::domain::model::Response;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProductApiError {
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Request body is required")]
    MissingBody,

    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },

    #[error("Product not found: {product_id}")]
    RecordNotFound { product_id: String },

    #[error("Store throughput exceeded during {operation}, please retry")]
    StoreThrottled { operation: &'static str },

    #[error("Table not found: {table}")]
    TableNotFound { table: String },

    #[error("{operation} failed: {message}")]
    StoreError {
        operation: &'static str,
        message: String,
    },

    #[error("Item conversion failed: {message}")]
    ConversionError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Client,
    NotFound,
    Store,
    Config,
}

impl ProductApiError {
    pub fn store(operation: &'static str, message: impl Into<String>) -> Self {
        Self::StoreError {
            operation,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedBody(_)
            | Self::MissingBody
            | Self::MissingParameter { .. }
            | Self::InvalidRecord { .. } => ErrorCategory::Client,
            Self::RecordNotFound { .. } => ErrorCategory::NotFound,
            Self::StoreThrottled { .. }
            | Self::TableNotFound { .. }
            | Self::StoreError { .. }
            | Self::ConversionError { .. } => ErrorCategory::Store,
            Self::IoError(_)
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    /// 對應到 HTTP 狀態碼
    pub fn status_code(&self) -> u16 {
        match self {
            Self::StoreThrottled { .. } => 503,
            _ => match self.category() {
                ErrorCategory::Client => 400,
                ErrorCategory::NotFound => 404,
                ErrorCategory::Store | ErrorCategory::Config => 500,
            },
        }
    }

    fn label(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Client => "BAD_REQUEST",
            ErrorCategory::NotFound => "NOT_FOUND",
            ErrorCategory::Store | ErrorCategory::Config => "ERROR",
        }
    }

    /// 轉換成結構化的錯誤回應，確保每個請求都有回應
    pub fn into_response(self) -> Response {
        let body = json!({
            "Message": self.label(),
            "Error": self.to_string(),
        });
        Response::json(self.status_code(), &body)
    }
}

pub type Result<T> = std::result::Result<T, ProductApiError>;

use crate::utils::error::{ProductApiError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// 主鍵欄位名稱
pub const PRODUCT_ID: &str = "productId";

/// 一筆商品記錄：任意欄位的 JSON 物件，唯一必要欄位是字串型別的 `productId`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Record {
    data: Map<String, Value>,
}

impl Record {
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(data) => Self::try_from(data),
            other => Err(ProductApiError::InvalidRecord {
                message: format!("expected a JSON object, got {}", kind_of(&other)),
            }),
        }
    }

    pub fn product_id(&self) -> &str {
        // 建構時已驗證
        self.data
            .get(PRODUCT_ID)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        let field = field.into();
        if field != PRODUCT_ID {
            self.data.insert(field, value);
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.data)
    }
}

impl TryFrom<Map<String, Value>> for Record {
    type Error = ProductApiError;

    fn try_from(data: Map<String, Value>) -> Result<Self> {
        match data.get(PRODUCT_ID) {
            Some(Value::String(id)) if id.is_empty() => Err(ProductApiError::InvalidRecord {
                message: format!("{} must not be empty", PRODUCT_ID),
            }),
            Some(Value::String(_)) => Ok(Self { data }),
            Some(other) => Err(ProductApiError::InvalidRecord {
                message: format!("{} must be a string, got {}", PRODUCT_ID, kind_of(other)),
            }),
            None => Err(ProductApiError::InvalidRecord {
                message: format!("missing required field {}", PRODUCT_ID),
            }),
        }
    }
}

impl From<Record> for Map<String, Value> {
    fn from(record: Record) -> Self {
        record.data
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Scan 的續傳鍵（DynamoDB 的 LastEvaluatedKey / ExclusiveStartKey）
pub type ScanKey = Map<String, Value>;

/// 一次有界 Scan 的結果
#[derive(Debug, Clone, Default)]
pub struct ScanPage {
    pub items: Vec<Record>,
    pub last_evaluated_key: Option<ScanKey>,
}

/// API Gateway proxy 事件中用得到的欄位；缺少的欄位一律視為空值，交給路由回 404
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Request {
    pub http_method: String,
    pub path: String,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub body: Option<String>,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn query(&self, key: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }
}

/// API Gateway proxy 回應，建立後不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    status_code: u16,
    headers: HashMap<String, String>,
    body: String,
}

impl Response {
    pub fn json(status_code: u16, body: &Value) -> Self {
        // Value 序列化不會失敗
        let body = serde_json::to_string(body).unwrap_or_default();
        Self::with_body(status_code, body)
    }

    pub fn empty(status_code: u16) -> Self {
        Self::with_body(status_code, String::new())
    }

    fn with_body(status_code: u16, body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// 解析 body；空 body 回傳 None
    pub fn json_body(&self) -> Option<Value> {
        if self.body.is_empty() {
            return None;
        }
        serde_json::from_str(&self.body).ok()
    }
}

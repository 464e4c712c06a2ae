use crate::domain::model::{Record, ScanKey, ScanPage};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// 外部 key-value 表的最小操作集合
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn get(&self, product_id: &str) -> Result<Option<Record>>;

    /// 讀取一頁；`start_key` 必須是上一頁回傳的 `last_evaluated_key`
    async fn scan(&self, start_key: Option<ScanKey>) -> Result<ScanPage>;

    /// 無條件寫入，相同主鍵會被覆蓋
    async fn put(&self, record: &Record) -> Result<()>;

    /// 設定單一欄位，回傳更新後的欄位；記錄不存在時回傳 `RecordNotFound`
    async fn update(
        &self,
        product_id: &str,
        field: &str,
        value: Value,
    ) -> Result<Map<String, Value>>;

    async fn delete(&self, product_id: &str) -> Result<Option<Record>>;
}

use crate::domain::model::{Record, ScanKey, ScanPage, PRODUCT_ID};
use crate::domain::ports::ProductStore;
use crate::utils::error::{ProductApiError, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const DEFAULT_PAGE_SIZE: usize = 100;

/// 記憶體內的商品表，行為比照 DynamoDB：Scan 依頁大小切頁並回傳續傳鍵
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    records: Arc<RwLock<BTreeMap<String, Record>>>,
    page_size: usize,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            page_size: page_size.max(1),
        }
    }

    pub async fn seed(&self, records: impl IntoIterator<Item = Record>) {
        let mut stored = self.records.write().await;
        for record in records {
            stored.insert(record.product_id().to_string(), record);
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

fn start_after(start_key: &Option<ScanKey>) -> Result<Bound<String>> {
    match start_key {
        None => Ok(Bound::Unbounded),
        Some(key) => match key.get(PRODUCT_ID) {
            Some(Value::String(id)) => Ok(Bound::Excluded(id.clone())),
            _ => Err(ProductApiError::store(
                "Scan",
                format!("invalid ExclusiveStartKey: {:?}", key),
            )),
        },
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn get(&self, product_id: &str) -> Result<Option<Record>> {
        let records = self.records.read().await;
        Ok(records.get(product_id).cloned())
    }

    async fn scan(&self, start_key: Option<ScanKey>) -> Result<ScanPage> {
        let lower = start_after(&start_key)?;
        let records = self.records.read().await;

        let mut remaining = records.range((lower, Bound::Unbounded));
        let items: Vec<Record> = remaining
            .by_ref()
            .take(self.page_size)
            .map(|(_, record)| record.clone())
            .collect();

        let last_evaluated_key = match (remaining.next(), items.last()) {
            (Some(_), Some(last)) => {
                let mut key = Map::new();
                key.insert(
                    PRODUCT_ID.to_string(),
                    Value::String(last.product_id().to_string()),
                );
                Some(key)
            }
            _ => None,
        };

        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }

    async fn put(&self, record: &Record) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.product_id().to_string(), record.clone());
        Ok(())
    }

    async fn update(
        &self,
        product_id: &str,
        field: &str,
        value: Value,
    ) -> Result<Map<String, Value>> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(product_id)
            .ok_or_else(|| ProductApiError::RecordNotFound {
                product_id: product_id.to_string(),
            })?;

        record.set(field, value.clone());

        let mut updated = Map::new();
        updated.insert(field.to_string(), value);
        Ok(updated)
    }

    async fn delete(&self, product_id: &str) -> Result<Option<Record>> {
        let mut records = self.records.write().await;
        Ok(records.remove(product_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str) -> Record {
        Record::from_value(json!({ "productId": id })).unwrap()
    }

    #[tokio::test]
    async fn test_scan_pages_in_key_order() {
        let store = InMemoryStore::with_page_size(2);
        store
            .seed(["c", "a", "e", "b", "d"].into_iter().map(record))
            .await;

        let first = store.scan(None).await.unwrap();
        let ids: Vec<&str> = first.items.iter().map(Record::product_id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(first.last_evaluated_key.clone().unwrap()["productId"], "b");

        let second = store.scan(first.last_evaluated_key).await.unwrap();
        let third = store.scan(second.last_evaluated_key).await.unwrap();
        let ids: Vec<&str> = third.items.iter().map(Record::product_id).collect();
        assert_eq!(ids, vec!["e"]);
        assert!(third.last_evaluated_key.is_none());
    }

    #[tokio::test]
    async fn test_scan_exact_page_has_no_continuation() {
        let store = InMemoryStore::with_page_size(2);
        store.seed(["a", "b"].into_iter().map(record)).await;

        let page = store.scan(None).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.last_evaluated_key.is_none());
    }

    #[tokio::test]
    async fn test_update_of_missing_record_fails() {
        let store = InMemoryStore::new();
        let err = store.update("ghost", "name", json!("x")).await.unwrap_err();
        assert!(matches!(err, ProductApiError::RecordNotFound { .. }));
        assert!(store.is_empty().await);
    }
}

use crate::core::pagination::scan_all;
use crate::core::{ProductStore, Record, Response, Result};
use crate::domain::model::PRODUCT_ID;
use crate::utils::error::ProductApiError;
use serde_json::{json, Value};
use std::sync::Arc;

/// 對外部商品表執行單一邏輯操作，並把結果轉成回應
#[derive(Clone)]
pub struct RecordGateway {
    store: Arc<dyn ProductStore>,
}

impl RecordGateway {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn get_product(&self, product_id: &str) -> Result<Response> {
        let item = self
            .store
            .get(product_id)
            .await
            .inspect_err(|e| tracing::error!("❌ GetItem for product failed: {}", e))?;

        match item {
            Some(record) => Ok(Response::json(200, &record.into_value())),
            None => Err(ProductApiError::RecordNotFound {
                product_id: product_id.to_string(),
            }),
        }
    }

    pub async fn get_products(&self) -> Result<Response> {
        let products = scan_all(self.store.as_ref())
            .await
            .inspect_err(|e| tracing::error!("❌ Scanning products failed: {}", e))?;

        tracing::info!("Fetched {} products", products.len());
        let body = json!({ "products": products });
        Ok(Response::json(200, &body))
    }

    pub async fn save_product(&self, record: Record) -> Result<Response> {
        self.store
            .put(&record)
            .await
            .inspect_err(|e| tracing::error!("❌ Saving product failed: {}", e))?;

        let body = json!({
            "Operation": "SAVE",
            "Message": "SUCCESS",
            "Item": record,
        });
        Ok(Response::json(200, &body))
    }

    pub async fn update_product(
        &self,
        product_id: &str,
        update_key: &str,
        update_value: Value,
    ) -> Result<Response> {
        if update_key.is_empty() {
            return Err(ProductApiError::MissingParameter {
                name: "updateKey".to_string(),
            });
        }
        if update_key == PRODUCT_ID {
            return Err(ProductApiError::InvalidRecord {
                message: format!("{} is the key attribute and cannot be updated", PRODUCT_ID),
            });
        }

        let updated = self
            .store
            .update(product_id, update_key, update_value)
            .await
            .inspect_err(|e| tracing::error!("❌ Updating product failed: {}", e))?;

        let body = json!({
            "Operation": "UPDATE",
            "Message": "SUCCESS",
            "UpdatedAttributes": updated,
        });
        Ok(Response::json(200, &body))
    }

    pub async fn delete_product(&self, product_id: &str) -> Result<Response> {
        let prior = self
            .store
            .delete(product_id)
            .await
            .inspect_err(|e| tracing::error!("❌ Deleting product failed: {}", e))?;

        let mut body = json!({
            "Operation": "DELETE",
            "Message": "SUCCESS",
        });
        if let Some(record) = prior {
            body["Item"] = record.into_value();
        }
        Ok(Response::json(200, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;

    fn gateway() -> (RecordGateway, InMemoryStore) {
        let store = InMemoryStore::new();
        (RecordGateway::new(Arc::new(store.clone())), store)
    }

    fn widget() -> Record {
        Record::from_value(json!({"productId": "p1", "name": "Widget", "price": 3})).unwrap()
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let (gateway, _) = gateway();
        let err = gateway.get_product("nope").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_update_rejects_key_attribute() {
        let (gateway, store) = gateway();
        store.put(&widget()).await.unwrap();

        let err = gateway
            .update_product("p1", PRODUCT_ID, json!("p2"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_returns_only_changed_attribute() {
        let (gateway, store) = gateway();
        store.put(&widget()).await.unwrap();

        let response = gateway
            .update_product("p1", "price", json!(5))
            .await
            .unwrap();
        let body = response.json_body().unwrap();
        assert_eq!(body["UpdatedAttributes"], json!({"price": 5}));
    }

    #[tokio::test]
    async fn test_delete_of_absent_record_omits_item() {
        let (gateway, _) = gateway();
        let body = gateway.delete_product("ghost").await.unwrap().json_body().unwrap();
        assert_eq!(body, json!({"Operation": "DELETE", "Message": "SUCCESS"}));
    }
}

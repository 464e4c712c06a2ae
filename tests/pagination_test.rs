use async_trait::async_trait;
use product_api::core::{ScanKey, ScanPage};
use product_api::{
    Dispatcher, InMemoryStore, ProductApiError, ProductStore, Record, Request, Result,
};
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn product(i: usize) -> Record {
    Record::from_value(json!({"productId": format!("p{:03}", i), "index": i})).unwrap()
}

fn product_ids(body: &Value) -> Vec<String> {
    body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["productId"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_150_records_across_two_pages_of_100() {
    let store = InMemoryStore::with_page_size(100);
    store.seed((0..150).map(product)).await;
    assert_eq!(store.page_size(), 100);

    let dispatcher = Dispatcher::new(Arc::new(store));
    let response = dispatcher.dispatch(&Request::new("GET", "/products")).await;

    assert_eq!(response.status_code(), 200);
    let ids = product_ids(&response.json_body().unwrap());
    assert_eq!(ids.len(), 150);

    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), 150, "no duplicates");
    for i in 0..150 {
        assert!(unique.contains(&format!("p{:03}", i)), "missing p{:03}", i);
    }
}

#[tokio::test]
async fn test_many_small_pages() {
    let store = InMemoryStore::with_page_size(7);
    store.seed((0..50).map(product)).await;

    let dispatcher = Dispatcher::new(Arc::new(store));
    let response = dispatcher.dispatch(&Request::new("GET", "/products")).await;

    let ids = product_ids(&response.json_body().unwrap());
    let expected: Vec<String> = (0..50).map(|i| format!("p{:03}", i)).collect();
    assert_eq!(ids, expected);
}

/// 模擬 DynamoDB：只有收到正確的 ExclusiveStartKey 才會前進到下一頁，
/// 用錯鍵（或沒帶鍵）會一直回第一頁
struct StrictPagingStore {
    pages: Vec<Vec<Record>>,
    calls: AtomicUsize,
}

fn continuation(page: usize) -> ScanKey {
    let mut key = Map::new();
    key.insert("cursor".to_string(), json!(format!("page-{}", page)));
    key
}

#[async_trait]
impl ProductStore for StrictPagingStore {
    async fn get(&self, _product_id: &str) -> Result<Option<Record>> {
        Ok(None)
    }

    async fn scan(&self, start_key: Option<ScanKey>) -> Result<ScanPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let index = match start_key {
            None => 0,
            Some(key) => (1..self.pages.len())
                .find(|&i| key == continuation(i))
                .unwrap_or(0),
        };

        let last_evaluated_key = if index + 1 < self.pages.len() {
            Some(continuation(index + 1))
        } else {
            None
        };
        Ok(ScanPage {
            items: self.pages[index].clone(),
            last_evaluated_key,
        })
    }

    async fn put(&self, _record: &Record) -> Result<()> {
        Ok(())
    }

    async fn update(
        &self,
        product_id: &str,
        _field: &str,
        _value: Value,
    ) -> Result<Map<String, Value>> {
        Err(ProductApiError::RecordNotFound {
            product_id: product_id.to_string(),
        })
    }

    async fn delete(&self, _product_id: &str) -> Result<Option<Record>> {
        Ok(None)
    }
}

#[tokio::test]
async fn test_opaque_continuation_key_is_handed_back_verbatim() {
    let store = Arc::new(StrictPagingStore {
        pages: vec![
            (0..100).map(product).collect(),
            (100..150).map(product).collect(),
        ],
        calls: AtomicUsize::new(0),
    });
    let dispatcher = Dispatcher::new(store.clone());

    let response = dispatcher.dispatch(&Request::new("GET", "/products")).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(product_ids(&response.json_body().unwrap()).len(), 150);
    assert_eq!(store.calls.load(Ordering::SeqCst), 2);
}

/// 每個操作都失敗的 store
struct FailingStore {
    throttled: bool,
}

impl FailingStore {
    fn fail(&self, operation: &'static str) -> ProductApiError {
        if self.throttled {
            ProductApiError::StoreThrottled { operation }
        } else {
            ProductApiError::store(operation, "connection reset")
        }
    }
}

#[async_trait]
impl ProductStore for FailingStore {
    async fn get(&self, _product_id: &str) -> Result<Option<Record>> {
        Err(self.fail("GetItem"))
    }

    async fn scan(&self, _start_key: Option<ScanKey>) -> Result<ScanPage> {
        Err(self.fail("Scan"))
    }

    async fn put(&self, _record: &Record) -> Result<()> {
        Err(self.fail("PutItem"))
    }

    async fn update(
        &self,
        _product_id: &str,
        _field: &str,
        _value: Value,
    ) -> Result<Map<String, Value>> {
        Err(self.fail("UpdateItem"))
    }

    async fn delete(&self, _product_id: &str) -> Result<Option<Record>> {
        Err(self.fail("DeleteItem"))
    }
}

fn every_store_route() -> Vec<Request> {
    vec![
        Request::new("GET", "/product").with_query("productId", "p1"),
        Request::new("GET", "/products"),
        Request::new("POST", "/product").with_body(r#"{"productId":"p1"}"#),
        Request::new("PATCH", "/product")
            .with_body(r#"{"productId":"p1","updateKey":"name","updateValue":"x"}"#),
        Request::new("DELETE", "/product").with_body(r#"{"productId":"p1"}"#),
    ]
}

#[tokio::test]
async fn test_store_failure_always_produces_structured_500() {
    let dispatcher = Dispatcher::new(Arc::new(FailingStore { throttled: false }));

    for request in every_store_route() {
        let response = dispatcher.dispatch(&request).await;
        assert_eq!(response.status_code(), 500, "{} {}", request.http_method, request.path);

        let body = response.json_body().unwrap();
        assert_eq!(body["Message"], "ERROR");
        assert!(body["Error"].as_str().unwrap().contains("connection reset"));
    }
}

#[tokio::test]
async fn test_throttling_maps_to_503() {
    let dispatcher = Dispatcher::new(Arc::new(FailingStore { throttled: true }));

    for request in every_store_route() {
        let response = dispatcher.dispatch(&request).await;
        assert_eq!(response.status_code(), 503, "{} {}", request.http_method, request.path);
    }

    // health 不碰 store
    let health = dispatcher.dispatch(&Request::new("GET", "/health")).await;
    assert_eq!(health.status_code(), 200);
}

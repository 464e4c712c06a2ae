use crate::core::gateway::RecordGateway;
use crate::core::{ProductStore, Record, Request, Response, Result};
use crate::domain::model::PRODUCT_ID;
use crate::utils::error::ProductApiError;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub const HEALTH_PATH: &str = "/health";
pub const PRODUCT_PATH: &str = "/product";
pub const PRODUCTS_PATH: &str = "/products";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest {
    product_id: String,
    update_key: String,
    update_value: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest {
    product_id: String,
}

/// 依 (method, path) 選出唯一的處理函式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Health,
    GetProduct,
    GetProducts,
    SaveProduct,
    UpdateProduct,
    DeleteProduct,
    NotFound,
}

impl Route {
    pub fn resolve(method: &str, path: &str) -> Self {
        match (method, path) {
            ("GET", HEALTH_PATH) => Route::Health,
            ("GET", PRODUCT_PATH) => Route::GetProduct,
            ("GET", PRODUCTS_PATH) => Route::GetProducts,
            ("POST", PRODUCT_PATH) => Route::SaveProduct,
            ("PATCH", PRODUCT_PATH) => Route::UpdateProduct,
            ("DELETE", PRODUCT_PATH) => Route::DeleteProduct,
            _ => Route::NotFound,
        }
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    gateway: RecordGateway,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            gateway: RecordGateway::new(store),
        }
    }

    /// 處理一個請求。任何錯誤都會轉成結構化回應，不會往外拋。
    pub async fn dispatch(&self, request: &Request) -> Response {
        tracing::info!(
            method = %request.http_method,
            path = %request.path,
            "Request received"
        );

        let route = Route::resolve(&request.http_method, &request.path);
        let response = match self.handle(route, request).await {
            Ok(response) => response,
            Err(e) => {
                if e.status_code() >= 500 {
                    tracing::error!("❌ {:?} failed: {}", route, e);
                } else {
                    tracing::warn!("{:?} rejected: {}", route, e);
                }
                e.into_response()
            }
        };

        tracing::debug!("{:?} -> {}", route, response.status_code());
        response
    }

    /// 處理原始的 API Gateway 事件。無法解析成 `Request` 的事件回 400。
    pub async fn dispatch_event(&self, event: Value) -> Response {
        match serde_json::from_value::<Request>(event) {
            Ok(request) => self.dispatch(&request).await,
            Err(e) => {
                tracing::warn!("Undecodable request event: {}", e);
                ProductApiError::MalformedBody(e).into_response()
            }
        }
    }

    async fn handle(&self, route: Route, request: &Request) -> Result<Response> {
        match route {
            Route::Health => Ok(Response::empty(200)),
            Route::GetProduct => {
                let product_id = require_product_id(request.query(PRODUCT_ID))?;
                self.gateway.get_product(product_id).await
            }
            Route::GetProducts => self.gateway.get_products().await,
            Route::SaveProduct => {
                let record = Record::from_value(parse_body(request)?)?;
                self.gateway.save_product(record).await
            }
            Route::UpdateProduct => {
                let update: UpdateRequest = serde_json::from_value(parse_body(request)?)?;
                let product_id = require_product_id(Some(update.product_id.as_str()))?;
                self.gateway
                    .update_product(product_id, &update.update_key, update.update_value)
                    .await
            }
            Route::DeleteProduct => {
                let delete: DeleteRequest = serde_json::from_value(parse_body(request)?)?;
                let product_id = require_product_id(Some(delete.product_id.as_str()))?;
                self.gateway.delete_product(product_id).await
            }
            Route::NotFound => Ok(Response::json(404, &json!("404 Not Found"))),
        }
    }
}

fn parse_body(request: &Request) -> Result<Value> {
    let body = request
        .body
        .as_deref()
        .filter(|body| !body.trim().is_empty())
        .ok_or(ProductApiError::MissingBody)?;
    Ok(serde_json::from_str(body)?)
}

/// DynamoDB 不接受空字串主鍵，在碰 store 之前就擋下
fn require_product_id(product_id: Option<&str>) -> Result<&str> {
    product_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ProductApiError::MissingParameter {
            name: PRODUCT_ID.to_string(),
        })
}

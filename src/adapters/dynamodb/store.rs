use super::conversions::{
    attribute_to_value, item_to_map, item_to_record, record_to_item, scan_key_to_item,
    value_to_attribute,
};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error,
    map_update_item_error,
};
use crate::config::ServiceConfig;
use crate::domain::model::{Record, ScanKey, ScanPage, PRODUCT_ID};
use crate::domain::ports::ProductStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use serde_json::{Map, Value};

/// 以 DynamoDB 表實作的商品儲存
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
    page_size: Option<i32>,
}

impl DynamoDbStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            page_size: None,
        }
    }

    /// 每次 Scan 的最大筆數；不設定時由 DynamoDB 依 1MB 上限切頁
    pub fn with_page_size(mut self, page_size: Option<usize>) -> Self {
        self.page_size = page_size.map(|size| size.min(i32::MAX as usize) as i32);
        self
    }

    /// 依設定建立 client（region、可選的 endpoint，例如 DynamoDB Local）
    pub async fn from_config(config: &ServiceConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.endpoint_url {
            tracing::info!("Using DynamoDB endpoint override: {}", endpoint);
            builder = builder.endpoint_url(endpoint);
        }
        let client = Client::from_conf(builder.build());

        Self::new(client, config.table_name.clone()).with_page_size(config.scan_page_size)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn key(product_id: &str) -> AttributeValue {
        AttributeValue::S(product_id.to_string())
    }
}

#[async_trait]
impl ProductStore for DynamoDbStore {
    async fn get(&self, product_id: &str) -> Result<Option<Record>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PRODUCT_ID, Self::key(product_id))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, &self.table_name))?;

        output.item.as_ref().map(item_to_record).transpose()
    }

    async fn scan(&self, start_key: Option<ScanKey>) -> Result<ScanPage> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_exclusive_start_key(start_key.as_ref().map(scan_key_to_item))
            .set_limit(self.page_size)
            .send()
            .await
            .map_err(|e| map_scan_error(e, &self.table_name))?;

        let items = output
            .items
            .unwrap_or_default()
            .iter()
            .map(item_to_record)
            .collect::<Result<Vec<_>>>()?;

        let last_evaluated_key = output
            .last_evaluated_key
            .filter(|key| !key.is_empty())
            .map(|key| item_to_map(&key))
            .transpose()?;

        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }

    async fn put(&self, record: &Record) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &self.table_name))?;

        Ok(())
    }

    async fn update(
        &self,
        product_id: &str,
        field: &str,
        value: Value,
    ) -> Result<Map<String, Value>> {
        // 欄位名稱一律走 placeholder，避免保留字與表達式注入
        let output = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(PRODUCT_ID, Self::key(product_id))
            .update_expression("SET #field = :value")
            .condition_expression("attribute_exists(#pk)")
            .expression_attribute_names("#field", field)
            .expression_attribute_names("#pk", PRODUCT_ID)
            .expression_attribute_values(":value", value_to_attribute(&value))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, &self.table_name, product_id))?;

        output
            .attributes
            .unwrap_or_default()
            .iter()
            .map(|(key, attribute)| {
                attribute_to_value(attribute).map(|value| (key.clone(), value))
            })
            .collect()
    }

    async fn delete(&self, product_id: &str) -> Result<Option<Record>> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(PRODUCT_ID, Self::key(product_id))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, &self.table_name))?;

        let prior = output.attributes.filter(|item| !item.is_empty());
        prior.as_ref().map(item_to_record).transpose()
    }
}

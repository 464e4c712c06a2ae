//! JSON ↔ DynamoDB AttributeValue 轉換。
//!
//! 純函式，不需要連線即可測試。

use crate::domain::model::{Record, ScanKey};
use crate::utils::error::{ProductApiError, Result};
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

pub type Item = HashMap<String, AttributeValue>;

pub fn value_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(value_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(map_to_item(map)),
    }
}

pub fn attribute_to_value(attribute: &AttributeValue) -> Result<Value> {
    let value = match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => number_to_value(n)?,
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(attribute_to_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        AttributeValue::M(map) => Value::Object(item_to_map(map)?),
        AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| number_to_value(n.as_str()))
                .collect::<Result<Vec<_>>>()?,
        ),
        other => {
            return Err(ProductApiError::ConversionError {
                message: format!("unsupported attribute type: {:?}", other),
            })
        }
    };
    Ok(value)
}

fn number_to_value(n: &str) -> Result<Value> {
    if let Ok(i) = n.parse::<i64>() {
        return Ok(Value::Number(i.into()));
    }
    if let Ok(u) = n.parse::<u64>() {
        return Ok(Value::Number(u.into()));
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| ProductApiError::ConversionError {
            message: format!("invalid number attribute: {}", n),
        })
}

pub fn map_to_item(map: &Map<String, Value>) -> Item {
    map.iter()
        .map(|(key, value)| (key.clone(), value_to_attribute(value)))
        .collect()
}

pub fn item_to_map(item: &Item) -> Result<Map<String, Value>> {
    item.iter()
        .map(|(key, attribute)| {
            attribute_to_value(attribute).map(|value| (key.clone(), value))
        })
        .collect()
}

pub fn record_to_item(record: &Record) -> Item {
    map_to_item(record.fields())
}

pub fn item_to_record(item: &Item) -> Result<Record> {
    Record::try_from(item_to_map(item)?)
}

pub fn scan_key_to_item(key: &ScanKey) -> Item {
    map_to_item(key)
}

//! DynamoDB 後端：`aws-sdk-dynamodb` 上的 `ProductStore` 實作。

pub mod conversions;
pub mod error;
pub mod store;

pub use store::DynamoDbStore;

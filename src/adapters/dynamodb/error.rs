//! 把 AWS SDK 錯誤對應到 `ProductApiError`。

use crate::utils::error::ProductApiError;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use std::fmt::Debug;

pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    table: &str,
) -> ProductApiError {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => ProductApiError::TableNotFound {
            table: table.to_string(),
        },
        GetItemError::ProvisionedThroughputExceededException(_)
        | GetItemError::RequestLimitExceeded(_) => ProductApiError::StoreThrottled {
            operation: "GetItem",
        },
        err => ProductApiError::store("GetItem", format!("{:?}", err)),
    }
}

pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
    table: &str,
) -> ProductApiError {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => ProductApiError::TableNotFound {
            table: table.to_string(),
        },
        ScanError::ProvisionedThroughputExceededException(_)
        | ScanError::RequestLimitExceeded(_) => ProductApiError::StoreThrottled {
            operation: "Scan",
        },
        err => ProductApiError::store("Scan", format!("{:?}", err)),
    }
}

pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table: &str,
) -> ProductApiError {
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => ProductApiError::TableNotFound {
            table: table.to_string(),
        },
        PutItemError::ProvisionedThroughputExceededException(_)
        | PutItemError::RequestLimitExceeded(_) => ProductApiError::StoreThrottled {
            operation: "PutItem",
        },
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            ProductApiError::store("PutItem", "Item collection size limit exceeded")
        }
        err => ProductApiError::store("PutItem", format!("{:?}", err)),
    }
}

pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    table: &str,
    product_id: &str,
) -> ProductApiError {
    match err.into_service_error() {
        // attribute_exists(productId) 條件失敗 => 記錄不存在
        UpdateItemError::ConditionalCheckFailedException(_) => ProductApiError::RecordNotFound {
            product_id: product_id.to_string(),
        },
        UpdateItemError::ResourceNotFoundException(_) => ProductApiError::TableNotFound {
            table: table.to_string(),
        },
        UpdateItemError::ProvisionedThroughputExceededException(_)
        | UpdateItemError::RequestLimitExceeded(_) => ProductApiError::StoreThrottled {
            operation: "UpdateItem",
        },
        err => ProductApiError::store("UpdateItem", format!("{:?}", err)),
    }
}

pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    table: &str,
) -> ProductApiError {
    match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(_) => ProductApiError::TableNotFound {
            table: table.to_string(),
        },
        DeleteItemError::ProvisionedThroughputExceededException(_)
        | DeleteItemError::RequestLimitExceeded(_) => ProductApiError::StoreThrottled {
            operation: "DeleteItem",
        },
        err => ProductApiError::store("DeleteItem", format!("{:?}", err)),
    }
}

#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use product_api::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use product_api::{Dispatcher, DynamoDbStore, Response, ServiceConfig};
#[cfg(feature = "lambda")]
use serde_json::Value;
#[cfg(feature = "lambda")]
use std::sync::Arc;

#[cfg(feature = "lambda")]
async fn function_handler(
    dispatcher: &Dispatcher,
    event: LambdaEvent<Value>,
) -> Result<Response, Error> {
    tracing::debug!(request_id = %event.context.request_id, "Request event: {}", event.payload);

    // 事件格式不對也回 400，不交給 runtime 當成 invocation error
    Ok(dispatcher.dispatch_event(event.payload).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時載入一次，之後所有請求共用同一個 client
    let config = ServiceConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let store = DynamoDbStore::from_config(&config).await;
    tracing::info!(
        table = %config.table_name,
        region = %config.region,
        "Product API Lambda initialized"
    );

    let dispatcher = Dispatcher::new(Arc::new(store));
    run(service_fn(|event| function_handler(&dispatcher, event))).await
}

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{ServiceConfig, TomlConfig};

#[cfg(feature = "dynamodb")]
pub use adapters::dynamodb::DynamoDbStore;
pub use adapters::memory::InMemoryStore;

pub use self::core::{dispatcher::Dispatcher, gateway::RecordGateway};
pub use domain::model::{Record, Request, Response};
pub use domain::ports::ProductStore;
pub use utils::error::{ProductApiError, Result};

pub mod dispatcher;
pub mod gateway;
pub mod pagination;

pub use crate::domain::model::{Record, Request, Response, ScanKey, ScanPage};
pub use crate::domain::ports::ProductStore;
pub use crate::utils::error::Result;

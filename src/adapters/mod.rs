// Adapters layer: concrete ProductStore backends.

pub mod memory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

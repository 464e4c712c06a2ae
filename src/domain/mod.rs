// Domain layer: product record model, API Gateway request/response shapes and the store port.

pub mod model;
pub mod ports;

//! Stockroom Client - HTTP gateway to the remote product store
//!
//! Provides the `ProductGateway` boundary trait and its reqwest-backed
//! implementation over the store's REST API.

pub mod config;
pub mod error;
pub mod gateway;

pub use config::ClientConfig;
pub use error::{GatewayError, GatewayResult};
pub use gateway::{HttpGateway, ProductGateway};

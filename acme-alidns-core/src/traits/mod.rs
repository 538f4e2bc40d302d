//! Trait definitions
//!
//! Seams between the core and the provider gateway.

mod gateway_factory;

pub use gateway_factory::{AliyunGatewayFactory, GatewayFactory};

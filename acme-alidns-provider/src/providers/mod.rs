//! DNS provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod aliyun;

pub use aliyun::{AliyunProvider, AliyunProviderBuilder};

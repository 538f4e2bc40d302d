//! # acme-alidns-provider
//!
//! Alibaba Cloud DNS (Alidns) gateway for ACME DNS-01 challenges.
//!
//! Exposes exactly what a challenge needs from the provider: probe whether a
//! zone exists, create a TXT record, look TXT records up by name and value, and
//! delete a record by id. See [`ChallengeGateway`].
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use acme_alidns_provider::{create_gateway, CreateTxtRecordRequest, ProviderSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = ProviderSession::new("your-access-key-id", "your-access-key-secret", "cn-hangzhou");
//!     let gateway = create_gateway(&session, 2)?;
//!
//!     gateway.probe_zone("example.com").await?;
//!     let record_id = gateway
//!         .create_txt_record(&CreateTxtRecordRequest {
//!             zone: "example.com".to_string(),
//!             rr: "_acme-challenge".to_string(),
//!             value: "token".to_string(),
//!             ttl: 600,
//!         })
//!         .await?;
//!     gateway.delete_record(&record_id).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ProviderError>`](ProviderError).
//! [`ProviderError::kind`] reduces an error to [`FaultKind::NotFound`] or
//! [`FaultKind::Failed`]. Transient errors (`NetworkError`, `Timeout`,
//! `RateLimited`) are retried with exponential backoff inside the gateway.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{FaultKind, ProviderError, Result};
pub use factory::create_gateway;
pub use providers::{AliyunProvider, AliyunProviderBuilder};
pub use traits::ChallengeGateway;
pub use types::{
    CreateTxtRecordRequest, DEFAULT_REGION, ProviderSession, RecordPage, TxtRecord,
    TxtRecordQuery, regional_endpoint,
};
pub use utils::log_sanitizer::mask_key;

//! ACME DNS-01 challenge core for Alibaba Cloud DNS
//!
//! Given a challenge record name such as `_acme-challenge.sub.example.co.uk` and a
//! validation token, this crate:
//! - finds the Alidns zone that manages the name by probing candidate suffixes
//!   ([`ZoneResolver`])
//! - creates the TXT record, or finds and deletes exactly the matching one
//!   ([`RecordReconciler`])
//! - wraps both behind the publish/cleanup pair a certificate client calls
//!   ([`DnsAuthenticator`])
//!
//! The provider is reached through [`GatewayFactory`], which opens a fresh
//! gateway for every call.

pub mod credentials;
pub mod error;
pub mod services;
pub mod traits;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use acme_alidns_provider::{ChallengeGateway, ProviderSession};
pub use credentials::ChallengeCredentials;
pub use error::{CoreError, CoreResult, ProviderError};
pub use services::{
    CHALLENGE_TTL, Challenge, DEFAULT_PROPAGATION_SECONDS, DnsAuthenticator, RecordReconciler,
    ResolvedZone, ZoneResolver, candidate_zones, relative_name,
};
pub use traits::{AliyunGatewayFactory, GatewayFactory};

//! Gateway factory trait

use std::sync::Arc;

use acme_alidns_provider::{ChallengeGateway, ProviderSession, create_gateway, mask_key};

use crate::error::CoreResult;

/// Opens a [`ChallengeGateway`] for one session.
///
/// Called once per publish/cleanup; implementations must not hand out a shared
/// long-lived client.
pub trait GatewayFactory: Send + Sync {
    fn open(&self, session: &ProviderSession) -> CoreResult<Arc<dyn ChallengeGateway>>;
}

/// Factory for the Alibaba Cloud DNS gateway.
#[derive(Debug, Clone, Copy)]
pub struct AliyunGatewayFactory {
    max_retries: u32,
}

impl AliyunGatewayFactory {
    #[must_use]
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }
}

impl Default for AliyunGatewayFactory {
    fn default() -> Self {
        Self::new(2)
    }
}

impl GatewayFactory for AliyunGatewayFactory {
    fn open(&self, session: &ProviderSession) -> CoreResult<Arc<dyn ChallengeGateway>> {
        log::debug!(
            "Opening Alidns session for key {} at {} (region {})",
            mask_key(&session.access_key_id),
            session.endpoint,
            session.region
        );
        Ok(create_gateway(session, self.max_retries)?)
    }
}

//! Gateway factory.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::AliyunProvider;
use crate::traits::ChallengeGateway;
use crate::types::ProviderSession;

/// Open a gateway for one session.
///
/// `max_retries` bounds automatic retries of transient transport failures;
/// `0` sends every request exactly once.
///
/// ```rust,no_run
/// use acme_alidns_provider::{create_gateway, ProviderSession};
///
/// let session = ProviderSession::new("ak", "sk", "cn-hangzhou");
/// let gateway = create_gateway(&session, 2).unwrap();
/// assert_eq!(gateway.id(), "aliyun");
/// ```
pub fn create_gateway(session: &ProviderSession, max_retries: u32) -> Result<Arc<dyn ChallengeGateway>> {
    let provider = AliyunProvider::builder(session.clone())
        .max_retries(max_retries)
        .build()?;
    Ok(Arc::new(provider))
}

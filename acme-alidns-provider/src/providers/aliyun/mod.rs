//! 阿里云 DNS (Alidns) gateway

mod error;
mod http;
mod provider;
mod sign;
mod types;

use reqwest::{Client, Url};

use crate::error::{ProviderError, Result};
use crate::providers::common::create_http_client;
use crate::types::ProviderSession;

pub(crate) use types::{
    AddDomainRecordResponse, DeleteDomainRecordResponse, DescribeDomainRecordsResponse,
    serialize_to_query_string,
};

pub(crate) const PROVIDER_NAME: &str = "aliyun";
pub(crate) const ALIYUN_DNS_VERSION: &str = "2015-01-09";
/// 空 body 的 SHA256 hash (固定值)
pub(crate) const EMPTY_BODY_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
/// 阿里云 API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE: u32 = 100;

/// Alibaba Cloud DNS gateway.
///
/// Authenticates every call with ACS3-HMAC-SHA256 over the session's access key pair.
///
/// ```rust,no_run
/// use acme_alidns_provider::{AliyunProvider, ProviderSession};
///
/// # fn main() -> acme_alidns_provider::Result<()> {
/// let session = ProviderSession::new("your-access-key-id", "your-access-key-secret", "cn-hangzhou");
/// let provider = AliyunProvider::builder(session).max_retries(0).build()?;
/// # Ok(())
/// # }
/// ```
pub struct AliyunProvider {
    pub(crate) client: Client,
    pub(crate) access_key_id: String,
    pub(crate) access_key_secret: String,
    /// `host[:port]` as signed and sent in the `Host` header.
    pub(crate) host: String,
    /// `scheme://host[:port]`
    pub(crate) base_url: String,
    pub(crate) max_retries: u32,
}

/// Builder for [`AliyunProvider`].
pub struct AliyunProviderBuilder {
    session: ProviderSession,
    max_retries: u32,
}

impl AliyunProviderBuilder {
    /// Maximum automatic retries for transient errors (default: 2).
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the provider. Fails when the session endpoint is not an absolute
    /// http(s) URL.
    pub fn build(self) -> Result<AliyunProvider> {
        let (base_url, host) = split_endpoint(&self.session.endpoint)?;
        Ok(AliyunProvider {
            client: create_http_client(PROVIDER_NAME)?,
            access_key_id: self.session.access_key_id,
            access_key_secret: self.session.access_key_secret,
            host,
            base_url,
            max_retries: self.max_retries,
        })
    }
}

impl AliyunProvider {
    /// Provider with default settings (2 retries).
    pub fn new(session: ProviderSession) -> Result<Self> {
        Self::builder(session).build()
    }

    /// Builder for customizing the provider.
    pub fn builder(session: ProviderSession) -> AliyunProviderBuilder {
        AliyunProviderBuilder {
            session,
            max_retries: 2,
        }
    }
}

fn split_endpoint(endpoint: &str) -> Result<(String, String)> {
    let invalid = |detail: String| ProviderError::InvalidParameter {
        provider: PROVIDER_NAME.to_string(),
        param: "endpoint".to_string(),
        detail,
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(format!("{endpoint}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme in {endpoint}")));
    }
    let Some(host) = url.host_str() else {
        return Err(invalid(format!("missing host in {endpoint}")));
    };
    let host = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    Ok((format!("{}://{host}", url.scheme()), host))
}

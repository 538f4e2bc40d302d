use serde::{Deserialize, Serialize};

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "cn-hangzhou";

/// Credentials and endpoint for a single gateway session.
///
/// A session is a plain value: build one per publish/cleanup call and hand it to
/// [`create_gateway`](crate::create_gateway). Nothing is cached between calls.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSession {
    /// Access Key ID.
    pub access_key_id: String,
    /// Access Key Secret.
    pub access_key_secret: String,
    /// Region selector, e.g. `cn-hangzhou`.
    pub region: String,
    /// Base URL of the Alidns API.
    pub endpoint: String,
}

impl ProviderSession {
    /// Create a session whose endpoint is derived from `region`.
    ///
    /// An empty region falls back to [`DEFAULT_REGION`].
    pub fn new(
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        let region = region.into();
        let region = if region.trim().is_empty() {
            DEFAULT_REGION.to_string()
        } else {
            region.trim().to_string()
        };
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
            endpoint: regional_endpoint(&region),
            region,
        }
    }

    /// Override the API endpoint (private endpoints, test servers).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl std::fmt::Debug for ProviderSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSession")
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"***")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Public Alidns endpoint for `region`.
pub fn regional_endpoint(region: &str) -> String {
    format!("https://alidns.{region}.aliyuncs.com")
}

/// A TXT record as returned by a record query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxtRecord {
    /// Provider-assigned record id.
    pub record_id: String,
    /// Record name relative to its zone (`@` for the apex).
    pub rr: String,
    /// Record content.
    pub value: String,
    /// TTL in seconds.
    pub ttl: u32,
}

/// Result of a zone probe: the first page of a record listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPage {
    /// Total number of records in the zone, as reported by the provider.
    pub total_count: u32,
    /// Number of records on this page.
    pub returned: usize,
}

/// Request to create a TXT record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTxtRecordRequest {
    /// Zone name (e.g. `example.com`).
    pub zone: String,
    /// Relative record name.
    pub rr: String,
    /// Record content.
    pub value: String,
    /// TTL in seconds.
    pub ttl: u32,
}

/// Filter for a TXT record lookup.
///
/// The provider matches `rr` and `value` as keywords, so results may be a
/// superset of the exact match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxtRecordQuery {
    /// Zone name.
    pub zone: String,
    /// Relative record name.
    pub rr: String,
    /// Record content.
    pub value: String,
}

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{CreateTxtRecordRequest, RecordPage, TxtRecord, TxtRecordQuery};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code as sent by the API.
    pub code: Option<String>,
    /// Raw error message.
    pub message: String,
}

impl RawApiError {
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Extra context attached when a raw API error is mapped.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    pub record_name: Option<String>,
    pub record_id: Option<String>,
    pub domain: Option<String>,
}

impl ErrorContext {
    pub fn domain(domain: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            ..Self::default()
        }
    }

    pub fn record(domain: &str, record_name: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            record_name: Some(record_name.to_string()),
            ..Self::default()
        }
    }

    pub fn record_id(record_id: &str) -> Self {
        Self {
            record_id: Some(record_id.to_string()),
            ..Self::default()
        }
    }
}

/// Maps provider error codes onto [`ProviderError`].
pub(crate) trait ProviderErrorMapper {
    fn provider_name(&self) -> &'static str;

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// The four provider capabilities a DNS-01 challenge needs.
///
/// Implementations own transport, signing and error normalization. Callers
/// only see [`ProviderError`].
#[async_trait]
pub trait ChallengeGateway: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &'static str;

    /// List at most one record of `zone`.
    ///
    /// Success means the provider manages `zone`; a
    /// [`FaultKind::NotFound`](crate::FaultKind::NotFound) error means it does not.
    async fn probe_zone(&self, zone: &str) -> Result<RecordPage>;

    /// Create a TXT record and return its record id.
    async fn create_txt_record(&self, req: &CreateTxtRecordRequest) -> Result<String>;

    /// Look up TXT records matching the query's name and value keywords.
    async fn query_txt_records(&self, query: &TxtRecordQuery) -> Result<Vec<TxtRecord>>;

    /// Delete a record by id.
    async fn delete_record(&self, record_id: &str) -> Result<()>;
}

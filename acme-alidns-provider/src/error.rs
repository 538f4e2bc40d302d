use serde::{Deserialize, Serialize};

/// Unified error type for every Alidns gateway operation.
///
/// Each variant carries the `provider` id that produced it plus variant-specific
/// context. Variants are serializable so callers can report them structurally.
///
/// # Retryable Errors
///
/// [`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout) and
/// [`RateLimited`](Self::RateLimited) are transient; the HTTP layer retries them
/// with exponential backoff before they ever reach the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (connection refused, TLS failure, 5xx gateway, ...).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded.
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait in seconds, if the API sent one.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The access key pair was rejected.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The access key is valid but may not touch the requested resource.
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The named zone is not managed by this account.
    DomainNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Zone name that was not found.
        domain: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The zone is locked, expired or otherwise frozen.
    DomainLocked {
        /// Provider that produced the error.
        provider: String,
        /// Zone name that is locked.
        domain: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The record id does not exist (or belongs to someone else).
    RecordNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Record id that was not found.
        record_id: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// An identical record already exists.
    RecordExists {
        /// Provider that produced the error.
        provider: String,
        /// Relative name of the conflicting record.
        record_name: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The account's record quota is used up.
    QuotaExceeded {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter was rejected (bad RR, TTL out of range, ...).
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The provider's response could not be parsed.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// A request could not be serialized.
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An error code that has no dedicated variant.
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

/// Coarse classification of a [`ProviderError`].
///
/// Zone resolution only cares whether a lookup said "no such thing" or failed
/// for any other reason; mutating calls treat both the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The zone or record addressed by the call does not exist.
    NotFound,
    /// Transport, authentication or provider-side failure.
    Failed,
}

impl ProviderError {
    /// Collapse this error into a [`FaultKind`].
    #[must_use]
    pub fn kind(&self) -> FaultKind {
        match self {
            Self::DomainNotFound { .. } | Self::RecordNotFound { .. } => FaultKind::NotFound,
            _ => FaultKind::Failed,
        }
    }

    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::DomainNotFound { .. }
                | Self::DomainLocked { .. }
                | Self::RecordNotFound { .. }
                | Self::RecordExists { .. }
                | Self::QuotaExceeded { .. }
                | Self::InvalidParameter { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => match retry_after {
                Some(secs) => write!(f, "[{provider}] Rate limited (retry after {secs}s)"),
                None => write!(f, "[{provider}] Rate limited"),
            },
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => with_raw(f, provider, "Invalid credentials", raw_message.as_deref()),
            Self::PermissionDenied {
                provider,
                raw_message,
            } => with_raw(f, provider, "Permission denied", raw_message.as_deref()),
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
            } => with_raw(
                f,
                provider,
                &format!("Domain '{domain}' not found"),
                raw_message.as_deref(),
            ),
            Self::DomainLocked {
                provider,
                domain,
                raw_message,
            } => with_raw(
                f,
                provider,
                &format!("Domain '{domain}' is locked"),
                raw_message.as_deref(),
            ),
            Self::RecordNotFound {
                provider,
                record_id,
                ..
            } => write!(f, "[{provider}] Record '{record_id}' not found"),
            Self::RecordExists {
                provider,
                record_name,
                ..
            } => write!(f, "[{provider}] Record '{record_name}' already exists"),
            Self::QuotaExceeded { provider, .. } => write!(f, "[{provider}] Quota exceeded"),
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => write!(f, "[{provider}] Invalid parameter '{param}': {detail}"),
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => write!(f, "[{provider}] {raw_message}"),
        }
    }
}

fn with_raw(
    f: &mut std::fmt::Formatter<'_>,
    provider: &str,
    summary: &str,
    raw_message: Option<&str>,
) -> std::fmt::Result {
    match raw_message {
        Some(msg) => write!(f, "[{provider}] {summary}: {msg}"),
        None => write!(f, "[{provider}] {summary}"),
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_credentials_with_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "aliyun".to_string(),
            raw_message: Some("Specified access key is not found.".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[aliyun] Invalid credentials: Specified access key is not found."
        );
    }

    #[test]
    fn display_invalid_credentials_without_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "aliyun".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[aliyun] Invalid credentials");
    }

    #[test]
    fn display_domain_not_found() {
        let e = ProviderError::DomainNotFound {
            provider: "aliyun".to_string(),
            domain: "foo.example.com".to_string(),
            raw_message: Some("The specified domain name does not exist.".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[aliyun] Domain 'foo.example.com' not found: The specified domain name does not exist."
        );
    }

    #[test]
    fn display_record_exists() {
        let e = ProviderError::RecordExists {
            provider: "aliyun".to_string(),
            record_name: "_acme-challenge".to_string(),
            raw_message: None,
        };
        assert_eq!(
            e.to_string(),
            "[aliyun] Record '_acme-challenge' already exists"
        );
    }

    #[test]
    fn display_rate_limited() {
        let with = ProviderError::RateLimited {
            provider: "aliyun".to_string(),
            retry_after: Some(5),
            raw_message: None,
        };
        let without = ProviderError::RateLimited {
            provider: "aliyun".to_string(),
            retry_after: None,
            raw_message: None,
        };
        assert_eq!(with.to_string(), "[aliyun] Rate limited (retry after 5s)");
        assert_eq!(without.to_string(), "[aliyun] Rate limited");
    }

    #[test]
    fn display_unknown_uses_raw_message() {
        let e = ProviderError::Unknown {
            provider: "aliyun".to_string(),
            raw_code: Some("InternalError".to_string()),
            raw_message: "The request processing has failed due to some unknown error."
                .to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[aliyun] The request processing has failed due to some unknown error."
        );
    }

    #[test]
    fn kind_separates_not_found_from_failures() {
        let domain = ProviderError::DomainNotFound {
            provider: "aliyun".into(),
            domain: "x.com".into(),
            raw_message: None,
        };
        let record = ProviderError::RecordNotFound {
            provider: "aliyun".into(),
            record_id: "1".into(),
            raw_message: None,
        };
        let network = ProviderError::NetworkError {
            provider: "aliyun".into(),
            detail: "connection reset".into(),
        };
        let denied = ProviderError::PermissionDenied {
            provider: "aliyun".into(),
            raw_message: None,
        };

        assert_eq!(domain.kind(), FaultKind::NotFound);
        assert_eq!(record.kind(), FaultKind::NotFound);
        assert_eq!(network.kind(), FaultKind::Failed);
        assert_eq!(denied.kind(), FaultKind::Failed);
    }

    #[test]
    fn transient_errors_are_not_expected() {
        assert!(
            !ProviderError::Timeout {
                provider: "aliyun".into(),
                detail: "30s".into(),
            }
            .is_expected()
        );
        assert!(
            ProviderError::QuotaExceeded {
                provider: "aliyun".into(),
                raw_message: None,
            }
            .is_expected()
        );
    }

    #[test]
    fn serializes_with_code_tag() {
        let e = ProviderError::RateLimited {
            provider: "aliyun".to_string(),
            retry_after: Some(60),
            raw_message: Some("Request was denied due to request throttling.".to_string()),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        assert!(json.contains("\"retry_after\":60"));

        let back: ProviderError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), e.to_string());
    }
}

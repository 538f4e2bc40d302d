//! 阿里云错误映射
//!
//! 参考: <https://api.aliyun.com/document/Alidns/2015-01-09/errorCode>

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{AliyunProvider, PROVIDER_NAME};

impl ProviderErrorMapper for AliyunProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        let invalid = |param: &str, detail: String| ProviderError::InvalidParameter {
            provider: PROVIDER_NAME.to_string(),
            param: param.to_string(),
            detail,
        };

        match raw.code.as_deref() {
            // ============ 认证错误 ============
            Some(
                "InvalidAccessKeyId.NotFound"
                | "InvalidAccessKeyId.Inactive"
                | "SignatureDoesNotMatch"
                | "IncompleteSignature",
            ) => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },

            // ============ 权限/操作被拒绝 ============
            Some(
                "Forbidden"
                | "Forbidden.RAM"
                | "Forbidden.RiskControl"
                | "OperationDomain.NoPermission"
                | "IllegalUser"
                | "IncorrectDomainUser",
            ) => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },

            // ============ 域名不存在 ============
            Some("InvalidDomainName.NoExist" | "DomainNotFound" | "Domain.NotFound") => {
                ProviderError::DomainNotFound {
                    provider,
                    domain: context.domain.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }

            // ============ 记录不存在 ============
            Some(
                "DomainRecordNotBelongToUser" | "InvalidRecordId.NotFound" | "InvalidRR.NoExist",
            ) => ProviderError::RecordNotFound {
                provider,
                record_id: context.record_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ============ 记录已存在 ============
            Some("DomainRecordDuplicate" | "DomainRecordConflict") => ProviderError::RecordExists {
                provider,
                record_name: context.record_name.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ============ 域名被锁定/禁用 ============
            Some(
                "DomainRecordLocked"
                | "DomainExpiredDNSForbidden"
                | "Forbidden.DomainExpired"
                | "RecordForbidden.BlackHole",
            ) => ProviderError::DomainLocked {
                provider,
                domain: context.domain.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ============ 配额限制 ============
            Some(
                "QuotaExceeded.Record"
                | "QuotaExceeded.FreeDnsRecord"
                | "QuotaExceeded.SubDomain"
                | "QuotaExceeded.TTL",
            ) => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
            },

            // ============ 频率限流（可重试） ============
            Some("Throttling" | "Throttling.User" | "Throttling.Api") => {
                ProviderError::RateLimited {
                    provider,
                    retry_after: None,
                    raw_message: Some(raw.message),
                }
            }

            // ============ 参数无效 ============
            Some("InvalidRR.RrEmpty" | "InvalidRR.Format" | "InvalidRR.Length") => {
                invalid("rr", raw.message)
            }
            Some("SubDomainInvalid.TTL" | "InvalidTTL") => invalid("ttl", raw.message),
            Some("SubDomainInvalid.Value" | "InvalidValue.Length") => invalid("value", raw.message),
            Some(
                "InvalidDomainName.Format"
                | "InvalidDomainName.Suffix"
                | "InvalidDomainName.Length"
                | "DomainEmpty",
            ) => invalid("domain", raw.message),

            _ => self.unknown_error(raw),
        }
    }
}

//! 托管域名（Zone）解析
//!
//! 在本地没有任何域名清单的前提下，通过逐级探测候选后缀找出管理某条记录的 Zone。

use acme_alidns_provider::ChallengeGateway;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// 解析结果：所属 Zone 与相对记录名
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedZone {
    /// Zone 名称，例如 `example.com`
    pub zone: String,
    /// 相对 `zone` 的记录名，顶点为 `@`
    pub rr: String,
}

/// 候选 Zone 列表：`record_name` 的所有右对齐后缀，从最具体到最宽泛
///
/// 从完整名称一直到两级后缀；单标签名称只返回自身。忽略末尾的点。
///
/// ```
/// use acme_alidns_core::candidate_zones;
///
/// assert_eq!(
///     candidate_zones("_acme-challenge.foo.example.com"),
///     ["_acme-challenge.foo.example.com", "foo.example.com", "example.com"]
/// );
/// ```
#[must_use]
pub fn candidate_zones(record_name: &str) -> Vec<String> {
    let name = record_name.trim_end_matches('.');
    if name.is_empty() {
        return Vec::new();
    }

    let labels: Vec<&str> = name.split('.').collect();
    let last = labels.len().saturating_sub(2);
    (0..=last).map(|i| labels[i..].join(".")).collect()
}

/// 计算相对记录名（RR）
///
/// 两者相同时返回 `@`，`record_name` 不在 `zone` 之下时返回 `None`。
#[must_use]
pub fn relative_name(record_name: &str, zone: &str) -> Option<String> {
    let name = record_name.trim_end_matches('.');
    let zone = zone.trim_end_matches('.');

    if name.eq_ignore_ascii_case(zone) {
        return Some("@".to_string());
    }

    let prefix_len = name.len().checked_sub(zone.len() + 1)?;
    let (prefix, rest) = name.split_at_checked(prefix_len)?;
    let suffix = rest.strip_prefix('.')?;
    (!prefix.is_empty() && suffix.eq_ignore_ascii_case(zone)).then(|| prefix.to_string())
}

fn validate_record_name(record_name: &str) -> CoreResult<()> {
    let name = record_name.trim_end_matches('.');
    if name.is_empty() || name.split('.').any(str::is_empty) {
        return Err(CoreError::InvalidRecordName(record_name.to_string()));
    }
    Ok(())
}

/// Zone 解析器
///
/// 不缓存任何结果，每次 `resolve` 都重新探测。
pub struct ZoneResolver<'a> {
    gateway: &'a dyn ChallengeGateway,
}

impl<'a> ZoneResolver<'a> {
    #[must_use]
    pub fn new(gateway: &'a dyn ChallengeGateway) -> Self {
        Self { gateway }
    }

    /// 解析记录所属的 Zone
    ///
    /// 按从具体到宽泛的顺序探测候选后缀，第一个探测成功的候选即为 Zone，之后不再发起请求。
    /// 探测失败（无论是“不存在”还是网络/服务端错误）都只视为“该候选不是 Zone”。
    pub async fn resolve(&self, record_name: &str) -> CoreResult<ResolvedZone> {
        validate_record_name(record_name)?;

        for candidate in candidate_zones(record_name) {
            match self.gateway.probe_zone(&candidate).await {
                Ok(page) => {
                    let Some(rr) = relative_name(record_name, &candidate) else {
                        continue;
                    };
                    log::debug!(
                        "Resolved {record_name} to zone {candidate} (rr={rr}, {} records)",
                        page.total_count
                    );
                    return Ok(ResolvedZone { zone: candidate, rr });
                }
                Err(e) => {
                    log::debug!(
                        "{candidate} is not a zone ({:?}): {e}",
                        e.kind()
                    );
                }
            }
        }

        Err(CoreError::ZoneNotFound {
            record_name: record_name.to_string(),
        })
    }
}

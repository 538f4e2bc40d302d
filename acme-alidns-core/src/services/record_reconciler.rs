//! 验证 TXT 记录的创建与删除

use acme_alidns_provider::{
    ChallengeGateway, CreateTxtRecordRequest, ProviderError, TxtRecordQuery,
};

use crate::error::CoreResult;
use crate::services::{ResolvedZone, ZoneResolver};

/// 验证记录的 TTL（秒），阿里云允许的最小值
pub const CHALLENGE_TTL: u32 = 600;

/// TXT 记录协调器
pub struct RecordReconciler<'a> {
    gateway: &'a dyn ChallengeGateway,
}

impl<'a> RecordReconciler<'a> {
    #[must_use]
    pub fn new(gateway: &'a dyn ChallengeGateway) -> Self {
        Self { gateway }
    }

    /// 创建验证记录
    ///
    /// 不预先检查同名记录：同一名称下允许存在多条 TXT（通配符与主域名同时验证）。
    /// 服务端以 `RecordExists` 拒绝完全相同的记录时，期望状态已经成立，按成功处理。
    pub async fn create_challenge(&self, target: &ResolvedZone, value: &str) -> CoreResult<()> {
        let request = CreateTxtRecordRequest {
            zone: target.zone.clone(),
            rr: target.rr.clone(),
            value: value.to_string(),
            ttl: CHALLENGE_TTL,
        };

        match self.gateway.create_txt_record(&request).await {
            Ok(record_id) => {
                log::debug!(
                    "Created TXT record {} in {} (id {record_id})",
                    target.rr,
                    target.zone
                );
                Ok(())
            }
            Err(ProviderError::RecordExists { .. }) => {
                log::debug!(
                    "TXT record {} in {} already holds this value",
                    target.rr,
                    target.zone
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 查找与 RR 和值都完全一致的记录
    ///
    /// 服务端的关键字过滤是模糊匹配，这里必须再逐条比对。多条命中时取第一条。
    /// 查询失败视为没有命中。
    pub async fn find_challenge_record(&self, target: &ResolvedZone, value: &str) -> Option<String> {
        let query = TxtRecordQuery {
            zone: target.zone.clone(),
            rr: target.rr.clone(),
            value: value.to_string(),
        };

        let records = match self.gateway.query_txt_records(&query).await {
            Ok(records) => records,
            Err(e) => {
                log::debug!(
                    "Encountered error finding TXT record {} in {}: {e}",
                    target.rr,
                    target.zone
                );
                return None;
            }
        };

        records
            .into_iter()
            .find(|r| r.rr == target.rr && r.value == value)
            .map(|r| r.record_id)
    }

    /// 删除验证记录
    ///
    /// 不向调用方返回任何错误：Zone 无法解析、没有匹配记录、删除失败都只记录日志。
    pub async fn delete_challenge(&self, record_name: &str, value: &str) {
        let target = match ZoneResolver::new(self.gateway).resolve(record_name).await {
            Ok(target) => target,
            Err(e) => {
                log::debug!("Skipping cleanup of {record_name}: {e}");
                return;
            }
        };

        let Some(record_id) = self.find_challenge_record(&target, value).await else {
            log::debug!("No TXT record {} in {} to delete", target.rr, target.zone);
            return;
        };

        match self.gateway.delete_record(&record_id).await {
            Ok(()) => log::debug!("Deleted TXT record {record_id} from {}", target.zone),
            Err(e) => log::warn!("Encountered error deleting TXT record {record_id}: {e}"),
        }
    }
}

//! DNS-01 验证器
//!
//! 对外的 publish/cleanup 入口。每次调用都新建会话和 gateway，调用之间不共享任何状态。

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use acme_alidns_provider::{ChallengeGateway, ProviderSession};
use serde::Serialize;

use crate::credentials::ChallengeCredentials;
use crate::error::{CoreError, CoreResult};
use crate::services::{RecordReconciler, ZoneResolver};
use crate::traits::GatewayFactory;

/// 发布后等待 DNS 传播的默认秒数
pub const DEFAULT_PROPAGATION_SECONDS: u64 = 10;

const CHALLENGE_LABEL: &str = "_acme-challenge";

/// 一个待验证的 DNS-01 challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    /// 待验证的域名（可能是通配符）
    pub domain: String,
    /// TXT 记录的完整名称
    pub validation_name: String,
    /// TXT 记录值
    pub validation: String,
}

impl Challenge {
    /// 记录名为 `_acme-challenge.<domain>`，去掉开头的 `*.`
    pub fn new(domain: impl Into<String>, validation: impl Into<String>) -> Self {
        let domain = domain.into();
        let base = domain.strip_prefix("*.").unwrap_or(&domain);
        let validation_name = format!("{CHALLENGE_LABEL}.{}", base.trim_end_matches('.'));
        Self {
            validation_name,
            domain,
            validation: validation.into(),
        }
    }
}

/// DNS-01 验证器
pub struct DnsAuthenticator<F: GatewayFactory> {
    factory: F,
    credentials: Option<ChallengeCredentials>,
    endpoint: Option<String>,
    propagation_delay: Duration,
}

impl<F: GatewayFactory> DnsAuthenticator<F> {
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            credentials: None,
            endpoint: None,
            propagation_delay: Duration::from_secs(DEFAULT_PROPAGATION_SECONDS),
        }
    }

    #[must_use]
    pub fn with_propagation_delay(mut self, delay: Duration) -> Self {
        self.propagation_delay = delay;
        self
    }

    /// 使用自定义 API 地址替代按地域推导的地址
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    #[must_use]
    pub fn propagation_delay(&self) -> Duration {
        self.propagation_delay
    }

    /// 直接提供凭证
    pub fn prepare(&mut self, credentials: ChallengeCredentials) {
        self.credentials = Some(credentials);
    }

    /// 从 INI 文件加载凭证
    pub fn setup_credentials(&mut self, path: &Path) -> CoreResult<()> {
        let credentials = ChallengeCredentials::from_file(path)?;
        log::debug!(
            "Loaded credentials from {} (region {})",
            path.display(),
            credentials.region()
        );
        self.prepare(credentials);
        Ok(())
    }

    #[must_use]
    pub fn is_prepared(&self) -> bool {
        self.credentials.is_some()
    }

    fn open_gateway(&self) -> CoreResult<Arc<dyn ChallengeGateway>> {
        let credentials = self.credentials.as_ref().ok_or(CoreError::NotConfigured)?;
        let session: ProviderSession = credentials.to_session(self.endpoint.as_deref());
        self.factory.open(&session)
    }

    /// 发布验证记录
    ///
    /// 第一个参数（域名）仅为与调用框架保持接口一致，Zone 完全由 `validation_name` 推导。
    pub async fn perform(
        &self,
        _domain: &str,
        validation_name: &str,
        validation: &str,
    ) -> CoreResult<()> {
        let gateway = self.open_gateway()?;

        let result = async {
            let target = ZoneResolver::new(gateway.as_ref())
                .resolve(validation_name)
                .await?;
            log::debug!(
                "Attempting to add record to domain {}: {}",
                target.zone,
                target.rr
            );
            RecordReconciler::new(gateway.as_ref())
                .create_challenge(&target, validation)
                .await
        }
        .await;

        match &result {
            Ok(()) => log::info!("Published TXT record {validation_name}"),
            Err(e) if e.is_expected() => log::warn!("Failed to publish {validation_name}: {e}"),
            Err(e) => log::error!("Failed to publish {validation_name}: {e}"),
        }
        result
    }

    /// 清理验证记录
    ///
    /// 从不向调用方返回错误，失败只记录日志，不能因为清理失败而中断证书签发流程。
    pub async fn cleanup(&self, _domain: &str, validation_name: &str, validation: &str) {
        let gateway = match self.open_gateway() {
            Ok(gateway) => gateway,
            Err(e) => {
                log::warn!("Skipping cleanup of {validation_name}: {e}");
                return;
            }
        };

        RecordReconciler::new(gateway.as_ref())
            .delete_challenge(validation_name, validation)
            .await;
    }

    /// 依次发布所有 challenge，然后统一等待一次传播
    ///
    /// 遇到第一个失败即停止，已发布的记录留给 [`cleanup_all`](Self::cleanup_all) 清理。
    pub async fn perform_all(&self, challenges: &[Challenge]) -> CoreResult<()> {
        for challenge in challenges {
            self.perform(
                &challenge.domain,
                &challenge.validation_name,
                &challenge.validation,
            )
            .await?;
        }

        if !challenges.is_empty() && !self.propagation_delay.is_zero() {
            log::info!(
                "Waiting {} seconds for DNS changes to propagate",
                self.propagation_delay.as_secs()
            );
            tokio::time::sleep(self.propagation_delay).await;
        }
        Ok(())
    }

    pub async fn cleanup_all(&self, challenges: &[Challenge]) {
        for challenge in challenges {
            self.cleanup(
                &challenge.domain,
                &challenge.validation_name,
                &challenge.validation,
            )
            .await;
        }
    }
}

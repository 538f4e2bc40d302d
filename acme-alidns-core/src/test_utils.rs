//! 测试辅助模块
//!
//! 提供可编排的 mock gateway 和 gateway 工厂。

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use acme_alidns_provider::{
    ChallengeGateway, CreateTxtRecordRequest, ProviderError, ProviderSession, RecordPage,
    Result, TxtRecord, TxtRecordQuery,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::traits::GatewayFactory;

const MOCK_PROVIDER: &str = "mock";

/// 一次 gateway 调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Probe(String),
    Create(CreateTxtRecordRequest),
    Query(TxtRecordQuery),
    Delete(String),
}

pub fn txt(id: &str, rr: &str, value: &str) -> TxtRecord {
    TxtRecord {
        record_id: id.to_string(),
        rr: rr.to_string(),
        value: value.to_string(),
        ttl: 600,
    }
}

// ===== MockGateway =====

/// Only names in `zones` probe successfully; everything else is `DomainNotFound`.
/// Queries return `records` as-is, so tests can feed superset results.
pub struct MockGateway {
    zones: HashSet<String>,
    records: RwLock<Vec<TxtRecord>>,
    probe_errors: RwLock<HashMap<String, ProviderError>>,
    create_error: RwLock<Option<ProviderError>>,
    query_error: RwLock<Option<ProviderError>>,
    delete_error: RwLock<Option<ProviderError>>,
    calls: RwLock<Vec<Call>>,
}

impl MockGateway {
    pub fn with_zones(zones: &[&str]) -> Self {
        Self {
            zones: zones.iter().map(|z| (*z).to_string()).collect(),
            records: RwLock::new(Vec::new()),
            probe_errors: RwLock::new(HashMap::new()),
            create_error: RwLock::new(None),
            query_error: RwLock::new(None),
            delete_error: RwLock::new(None),
            calls: RwLock::new(Vec::new()),
        }
    }

    pub async fn set_records(&self, records: Vec<TxtRecord>) {
        *self.records.write().await = records;
    }

    pub async fn fail_probe(&self, name: &str, err: ProviderError) {
        self.probe_errors.write().await.insert(name.to_string(), err);
    }

    pub async fn fail_create(&self, err: ProviderError) {
        *self.create_error.write().await = Some(err);
    }

    pub async fn fail_query(&self, err: ProviderError) {
        *self.query_error.write().await = Some(err);
    }

    pub async fn fail_delete(&self, err: ProviderError) {
        *self.delete_error.write().await = Some(err);
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.read().await.clone()
    }

    pub async fn probe_count(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| matches!(c, Call::Probe(_)))
            .count()
    }

    pub async fn create_count(&self) -> usize {
        self.creates().await.len()
    }

    pub async fn creates(&self) -> Vec<CreateTxtRecordRequest> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|c| match c {
                Call::Create(req) => Some(req.clone()),
                _ => None,
            })
            .collect()
    }

    pub async fn queries(&self) -> Vec<TxtRecordQuery> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|c| match c {
                Call::Query(q) => Some(q.clone()),
                _ => None,
            })
            .collect()
    }

    /// Ids passed to `delete_record`, whether or not the call succeeded.
    pub async fn deleted(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|c| match c {
                Call::Delete(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, call: Call) {
        self.calls.write().await.push(call);
    }
}

#[async_trait]
impl ChallengeGateway for MockGateway {
    fn id(&self) -> &'static str {
        MOCK_PROVIDER
    }

    async fn probe_zone(&self, zone: &str) -> Result<RecordPage> {
        self.record(Call::Probe(zone.to_string())).await;

        if let Some(err) = self.probe_errors.read().await.get(zone) {
            return Err(err.clone());
        }
        if self.zones.contains(zone) {
            return Ok(RecordPage {
                total_count: 1,
                returned: 1,
            });
        }
        Err(ProviderError::DomainNotFound {
            provider: MOCK_PROVIDER.to_string(),
            domain: zone.to_string(),
            raw_message: None,
        })
    }

    async fn create_txt_record(&self, req: &CreateTxtRecordRequest) -> Result<String> {
        self.record(Call::Create(req.clone())).await;

        if let Some(ref err) = *self.create_error.read().await {
            return Err(err.clone());
        }
        Ok(format!("rec-{}", self.create_count().await))
    }

    async fn query_txt_records(&self, query: &TxtRecordQuery) -> Result<Vec<TxtRecord>> {
        self.record(Call::Query(query.clone())).await;

        if let Some(ref err) = *self.query_error.read().await {
            return Err(err.clone());
        }
        Ok(self.records.read().await.clone())
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        self.record(Call::Delete(record_id.to_string())).await;

        if let Some(ref err) = *self.delete_error.read().await {
            return Err(err.clone());
        }
        self.records.write().await.retain(|r| r.record_id != record_id);
        Ok(())
    }
}

// ===== MockGatewayFactory =====

/// Hands out the same [`MockGateway`] for every session and remembers the sessions.
pub struct MockGatewayFactory {
    gateway: Arc<MockGateway>,
    sessions: Mutex<Vec<ProviderSession>>,
    open_error: Option<String>,
}

impl MockGatewayFactory {
    pub fn new(gateway: Arc<MockGateway>) -> Self {
        Self {
            gateway,
            sessions: Mutex::new(Vec::new()),
            open_error: None,
        }
    }

    /// A factory whose `open` always fails with an invalid-endpoint error.
    pub fn failing(gateway: Arc<MockGateway>, detail: &str) -> Self {
        Self {
            open_error: Some(detail.to_string()),
            ..Self::new(gateway)
        }
    }

    pub fn sessions(&self) -> Vec<ProviderSession> {
        self.sessions.lock().unwrap().clone()
    }
}

impl GatewayFactory for MockGatewayFactory {
    fn open(&self, session: &ProviderSession) -> CoreResult<Arc<dyn ChallengeGateway>> {
        self.sessions.lock().unwrap().push(session.clone());
        if let Some(ref detail) = self.open_error {
            return Err(CoreError::Provider(ProviderError::InvalidParameter {
                provider: MOCK_PROVIDER.to_string(),
                param: "endpoint".to_string(),
                detail: detail.clone(),
            }));
        }
        let gateway: Arc<dyn ChallengeGateway> = self.gateway.clone();
        Ok(gateway)
    }
}

//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use acme_alidns_provider::{ChallengeGateway, ProviderSession, create_gateway};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping: environment variable {} is not set", $var);
                return;
            }
        )+
    };
}

/// Session pointed at a mock server.
pub fn mock_session(uri: &str) -> ProviderSession {
    ProviderSession::new("LTAI5tMockKeyId", "MockSecret", "cn-hangzhou").with_endpoint(uri)
}

/// Gateway pointed at a mock server, retries disabled.
pub fn mock_gateway(uri: &str) -> Arc<dyn ChallengeGateway> {
    create_gateway(&mock_session(uri), 0).unwrap()
}

/// Unique relative name for records created by live tests.
pub fn generate_test_rr() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_acme-test-{}", &uuid.to_string()[..8])
}

/// Live test context built from environment variables.
pub struct LiveContext {
    pub gateway: Arc<dyn ChallengeGateway>,
    pub zone: String,
}

impl LiveContext {
    pub fn from_env() -> Option<Self> {
        let access_key_id = env::var("ALIYUN_ACCESS_KEY_ID").ok()?;
        let access_key_secret = env::var("ALIYUN_ACCESS_KEY_SECRET").ok()?;
        let zone = env::var("TEST_DOMAIN").ok()?;
        let region = env::var("ALIYUN_REGION").unwrap_or_default();

        let session = ProviderSession::new(access_key_id, access_key_secret, region);
        let gateway = create_gateway(&session, 2).ok()?;
        Some(Self { gateway, zone })
    }
}

//! 阿里云 ACS3-HMAC-SHA256 签名
//!
//! 参考: <https://www.alibabacloud.com/help/zh/sdk/product-overview/v3-request-structure-and-signature>

use sha2::{Digest, Sha256};

use crate::providers::common::hmac_sha256;

use super::{ALIYUN_DNS_VERSION, AliyunProvider, EMPTY_BODY_SHA256};

const SIGNING_ALGORITHM: &str = "ACS3-HMAC-SHA256";
const SIGNED_HEADERS: &str =
    "host;x-acs-action;x-acs-content-sha256;x-acs-date;x-acs-signature-nonce;x-acs-version";

/// Canonical request for an RPC-style call: `POST /` with every parameter in
/// the (already sorted and encoded) query string and an empty body.
fn canonical_request(
    host: &str,
    action: &str,
    query_string: &str,
    timestamp: &str,
    nonce: &str,
) -> String {
    let canonical_headers = format!(
        "host:{host}\nx-acs-action:{action}\nx-acs-content-sha256:{EMPTY_BODY_SHA256}\nx-acs-date:{timestamp}\nx-acs-signature-nonce:{nonce}\nx-acs-version:{ALIYUN_DNS_VERSION}\n"
    );
    format!("POST\n/\n{query_string}\n{canonical_headers}\n{SIGNED_HEADERS}\n{EMPTY_BODY_SHA256}")
}

impl AliyunProvider {
    /// Build the `Authorization` header value for one request.
    pub(crate) fn sign(
        &self,
        action: &str,
        query_string: &str,
        timestamp: &str,
        nonce: &str,
    ) -> String {
        let canonical = canonical_request(&self.host, action, query_string, timestamp, nonce);
        log::debug!("CanonicalRequest:\n{canonical}");

        let hashed = hex::encode(Sha256::digest(canonical.as_bytes()));
        let string_to_sign = format!("{SIGNING_ALGORITHM}\n{hashed}");

        let signature = hex::encode(hmac_sha256(
            self.access_key_secret.as_bytes(),
            string_to_sign.as_bytes(),
        ));

        format!(
            "{SIGNING_ALGORITHM} Credential={},SignedHeaders={SIGNED_HEADERS},Signature={signature}",
            self.access_key_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProviderSession;

    fn make_provider(key_id: &str, key_secret: &str) -> AliyunProvider {
        AliyunProvider::new(ProviderSession::new(key_id, key_secret, "cn-hangzhou")).unwrap()
    }

    fn extract_signature(auth: &str) -> &str {
        auth.split("Signature=").nth(1).unwrap_or_default()
    }

    #[test]
    fn canonical_request_layout() {
        let canonical = canonical_request(
            "alidns.cn-hangzhou.aliyuncs.com",
            "DeleteDomainRecord",
            "RecordId=42",
            "2024-01-01T00:00:00Z",
            "n-1",
        );
        let lines: Vec<&str> = canonical.lines().collect();
        assert_eq!(lines[0], "POST");
        assert_eq!(lines[1], "/");
        assert_eq!(lines[2], "RecordId=42");
        assert_eq!(lines[3], "host:alidns.cn-hangzhou.aliyuncs.com");
        assert_eq!(lines[4], "x-acs-action:DeleteDomainRecord");
        assert_eq!(lines[8], "x-acs-version:2015-01-09");
        assert_eq!(lines[9], "");
        assert_eq!(lines[10], SIGNED_HEADERS);
        assert_eq!(lines[11], EMPTY_BODY_SHA256);
    }

    #[test]
    fn authorization_header_shape() {
        let provider = make_provider("LTAI5tMyTestKeyId", "secret");
        let auth = provider.sign("AddDomainRecord", "", "2024-01-01T00:00:00Z", "n-1");

        assert!(auth.starts_with("ACS3-HMAC-SHA256 Credential=LTAI5tMyTestKeyId,"));
        assert!(auth.contains(&format!("SignedHeaders={SIGNED_HEADERS},")));
        let signature = extract_signature(&auth);
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn signature_depends_on_query_and_secret() {
        let a = make_provider("key-id", "secret-one");
        let b = make_provider("key-id", "secret-two");
        let ts = "2024-01-01T00:00:00Z";

        let base = a.sign("DescribeDomainRecords", "DomainName=example.com", ts, "n");
        let again = a.sign("DescribeDomainRecords", "DomainName=example.com", ts, "n");
        let other_query = a.sign("DescribeDomainRecords", "DomainName=example.net", ts, "n");
        let other_secret = b.sign("DescribeDomainRecords", "DomainName=example.com", ts, "n");

        assert_eq!(base, again);
        assert_ne!(extract_signature(&base), extract_signature(&other_query));
        assert_ne!(extract_signature(&base), extract_signature(&other_secret));
    }

    #[test]
    fn signature_snapshot() {
        let provider = make_provider("LTAI5tTestKeyId", "TestSecretKey123456");
        let auth = provider.sign(
            "DescribeDomainRecords",
            "DomainName=example.com",
            "2024-01-15T08:00:00Z",
            "test-nonce-12345",
        );
        assert_eq!(extract_signature(&auth), SNAPSHOT_SIGNATURE);
    }

    /// Computed independently from the ACS3 algorithm for the inputs above.
    const SNAPSHOT_SIGNATURE: &str = "9c4173ede0946854e402679d086862a853ada5d1b83c34216ede75a499d50afd";
}

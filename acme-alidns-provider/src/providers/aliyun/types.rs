//! 阿里云 API 类型定义和辅助函数

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::error::{ProviderError, Result};

use super::PROVIDER_NAME;

// ============ RFC3986 URL 编码 ============

/// Percent-encode everything outside the RFC 3986 unreserved set.
pub fn url_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

/// Flatten a JSON value into `key -> value` pairs.
///
/// Nested objects join keys with `.`; arrays use 1-based indices; nulls are dropped.
pub fn flatten_value(prefix: &str, value: &serde_json::Value, out: &mut BTreeMap<String, String>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    };
    match value {
        serde_json::Value::Object(map) => {
            for (k, v) in map {
                flatten_value(&join(k), v, out);
            }
        }
        serde_json::Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                flatten_value(&join(&(i + 1).to_string()), v, out);
            }
        }
        serde_json::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        serde_json::Value::Number(n) => {
            out.insert(prefix.to_string(), n.to_string());
        }
        serde_json::Value::Bool(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        serde_json::Value::Null => {}
    }
}

/// Serialize request parameters into a canonical (key-sorted) query string.
pub fn serialize_to_query_string<T: Serialize>(params: &T) -> Result<String> {
    let value = serde_json::to_value(params).map_err(|e| ProviderError::SerializationError {
        provider: PROVIDER_NAME.to_string(),
        detail: e.to_string(),
    })?;

    let mut flat = BTreeMap::new();
    flatten_value("", &value, &mut flat);

    Ok(flat
        .iter()
        .map(|(k, v)| format!("{}={}", url_encode(k), url_encode(v)))
        .collect::<Vec<_>>()
        .join("&"))
}

// ============ 记录相关结构 ============

#[derive(Debug, Deserialize)]
pub struct DescribeDomainRecordsResponse {
    #[serde(rename = "DomainRecords")]
    pub domain_records: Option<DomainRecordsWrapper>,
    #[serde(rename = "TotalCount")]
    pub total_count: Option<u32>,
}

impl DescribeDomainRecordsResponse {
    pub fn into_records(self) -> Vec<AliyunRecord> {
        self.domain_records
            .and_then(|r| r.record)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct DomainRecordsWrapper {
    #[serde(rename = "Record")]
    pub record: Option<Vec<AliyunRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct AliyunRecord {
    #[serde(rename = "RecordId")]
    pub record_id: String,
    #[serde(rename = "RR")]
    pub rr: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
}

#[derive(Debug, Deserialize)]
pub struct AddDomainRecordResponse {
    #[serde(rename = "RecordId")]
    pub record_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteDomainRecordResponse {
    #[serde(rename = "RecordId")]
    pub record_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_encode_keeps_unreserved() {
        assert_eq!(url_encode("_acme-challenge.foo~1"), "_acme-challenge.foo~1");
    }

    #[test]
    fn url_encode_escapes_reserved_and_space() {
        assert_eq!(url_encode("a b"), "a%20b");
        assert_eq!(url_encode("/?&="), "%2F%3F%26%3D");
        assert_eq!(url_encode("tok+/="), "tok%2B%2F%3D");
    }

    #[test]
    fn url_encode_multibyte() {
        assert_eq!(url_encode("你好"), "%E4%BD%A0%E5%A5%BD");
    }

    #[test]
    fn flatten_nested_and_arrays() {
        let val = json!({"Tag": [{"Key": "k", "Value": "v"}], "Page": {"Size": 1}, "Skip": null});
        let mut map = BTreeMap::new();
        flatten_value("", &val, &mut map);
        assert_eq!(map.get("Tag.1.Key").map(String::as_str), Some("k"));
        assert_eq!(map.get("Tag.1.Value").map(String::as_str), Some("v"));
        assert_eq!(map.get("Page.Size").map(String::as_str), Some("1"));
        assert!(!map.contains_key("Skip"));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn query_string_sorted_and_encoded() {
        #[derive(Serialize)]
        struct Req {
            #[serde(rename = "Value")]
            value: String,
            #[serde(rename = "DomainName")]
            domain_name: String,
            #[serde(rename = "TTL")]
            ttl: u32,
        }
        let qs = serialize_to_query_string(&Req {
            value: "a b/c".to_string(),
            domain_name: "example.com".to_string(),
            ttl: 600,
        })
        .unwrap();
        assert_eq!(qs, "DomainName=example.com&TTL=600&Value=a%20b%2Fc");
    }

    #[test]
    fn describe_records_response_tolerates_missing_fields() {
        let empty: DescribeDomainRecordsResponse =
            serde_json::from_str(r#"{"RequestId":"x"}"#).unwrap();
        assert!(empty.into_records().is_empty());

        let full: DescribeDomainRecordsResponse = serde_json::from_value(json!({
            "TotalCount": 1,
            "DomainRecords": {"Record": [
                {"RecordId": "9", "RR": "_acme-challenge", "Type": "TXT", "Value": "tok", "TTL": 600}
            ]}
        }))
        .unwrap();
        assert_eq!(full.total_count, Some(1));
        let records = full.into_records();
        assert_eq!(records[0].record_id, "9");
        assert_eq!(records[0].rr, "_acme-challenge");
    }
}

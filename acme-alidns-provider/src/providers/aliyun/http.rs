//! Signed RPC calls against the Alidns API

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{ALIYUN_DNS_VERSION, AliyunProvider, EMPTY_BODY_SHA256, serialize_to_query_string};

impl AliyunProvider {
    /// Execute one API action. Parameters travel in the query string; the body is empty.
    ///
    /// Transient failures, including throttling codes in the response body, are
    /// retried up to `max_retries` times with a freshly signed request.
    pub(crate) async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        action: &str,
        params: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let query_string = serialize_to_query_string(params)?;
        let label = format!("{} (Action: {action})", self.base_url);

        let qs = query_string.as_str();
        let ctx = &ctx;
        let body = HttpUtils::with_retry(self.provider_name(), &label, self.max_retries, move || {
            self.send_once(action, qs, ctx)
        })
        .await?;

        HttpUtils::parse_json(&body, self.provider_name())
    }

    /// Sign and send a single request, returning the body of a successful answer.
    async fn send_once(
        &self,
        action: &str,
        query_string: &str,
        ctx: &ErrorContext,
    ) -> Result<String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let nonce = uuid::Uuid::new_v4().to_string();
        let authorization = self.sign(action, query_string, &timestamp, &nonce);

        let url = if query_string.is_empty() {
            format!("{}/", self.base_url)
        } else {
            format!("{}/?{query_string}", self.base_url)
        };

        let request = self
            .client
            .post(&url)
            .header("Host", &self.host)
            .header("x-acs-action", action)
            .header("x-acs-version", ALIYUN_DNS_VERSION)
            .header("x-acs-date", &timestamp)
            .header("x-acs-signature-nonce", &nonce)
            .header("x-acs-content-sha256", EMPTY_BODY_SHA256)
            .header("Authorization", authorization);

        let (status, body) =
            HttpUtils::execute_request(request, self.provider_name(), action).await?;

        // Alidns reports API errors as a JSON body carrying Code + Message,
        // usually with a 4xx status.
        if let Some(raw) = api_error(&body) {
            log::debug!(
                "[{}] {action} failed: {} - {}",
                self.provider_name(),
                raw.code.as_deref().unwrap_or_default(),
                raw.message
            );
            return Err(self.map_error(raw, ctx.clone()));
        }

        if status >= 400 {
            return Err(ProviderError::NetworkError {
                provider: self.provider_name().to_string(),
                detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
            });
        }

        Ok(body)
    }
}

fn api_error(body: &str) -> Option<RawApiError> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let code = value.get("Code")?.as_str()?;
    let message = value.get("Message")?.as_str()?;
    Some(RawApiError::with_code(code, message))
}

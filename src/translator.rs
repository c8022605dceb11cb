use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::sign::TranslationRequest;

pub const DEFAULT_ENDPOINT: &str = "https://fanyi-api.baidu.com/api/trans/vip/translate";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const FALLBACK_ERROR: &str = "translation failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationResult {
    Success { text: String },
    Failure { message: String },
}

impl TranslationResult {
    pub fn failure(message: impl Into<String>) -> Self {
        TranslationResult::Failure {
            message: message.into(),
        }
    }

    pub fn into_result(self) -> Result<String> {
        match self {
            TranslationResult::Success { text } => Ok(text),
            TranslationResult::Failure { message } => Err(Error::ProviderError(message)),
        }
    }
}

#[derive(Deserialize)]
struct TransItem {
    dst: String,
}

/// Maps a response body onto a result. Only `trans_result` decides success;
/// any other body is a failure carrying `error_msg` when it is a string.
pub fn normalize_response(body: &str) -> TranslationResult {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return TranslationResult::failure(format!("invalid response: {}", e)),
    };
    let Some(obj) = value.as_object() else {
        return TranslationResult::failure("invalid response: expected a JSON object");
    };

    if let Some(items) = obj.get("trans_result").filter(|v| !v.is_null()) {
        let items: Vec<TransItem> = match serde_json::from_value(items.clone()) {
            Ok(i) => i,
            Err(e) => return TranslationResult::failure(format!("invalid response: {}", e)),
        };
        let text = items
            .into_iter()
            .map(|item| item.dst)
            .collect::<Vec<_>>()
            .join("\n");
        return TranslationResult::Success { text };
    }

    let error_msg = obj.get("error_msg").and_then(serde_json::Value::as_str);
    if let Some(code) = obj.get("error_code") {
        tracing::warn!("Provider error {}: {:?}", code, error_msg);
    }
    TranslationResult::failure(error_msg.unwrap_or(FALLBACK_ERROR))
}

pub struct TranslationClient {
    client: reqwest::Client,
    endpoint: String,
}

impl TranslationClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("fanyi-desk/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::TransportFailure(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// One GET, no retries. Transport and provider errors both come back as
    /// `Failure`.
    pub async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
        let resp = match self.client.get(&self.endpoint).query(request).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("Translate request failed: {}", e);
                let message = if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    format!("request failed: {}", e)
                };
                return TranslationResult::failure(message);
            }
        };

        let status = resp.status();
        let body = match resp.text().await {
            Ok(b) => b,
            Err(e) => {
                tracing::error!("Failed to read response body: {}", e);
                return TranslationResult::failure(format!("failed to read response: {}", e));
            }
        };

        if !status.is_success() && serde_json::from_str::<serde_json::Value>(&body).is_err() {
            tracing::warn!("Translate endpoint returned HTTP {}", status);
            return TranslationResult::failure(format!("HTTP {}", status));
        }
        normalize_response(&body)
    }
}

//! Upstream KB-chat client.
//!
//! # Responsibilities
//! - Hold the pooled HTTP client with bearer auth and the answer budget
//! - Issue one chat call per webhook, no retries (the caller falls back)
//! - Summarize every attempt as an `UpstreamOutcome` for `/diag`
//!
//! # Design Decisions
//! - The call timeout equals the synchronous answer budget; a slow upstream
//!   is indistinguishable from a down one and both end in the fallback text
//! - Missing credentials short-circuit locally instead of burning the budget

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Serialize;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::upstream::reply::extract_reply;

/// Body key the v2 endpoint expects; fixed, not configurable.
pub const BODY_KEY: &str = "message";

/// Maximum characters of upstream body kept in diagnostics.
const SNIPPET_CHARS: usize = 200;

/// Request body for the v2 chat endpoint.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    ai_model_id: u64,
}

/// Summary of one upstream attempt, kept for `/diag`.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamOutcome {
    pub ok: bool,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UpstreamOutcome {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            status: 0,
            url: None,
            body_snippet: None,
            error: Some(error.into()),
        }
    }

    fn http(ok: bool, status: u16, url: &str, snippet: &str) -> Self {
        Self {
            ok,
            status,
            url: Some(url.to_string()),
            body_snippet: Some(snippet.to_string()),
            error: None,
        }
    }
}

/// Result of one `ask` call: the reply to render, if any, plus the outcome
/// to publish in diagnostics.
#[derive(Debug)]
pub struct AskResult {
    pub reply: Option<String>,
    pub outcome: UpstreamOutcome,
}

impl AskResult {
    fn failed(outcome: UpstreamOutcome) -> Self {
        Self {
            reply: None,
            outcome,
        }
    }
}

/// Client for the upstream knowledge-base chat API.
pub struct ChatClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl ChatClient {
    /// Build the client with pooled connections, bearer auth, and the
    /// configured answer budget as the request timeout.
    pub fn new(config: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        if !config.api_key.is_empty() {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", config.api_key)) {
                headers.insert(AUTHORIZATION, value);
            }
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs_f64(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self { http, config })
    }

    /// Answer budget in seconds, surfaced by `/diag`.
    pub fn budget_secs(&self) -> f64 {
        self.config.timeout_secs
    }

    /// Send one utterance upstream and interpret the response.
    ///
    /// Never returns an error: failure modes collapse into `reply: None`
    /// with the reason captured in the outcome, matching the webhook's
    /// degrade-to-fallback contract.
    pub async fn ask(&self, message: &str) -> AskResult {
        if self.config.api_key.is_empty() {
            return AskResult::failed(UpstreamOutcome::failure("no_api_key"));
        }
        let Some(model_id) = self.config.model_id else {
            return AskResult::failed(UpstreamOutcome::failure("no_model_id"));
        };

        let body = ChatRequest {
            message,
            ai_model_id: model_id,
        };

        let response = match self.http.post(&self.config.url).json(&body).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                tracing::warn!(url = %self.config.url, "Upstream call timed out");
                return AskResult::failed(UpstreamOutcome::failure("timeout"));
            }
            Err(e) => {
                tracing::warn!(url = %self.config.url, error = %e, "Upstream call failed");
                return AskResult::failed(UpstreamOutcome::failure(e.to_string()));
            }
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let snippet = snippet(&text);
        let outcome =
            UpstreamOutcome::http(status.is_success(), status.as_u16(), &self.config.url, &snippet);

        if !status.is_success() {
            tracing::warn!(status = %status, body = %snippet, "Upstream returned non-2xx");
            return AskResult::failed(outcome);
        }

        // Not JSON at all: surface the raw snippet as the reply.
        let reply = match serde_json::from_str::<Value>(&text) {
            Ok(value) => extract_reply(&value).unwrap_or_else(|| snippet.clone()),
            Err(_) => snippet.clone(),
        };

        let reply = if reply.is_empty() { None } else { Some(reply) };
        AskResult { reply, outcome }
    }
}

/// Truncate a body for diagnostics, counting characters rather than bytes
/// so multi-byte Korean text never splits mid-character.
fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_uses_v2_field_names() {
        let body = ChatRequest {
            message: "질문",
            ai_model_id: 9,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json[BODY_KEY], "질문");
        assert_eq!(json["ai_model_id"], 9);
    }

    #[test]
    fn snippet_counts_characters_not_bytes() {
        let korean = "가".repeat(300);
        let cut = snippet(&korean);
        assert_eq!(cut.chars().count(), 200);
        assert!(cut.chars().all(|c| c == '가'));
    }

    #[test]
    fn snippet_keeps_short_bodies_whole() {
        assert_eq!(snippet("ok"), "ok");
    }

    #[tokio::test]
    async fn missing_api_key_short_circuits() {
        let client = ChatClient::new(UpstreamConfig::default()).unwrap();
        let result = client.ask("hello").await;
        assert!(result.reply.is_none());
        assert_eq!(result.outcome.error.as_deref(), Some("no_api_key"));
        assert_eq!(result.outcome.status, 0);
    }

    #[tokio::test]
    async fn missing_model_id_short_circuits() {
        let config = UpstreamConfig {
            api_key: "k".to_string(),
            ..UpstreamConfig::default()
        };
        let client = ChatClient::new(config).unwrap();
        let result = client.ask("hello").await;
        assert!(result.reply.is_none());
        assert_eq!(result.outcome.error.as_deref(), Some("no_model_id"));
    }
}

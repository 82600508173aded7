//! Route handlers for the skill gateway.

use std::collections::HashMap;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::http::kakao::{self, SkillPayload, SkillResponse};
use crate::http::server::AppState;
use crate::observability::{metrics, WebhookTrace};
use crate::upstream::BODY_KEY;

/// Reply when the payload carries no utterance.
const EMPTY_PROMPT: &str = "질문을 입력해 주세요 🙂";

/// Reply when the upstream call fails or exceeds the answer budget. Still
/// HTTP 200: the Kakao platform treats non-200 as a skill outage.
const BUSY_FALLBACK: &str = "지금은 답변 서버가 혼잡해요. 잠시 뒤에 다시 시도해 주세요.";

/// Liveness probe, also mounted at `/`.
pub async fn healthz() -> &'static str {
    "ok"
}

/// Diagnostic snapshot: effective upstream settings plus the most recent
/// webhook trace and upstream outcome. `?pretty=1` indents the JSON.
pub async fn diag(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let upstream = &state.config.upstream;
    let payload = json!({
        "api_key_set": !upstream.api_key.is_empty(),
        "chatling_url": upstream.url,
        "model_id": upstream.model_id,
        "body_key": BODY_KEY,
        "sync_budget_s": state.client.budget_secs(),
        "last_chatling": state.diag.last_upstream(),
        "last_request": state.diag.last_request(),
    });

    if params.contains_key("pretty") {
        let body = serde_json::to_string_pretty(&payload).unwrap_or_default();
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    } else {
        Json(payload).into_response()
    }
}

/// Kakao skill webhook.
///
/// Parses the payload leniently, forwards the utterance upstream, and always
/// answers 200 with a simpleText template: a reply when upstream delivered
/// one, a fixed fallback otherwise.
pub async fn webhook(State(state): State<AppState>, body: Bytes) -> Json<SkillResponse> {
    let start = Instant::now();

    // Malformed JSON is treated as an empty payload, not a client error.
    let payload: SkillPayload = serde_json::from_slice(&body).unwrap_or_default();
    let utterance = payload.utterance();

    state.diag.record_request(WebhookTrace {
        utter: utterance.text.clone(),
        source: utterance.source,
        raw_usrtext: payload.usrtext().map(str::to_string),
        raw_utterance: payload.raw_utterance().map(str::to_string),
        ts: Utc::now(),
    });

    tracing::info!(utterance = %utterance.text, source = utterance.source, "Webhook received");

    if utterance.text.is_empty() {
        metrics::record_webhook("empty", start);
        return Json(kakao::simple_text(EMPTY_PROMPT));
    }

    let result = state.client.ask(&utterance.text).await;
    metrics::record_upstream(result.outcome.ok, result.outcome.status);
    state.diag.record_upstream(result.outcome);

    match result.reply {
        Some(reply) => {
            metrics::record_webhook("answered", start);
            Json(kakao::simple_text(reply))
        }
        None => {
            metrics::record_webhook("fallback", start);
            Json(kakao::simple_text(BUSY_FALLBACK))
        }
    }
}

//! Diagnostic snapshots for the `/diag` endpoint.
//!
//! The gateway keeps the most recent webhook trace and upstream outcome so
//! an operator can see what the service last did without log access. Lossy
//! by design: only the latest entry of each kind is retained.

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::upstream::UpstreamOutcome;

/// Trace of the most recent webhook invocation.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookTrace {
    /// Utterance after source selection and trimming.
    pub utter: String,

    /// Which payload field supplied the utterance.
    pub source: &'static str,

    /// Raw `action.params.usrtext` value, if present.
    pub raw_usrtext: Option<String>,

    /// Raw `userRequest.utterance` value, if present.
    pub raw_utterance: Option<String>,

    /// When the webhook fired.
    pub ts: DateTime<Utc>,
}

/// Lock-free holder for the latest diagnostic entries.
///
/// Webhook handlers publish with a single atomic swap; `/diag` reads a
/// consistent snapshot without blocking request traffic.
#[derive(Default)]
pub struct DiagState {
    last_request: ArcSwapOption<WebhookTrace>,
    last_upstream: ArcSwapOption<UpstreamOutcome>,
}

impl DiagState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self, trace: WebhookTrace) {
        self.last_request.store(Some(Arc::new(trace)));
    }

    pub fn record_upstream(&self, outcome: UpstreamOutcome) {
        self.last_upstream.store(Some(Arc::new(outcome)));
    }

    pub fn last_request(&self) -> Option<WebhookTrace> {
        self.last_request.load_full().map(|t| (*t).clone())
    }

    pub fn last_upstream(&self) -> Option<UpstreamOutcome> {
        self.last_upstream.load_full().map(|o| (*o).clone())
    }
}

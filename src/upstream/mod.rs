//! Upstream integration: the knowledge-base chat API the webhook forwards
//! utterances to.

pub mod client;
pub mod reply;

pub use client::{AskResult, ChatClient, UpstreamOutcome, BODY_KEY};

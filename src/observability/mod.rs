//! Observability: logging, metrics, and the diagnostic snapshot state
//! behind `/diag`.

pub mod diag;
pub mod logging;
pub mod metrics;

pub use diag::{DiagState, WebhookTrace};

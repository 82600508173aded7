//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, worker counts non-zero)
//! - Check the upstream URL parses as http(s)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: BridgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use url::Url;

use crate::config::schema::BridgeConfig;

/// A single semantic configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn error(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validate a parsed configuration, collecting every violation.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(error("listener.host", "must not be empty"));
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(error("listener.max_body_bytes", "must be greater than zero"));
    }

    match Url::parse(&config.upstream.url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(error(
            "upstream.url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(error("upstream.url", format!("invalid URL: {}", e))),
    }
    if !config.upstream.timeout_secs.is_finite() || config.upstream.timeout_secs <= 0.0 {
        errors.push(error("upstream.timeout_secs", "must be a positive number"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(error("timeouts.request_secs", "must be greater than zero"));
    }

    if config.manager.program.trim().is_empty() {
        errors.push(error("manager.program", "must not be empty"));
    }
    if config.manager.app_ref.trim().is_empty() {
        errors.push(error("manager.app_ref", "must not be empty"));
    }
    if config.manager.workers == 0 {
        errors.push(error("manager.workers", "must be at least 1"));
    }
    if config.manager.threads == 0 {
        errors.push(error("manager.threads", "must be at least 1"));
    }

    if config.static_files.root.trim().is_empty() {
        errors.push(error("static_files.root", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

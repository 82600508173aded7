//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bridge.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the skill gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Listener configuration (bind host, port, body limits).
    pub listener: ListenerConfig,

    /// Upstream knowledge-base chat API settings.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// External application-server delegation settings.
    pub manager: ManagerConfig,

    /// Static file serving settings.
    pub static_files: StaticConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind. All variants listen on every interface.
    pub host: String,

    /// TCP port. When absent the launch policy decides: the embedded
    /// gateway and the static server fall back to 8080, delegation to the
    /// external manager requires an explicit port.
    pub port: Option<u16>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: None,
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Upstream KB-chat API configuration.
///
/// The webhook must answer inside the Kakao platform's 5-second window, so
/// the upstream timeout doubles as the synchronous answer budget.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Chat endpoint URL.
    pub url: String,

    /// Bearer token for the upstream API. Empty means unauthenticated;
    /// the client refuses to call upstream without it.
    pub api_key: String,

    /// Numeric model id required by the v2 chat endpoint.
    pub model_id: Option<u64>,

    /// Synchronous budget for one upstream call, in seconds.
    pub timeout_secs: f64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "https://api.chatling.ai/v2/chatbots/9226872959/ai/kb/chat".to_string(),
            api_key: String::new(),
            model_id: None,
            timeout_secs: 4.2,
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Drain window for in-flight requests after a stop signal, in seconds.
    pub graceful_secs: u64,

    /// Idle keep-alive for established connections, in seconds. Handed to
    /// the delegated application server; the static variant ignores it.
    pub keep_alive_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            graceful_secs: 10,
            keep_alive_secs: 65,
        }
    }
}

/// Settings for delegating to an external WSGI-compatible process manager.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Process-manager executable.
    pub program: String,

    /// Application object reference handed to the manager (module:callable).
    pub app_ref: String,

    /// Worker process count.
    pub workers: u32,

    /// Threads per worker.
    pub threads: u32,

    /// Extra arguments appended verbatim before the application reference.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            program: "gunicorn".to_string(),
            app_ref: "app:app".to_string(),
            workers: 1,
            threads: 2,
            extra_args: Vec::new(),
        }
    }
}

/// Static file serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Directory to expose. Defaults to the working directory.
    pub root: String,

    /// Render an HTML listing for directory paths.
    pub listing: bool,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            listing: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

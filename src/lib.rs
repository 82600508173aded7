//! Kakao Skill Gateway
//!
//! A webhook bridge between the Kakao skill platform and an upstream
//! knowledge-base chat API, built with Tokio and Axum, plus the process
//! launcher it deploys behind.
//!
//! # Architecture Overview
//!
//! ```text
//!   Kakao platform                 ┌───────────────────────────────────┐
//!   ──POST /webhook───────────────▶│  http      │  upstream            │
//!                                  │  handlers  │──▶ KB-chat client ───┼──▶ Chat API
//!   ◀──simpleText (or fallback)────│            │◀── reply / outcome   │
//!                                  ├───────────────────────────────────┤
//!                                  │ cross-cutting: config · lifecycle │
//!                                  │ observability (logs/metrics/diag) │
//!                                  └───────────────────────────────────┘
//!
//!   launcher: serve (gateway) | exec (delegate) | static (file server)
//! ```
//!
//! The webhook always answers inside the platform's synchronous window:
//! upstream failure degrades to a fixed fallback text, never to an error
//! status.

// Core subsystems
pub mod config;
pub mod http;
pub mod launcher;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::BridgeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

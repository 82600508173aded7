//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overlay: CHATLING_*)
//!     → validation.rs (semantic checks)
//!     → BridgeConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so a bare environment-driven deployment works
//! - Validation separates syntactic (serde) from semantic checks
//! - `PORT` is deliberately not part of the overlay: each launch variant
//!   applies its own port policy (see the launcher module)

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::BridgeConfig;
pub use schema::ListenerConfig;
pub use schema::ManagerConfig;
pub use schema::ObservabilityConfig;
pub use schema::StaticConfig;
pub use schema::TimeoutConfig;
pub use schema::UpstreamConfig;

//! Process launcher: variant selection and port policy.
//!
//! One invocation starts exactly one long-running process:
//! - `serve`  — the embedded skill gateway (port falls back to 8080)
//! - `exec`   — delegation to an external application server (port required)
//! - `static` — the working-directory file server (port falls back to 8080)
//!
//! # Design Decisions
//! - `$PORT` wins over the config-file port; the policy default applies
//!   only when neither is present
//! - An unparsable port is a fatal startup error in every variant
//! - No restart or supervision logic lives here; that belongs to the
//!   surrounding orchestration layer

pub mod manager;
pub mod static_files;

use thiserror::Error;

/// Fallback port for the variants that tolerate an unset `$PORT`.
pub const DEFAULT_PORT: u16 = 8080;

/// Error type for launch operations.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("PORT is not set and this launch variant has no default")]
    PortMissing,

    #[error("invalid port value '{0}': expected an integer in 0..=65535")]
    PortInvalid(String),

    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// How a variant treats an absent port.
#[derive(Debug, Clone, Copy)]
pub enum PortPolicy {
    /// Missing port is a fatal startup error.
    Required,
    /// Missing port falls back to the given default.
    Fallback(u16),
}

/// Resolve the bind port from `$PORT`, the config file, and the policy.
pub fn resolve_port(file_port: Option<u16>, policy: PortPolicy) -> Result<u16, LaunchError> {
    resolve_port_from(std::env::var("PORT").ok(), file_port, policy)
}

/// Port resolution with an injectable environment value.
pub fn resolve_port_from(
    env_port: Option<String>,
    file_port: Option<u16>,
    policy: PortPolicy,
) -> Result<u16, LaunchError> {
    if let Some(raw) = env_port {
        let raw = raw.trim();
        if !raw.is_empty() {
            return raw
                .parse::<u16>()
                .map_err(|_| LaunchError::PortInvalid(raw.to_string()));
        }
    }

    if let Some(port) = file_port {
        return Ok(port);
    }

    match policy {
        PortPolicy::Required => Err(LaunchError::PortMissing),
        PortPolicy::Fallback(port) => Ok(port),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_wins_over_file_value() {
        let port =
            resolve_port_from(Some("9001".into()), Some(8081), PortPolicy::Required).unwrap();
        assert_eq!(port, 9001);
    }

    #[test]
    fn file_value_wins_over_fallback() {
        let port = resolve_port_from(None, Some(8081), PortPolicy::Fallback(DEFAULT_PORT)).unwrap();
        assert_eq!(port, 8081);
    }

    #[test]
    fn fallback_applies_when_nothing_is_set() {
        let port = resolve_port_from(None, None, PortPolicy::Fallback(DEFAULT_PORT)).unwrap();
        assert_eq!(port, DEFAULT_PORT);
    }

    #[test]
    fn required_policy_rejects_unset_port() {
        let err = resolve_port_from(None, None, PortPolicy::Required).unwrap_err();
        assert!(matches!(err, LaunchError::PortMissing));
    }

    #[test]
    fn empty_env_value_counts_as_unset() {
        let err = resolve_port_from(Some("  ".into()), None, PortPolicy::Required).unwrap_err();
        assert!(matches!(err, LaunchError::PortMissing));
    }

    #[test]
    fn unparsable_port_is_fatal_in_every_variant() {
        for policy in [PortPolicy::Required, PortPolicy::Fallback(DEFAULT_PORT)] {
            let err = resolve_port_from(Some("80800".into()), None, policy).unwrap_err();
            assert!(matches!(err, LaunchError::PortInvalid(_)));
        }
    }

    #[test]
    fn port_zero_is_accepted() {
        let port = resolve_port_from(Some("0".into()), None, PortPolicy::Required).unwrap();
        assert_eq!(port, 0);
    }
}

//! Failure policy for generative call sites.
//!
//! Each call site carries an explicit policy value instead of ad hoc
//! exception handling, so the severity ordering — which failures a user
//! sees and which are silently substituted — is auditable data. The policy
//! constants live next to their call sites in [`crate::content`].

use crate::error::{GatewayError, Result};

/// What to do when a generative call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Surface the error to the caller.
    Propagate,

    /// Substitute a sentinel for the failing item only; other items in the
    /// same batch are unaffected.
    ItemSentinel,

    /// Substitute a fixed built-in result for the whole call; nothing
    /// surfaces as an error.
    BuiltinDefault,
}

impl FallbackPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Propagate => "propagate",
            Self::ItemSentinel => "item-sentinel",
            Self::BuiltinDefault => "builtin-default",
        }
    }

    /// Apply this policy to a failed call.
    ///
    /// Returns the site's substitute value when the policy permits one, or
    /// hands the error back for propagation. Substitutions are logged —
    /// they are the only silently absorbed failures in the system.
    pub fn absorb<T>(
        self,
        site: &'static str,
        err: GatewayError,
        substitute: impl FnOnce() -> T,
    ) -> Result<T> {
        match self {
            Self::Propagate => Err(err),
            Self::ItemSentinel | Self::BuiltinDefault => {
                tracing::warn!(site, policy = self.as_str(), error = %err, "generative call failed, substituting fallback value");
                Ok(substitute())
            }
        }
    }
}

impl std::fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fail() -> GatewayError {
        GatewayError::Generation("boom".to_string())
    }

    #[test]
    fn test_propagate_returns_the_error() {
        let result = FallbackPolicy::Propagate.absorb("site", fail(), || 42);
        assert!(matches!(result, Err(GatewayError::Generation(_))));
    }

    #[test]
    fn test_sentinel_and_default_substitute() {
        assert_eq!(
            FallbackPolicy::ItemSentinel
                .absorb("site", fail(), || "sentinel")
                .unwrap(),
            "sentinel"
        );
        assert_eq!(
            FallbackPolicy::BuiltinDefault
                .absorb("site", fail(), || "default")
                .unwrap(),
            "default"
        );
    }
}

//! Issuer configuration.
//!
//! The application ID and shared secret are externally supplied (CLI flags
//! or environment), never compiled-in literals.

/// Configuration for the token issuance endpoint.
#[derive(Clone)]
pub struct IssuerConfig {
    /// Application the issued tokens are scoped to
    pub app_id: i64,
    /// Shared secret; 64 hex characters or a literal passphrase
    pub secret: String,
    /// Lifetime of issued tokens in seconds
    pub ttl_seconds: i64,
}

impl std::fmt::Debug for IssuerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never log the shared secret
        f.debug_struct("IssuerConfig")
            .field("app_id", &self.app_id)
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret() {
        let config = IssuerConfig {
            app_id: 1,
            secret: "0b0859483bba588d97ed478e8b69da06".to_string(),
            ttl_seconds: 3600,
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("0b0859"));
        assert!(debug.contains("<redacted>"));
    }
}

//! Service configuration.
//!
//! Populated from environment variables with documented fallbacks, so a bare
//! process starts with workable defaults. Secrets (chain private key,
//! session secret) default to empty and must be provided by the deployment.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Top-level configuration for an OpenSettle service process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Host the service advertises to clients.
    pub public_host: String,
    /// Port the transport boundary listens on.
    pub port: u16,
    /// External issuance ledger settings.
    pub chain: ChainConfig,
    /// Settings handed to the identity collaborator.
    pub session: SessionConfig,
}

/// Connection settings for the external issuance ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// RPC endpoint of the chain node.
    pub rpc_url: String,
    /// Hex-encoded private key of the deploying account.
    pub private_key: String,
    /// Address receiving platform-side transfers.
    pub platform_address: String,
}

/// Settings for the session/identity collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Signing secret for bearer credentials.
    pub secret: String,
    /// Credential lifetime in seconds.
    pub ttl_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            public_host: constants::DEFAULT_PUBLIC_HOST.to_string(),
            port: constants::DEFAULT_API_PORT,
            chain: ChainConfig {
                rpc_url: constants::DEFAULT_CHAIN_RPC.to_string(),
                private_key: String::new(),
                platform_address: String::new(),
            },
            session: SessionConfig {
                secret: String::new(),
                ttl_secs: constants::DEFAULT_SESSION_TTL_SECS,
            },
        }
    }
}

impl ServiceConfig {
    /// Build a configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Missing keys fall back to defaults; unparseable numeric values fall
    /// back as well rather than failing startup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            public_host: get("PUBLIC_HOST").unwrap_or(defaults.public_host),
            port: get("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            chain: ChainConfig {
                rpc_url: get("CHAIN_RPC").unwrap_or(defaults.chain.rpc_url),
                private_key: get("CHAIN_PK").unwrap_or(defaults.chain.private_key),
                platform_address: get("PLATFORM_ADDR").unwrap_or(defaults.chain.platform_address),
            },
            session: SessionConfig {
                secret: get("SESSION_SECRET").unwrap_or(defaults.session.secret),
                ttl_secs: get("SESSION_TTL")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.session.ttl_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_workable() {
        let cfg = ServiceConfig::default();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.public_host, "http://localhost");
        assert!(cfg.chain.private_key.is_empty());
        assert_eq!(cfg.session.ttl_secs, 86_400);
    }

    #[test]
    fn lookup_overrides_defaults() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PUBLIC_HOST", "https://settle.example"),
            ("PORT", "9090"),
            ("CHAIN_RPC", "https://rpc.example"),
            ("SESSION_TTL", "600"),
        ]);
        let cfg = ServiceConfig::from_lookup(|k| env.get(k).map(ToString::to_string));
        assert_eq!(cfg.public_host, "https://settle.example");
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.chain.rpc_url, "https://rpc.example");
        assert_eq!(cfg.session.ttl_secs, 600);
    }

    #[test]
    fn unparseable_numbers_fall_back() {
        let env: HashMap<&str, &str> = HashMap::from([("PORT", "not-a-port")]);
        let cfg = ServiceConfig::from_lookup(|k| env.get(k).map(ToString::to_string));
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = ServiceConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ServiceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.port, cfg.port);
        assert_eq!(back.chain.rpc_url, cfg.chain.rpc_url);
    }
}

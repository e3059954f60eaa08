//! System-wide constants for the OpenSettle settlement core.

/// Maximum length of a token symbol.
pub const MAX_SYMBOL_LEN: usize = 10;

/// Default API listen port.
pub const DEFAULT_API_PORT: u16 = 8080;

/// Default public host the service advertises.
pub const DEFAULT_PUBLIC_HOST: &str = "http://localhost";

/// Default RPC endpoint of the external issuance ledger.
pub const DEFAULT_CHAIN_RPC: &str = "https://rpc.sepolia.linea.build";

/// Default session lifetime in seconds (one day).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60 * 24;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenSettle";

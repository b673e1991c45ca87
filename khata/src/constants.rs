//! Environment variable names consumed by [`Config::from_env`](crate::Config::from_env).

/// Base URL of the ledger service, e.g. `https://api.example.com/v1`.
pub const KHATA_API_URL: &str = "KHATA_API_URL";
/// Client key, sent as the `x-api-key` header.
pub const KHATA_CLIENT_KEY: &str = "KHATA_CLIENT_KEY";
/// Secret key used to sign request envelopes.
pub const KHATA_SECRET_KEY: &str = "KHATA_SECRET_KEY";
/// Namespace the credential is registered under.
pub const KHATA_NAMESPACE: &str = "KHATA_NAMESPACE";
/// Per-call HTTP timeout in seconds; defaults to 15 when unset.
pub const KHATA_TIMEOUT_SECS: &str = "KHATA_TIMEOUT_SECS";

use crate::constants::*;
use khata_core::utils::Redact;
use khata_core::{Context, Credential, Error, Result};
use khata_http_send_reqwest::DEFAULT_TIMEOUT;
use std::fmt::{Debug, Formatter};
use std::time::Duration;

/// Config for the khata client.
///
/// All fields are optional so partial sources can be layered; the config
/// is validated when the [`Client`](crate::Client) is constructed.
#[derive(Clone, Default)]
pub struct Config {
    /// Base URL of the ledger service.
    pub base_url: Option<String>,
    /// Client key, sent as the `x-api-key` header on every request.
    pub client_key: Option<String>,
    /// Secret key used as the HMAC key when signing envelopes.
    pub secret_key: Option<String>,
    /// Namespace the credential is registered under.
    pub namespace: Option<String>,
    /// Per-call HTTP timeout; defaults to 15 seconds.
    pub timeout: Option<Duration>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("client_key", &Redact::from(&self.client_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("namespace", &self.namespace)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Load config from environment variables.
    pub fn from_env(ctx: &Context) -> Self {
        Self {
            base_url: ctx.env_var(KHATA_API_URL),
            client_key: ctx.env_var(KHATA_CLIENT_KEY),
            secret_key: ctx.env_var(KHATA_SECRET_KEY),
            namespace: ctx.env_var(KHATA_NAMESPACE),
            timeout: ctx
                .env_var(KHATA_TIMEOUT_SECS)
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs),
        }
    }

    /// Build the credential this config describes.
    pub fn credential(&self) -> Result<Credential> {
        let client_key = self
            .client_key
            .clone()
            .ok_or_else(|| Error::config_invalid("client key is required"))?;
        let secret_key = self
            .secret_key
            .clone()
            .ok_or_else(|| Error::config_invalid("secret key is required"))?;
        let namespace = self
            .namespace
            .clone()
            .ok_or_else(|| Error::config_invalid("namespace is required"))?;

        let cred = Credential::new(client_key, secret_key, namespace);
        if !cred.is_valid() {
            return Err(Error::config_invalid("credential fields must be non-empty"));
        }
        Ok(cred)
    }

    /// The effective per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }
}

use crate::utils::Redact;
use std::fmt::{Debug, Formatter};

/// Credential holds the key material every request to the ledger service
/// is authenticated with.
///
/// It is immutable after construction and shared read-only by all resource
/// services. The secret key never leaves the process except as an HMAC
/// key: it is excluded from `Debug` output and the type deliberately does
/// not implement `Serialize`.
#[derive(Default, Clone)]
pub struct Credential {
    /// Client key, sent as the `x-api-key` header on every request.
    pub client_key: String,
    /// Secret key used as the HMAC-SHA256 key when signing envelopes.
    pub secret_key: String,
    /// Namespace the credential is registered under, sent as the
    /// `namespace` header on every request.
    pub namespace: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(
        client_key: impl Into<String>,
        secret_key: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            client_key: client_key.into(),
            secret_key: secret_key.into(),
            namespace: namespace.into(),
        }
    }

    /// Check if the credential is complete.
    pub fn is_valid(&self) -> bool {
        !self.client_key.is_empty() && !self.secret_key.is_empty() && !self.namespace.is_empty()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("client_key", &Redact::from(&self.client_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("namespace", &self.namespace)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_keys() {
        let cred = Credential::new("ck_live_0123456789", "sk_live_0123456789", "acme");
        let out = format!("{cred:?}");
        assert!(!out.contains("sk_live_0123456789"));
        assert!(!out.contains("ck_live_0123456789"));
        assert!(out.contains("acme"));
    }

    #[test]
    fn test_is_valid() {
        assert!(Credential::new("ck", "sk", "ns").is_valid());
        assert!(!Credential::new("ck", "", "ns").is_valid());
        assert!(!Credential::default().is_valid());
    }
}

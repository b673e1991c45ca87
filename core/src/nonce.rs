use rand::RngCore;
use std::fmt::Debug;

/// NonceSource yields the `nonce` protocol field.
///
/// A nonce must be used at most once per signature: reuse within the
/// server's acceptance window is indistinguishable from a replay attack.
/// Sources must therefore be collision-resistant under concurrent callers.
/// Uniqueness, not ordering, is the contract.
pub trait NonceSource: Debug + Send + Sync + 'static {
    /// Produce a nonce for one request.
    fn generate(&self) -> String;
}

/// RandomNonce draws a 128-bit random token per request.
///
/// No shared state is involved, so concurrent callers cannot collide by
/// construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn generate(&self) -> String {
        let mut buf = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut buf);
        hex::encode(buf)
    }
}

/// FixedNonce always returns the same token.
///
/// # Note
///
/// Reusing a nonce violates the protocol.
/// Only use this type for testing.
#[derive(Debug, Clone)]
pub struct FixedNonce(pub String);

impl FixedNonce {
    /// Create a fixed nonce source from any string-ish token.
    pub fn new(nonce: impl Into<String>) -> Self {
        Self(nonce.into())
    }
}

impl NonceSource for FixedNonce {
    fn generate(&self) -> String {
        self.0.clone()
    }
}

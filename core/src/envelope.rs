use crate::hash::{base64_encode, hex_hmac_sha256};
use crate::nonce::{NonceSource, RandomNonce};
use crate::time::{Clock, SystemClock};
use crate::{Credential, Error, Result};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::fmt::Debug;
use std::sync::Arc;

/// Header carrying the client key.
pub const HEADER_API_KEY: &str = "x-api-key";
/// Header carrying the namespace the credential is registered under.
pub const HEADER_NAMESPACE: &str = "namespace";
/// Header carrying the nonce, byte-identical to the body's `nonce` field.
pub const HEADER_NONCE: &str = "x-nonce";
/// Header carrying the timestamp, byte-identical to the body's `timestamp`
/// field.
pub const HEADER_TIMESTAMP: &str = "x-timestamp";

const FIELD_TIMESTAMP: &str = "timestamp";
const FIELD_NONCE: &str = "nonce";
const FIELD_SIGNATURE: &str = "signature";

/// The signed request envelope: the request body plus the headers that must
/// accompany it.
///
/// The server re-derives the signature from the body and cross-checks the
/// nonce/timestamp headers for replay detection, so the header values here
/// are the exact string forms of the values folded into the signature.
#[derive(Debug, Clone)]
pub struct SignedEnvelope {
    /// The final JSON body: caller payload fields merged with `timestamp`,
    /// `nonce` and `signature`.
    pub body: Bytes,
    /// All headers required on the signed call.
    pub headers: HeaderMap,
    /// The timestamp folded into the signature, in milliseconds.
    pub timestamp: i64,
    /// The nonce folded into the signature.
    pub nonce: String,
    /// The lowercase hex HMAC-SHA256 signature.
    pub signature: String,
}

/// EnvelopeSigner builds tamper-evident, replay-resistant request
/// envelopes.
///
/// Signing is a pure function of (payload, clock, nonce source, secret
/// key): it never mutates shared state, and neither the secret key nor the
/// signature's preimage is ever logged.
///
/// The signature is computed over the base64 encoding of the JSON-serialized
/// payload *before* the signature field is added. `serde_json::Map` keeps
/// its keys ordered, so the merged payload is frozen once and round-trips
/// byte-identically between hashing and transmission.
#[derive(Clone, Debug)]
pub struct EnvelopeSigner {
    clock: Arc<dyn Clock>,
    nonce: Arc<dyn NonceSource>,
}

impl Default for EnvelopeSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvelopeSigner {
    /// Create a signer backed by the wall clock and a random nonce source.
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            nonce: Arc::new(RandomNonce),
        }
    }

    /// Replace the clock implementation.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only replace the clock for testing.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the nonce source implementation.
    pub fn with_nonce_source(mut self, nonce: impl NonceSource) -> Self {
        self.nonce = Arc::new(nonce);
        self
    }

    /// Build a signed envelope over `payload`.
    ///
    /// `payload` may be `None` for effectively bodyless calls such as
    /// activate/deactivate; the protocol still requires the timestamp,
    /// nonce and signature fields, so the body is never empty.
    pub fn sign(
        &self,
        cred: &Credential,
        payload: Option<&Map<String, Value>>,
    ) -> Result<SignedEnvelope> {
        let timestamp = self.clock.now_millis();
        let nonce = self.nonce.generate();

        // Flat merge; protocol fields take precedence over same-named
        // caller fields.
        let mut merged = payload.cloned().unwrap_or_default();
        for field in [FIELD_TIMESTAMP, FIELD_NONCE, FIELD_SIGNATURE] {
            if merged.contains_key(field) {
                warn!("payload field {field} collides with a protocol field and is replaced");
            }
        }
        merged.insert(FIELD_TIMESTAMP.to_string(), Value::from(timestamp));
        merged.insert(FIELD_NONCE.to_string(), Value::from(nonce.clone()));
        merged.remove(FIELD_SIGNATURE);

        let unsigned = serde_json::to_vec(&merged)
            .map_err(|e| Error::payload_invalid("payload is not serializable").with_source(e))?;
        let encoded = base64_encode(&unsigned);
        let signature = hex_hmac_sha256(cred.secret_key.as_bytes(), encoded.as_bytes());

        merged.insert(FIELD_SIGNATURE.to_string(), Value::from(signature.clone()));
        let body = serde_json::to_vec(&merged)
            .map_err(|e| Error::payload_invalid("payload is not serializable").with_source(e))?;

        let mut headers = base_headers(cred)?;
        headers.insert(HEADER_NONCE, HeaderValue::from_str(&nonce)?);
        headers.insert(HEADER_TIMESTAMP, HeaderValue::from_str(&timestamp.to_string())?);

        debug!("signed envelope with timestamp {timestamp}");

        Ok(SignedEnvelope {
            body: Bytes::from(body),
            headers,
            timestamp,
            nonce,
            signature,
        })
    }
}

/// Headers required on every call, signed or not: the content type, the
/// client key and the namespace.
pub fn base_headers(cred: &Credential) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(HEADER_API_KEY, HeaderValue::from_str(&cred.client_key)?);
    headers.insert(HEADER_NAMESPACE, HeaderValue::from_str(&cred.namespace)?);
    Ok(headers)
}

//! Core components for talking to the Khata accounting-ledger API.
//!
//! This crate provides the authenticated-request pipeline that every
//! resource operation in the `khata` crate is built on:
//!
//! - **Context**: a container holding the HTTP sending and environment
//!   access implementations
//! - **Credential**: the client key / secret key / namespace triple shared
//!   read-only by all services
//! - **EnvelopeSigner**: builds the signed request envelope (timestamp +
//!   nonce + HMAC-SHA256 signature over the payload)
//! - **transport**: executes a request through the context and maps
//!   non-success responses into API errors
//!
//! ## Example
//!
//! ```no_run
//! use khata_core::{Context, Credential, EnvelopeSigner};
//!
//! # fn example() -> khata_core::Result<()> {
//! let cred = Credential::new("client-key", "secret-key", "my-namespace");
//! let signer = EnvelopeSigner::new();
//!
//! // Sign an empty payload, e.g. for a state transition call.
//! let envelope = signer.sign(&cred, None)?;
//! assert!(envelope.headers.contains_key("x-nonce"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Traits
//!
//! - [`HttpSend`]: for sending HTTP requests
//! - [`Env`]: for environment variable access
//! - [`Clock`]: for timestamp generation (injectable for tests)
//! - [`NonceSource`]: for nonce generation (injectable for tests)

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
mod http;
pub use http::HttpSend;
mod env;
pub use env::Env;
pub use env::OsEnv;
pub use env::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, Result};

mod credential;
pub use credential::Credential;
mod nonce;
pub use nonce::{FixedNonce, NonceSource, RandomNonce};
pub use time::{Clock, FixedClock, SystemClock};

mod envelope;
pub use envelope::{
    base_headers, EnvelopeSigner, SignedEnvelope, HEADER_API_KEY, HEADER_NAMESPACE, HEADER_NONCE,
    HEADER_TIMESTAMP,
};
mod transport;
pub use transport::{send_json, send_unit, ResponseStyle};

//! Reqwest-backed [`HttpSend`] implementation for the khata client.
//!
//! Calls are never retried; a timeout or connection failure surfaces
//! immediately to the caller. [`with_timeout`](ReqwestHttpSend::with_timeout)
//! bounds every call, and [`DEFAULT_TIMEOUT`] is the bound the khata client
//! applies when its config carries none.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use khata_core::{Error, HttpSend, Result};
use reqwest::{Client, Request};
use std::time::Duration;

/// The timeout applied when none is configured explicitly.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// HttpSend implementation backed by a `reqwest::Client`.
#[derive(Debug)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl Default for ReqwestHttpSend {
    /// A sender over reqwest's default client, which applies no timeout.
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend from an existing `reqwest::Client`.
    ///
    /// The caller is responsible for configuring a timeout on the client;
    /// prefer [`ReqwestHttpSend::with_timeout`] otherwise.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a new ReqwestHttpSend whose every call is bounded by
    /// `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::unexpected("failed to build http client").with_source(e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("request is not executable").with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::unexpected("request timed out").with_source(e)
                } else {
                    Error::unexpected("request failed to send").with_source(e)
                }
            })?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::unexpected("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

use crate::{Context, Error, Result};
use bytes::Bytes;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// ResponseStyle selects which of the two historical response-envelope
/// conventions the deployment speaks.
///
/// Older deployments return the entity (or list) as a bare JSON value;
/// current ones wrap it one level under a `data` key. The style is chosen
/// once at client construction and never inferred per response, so a
/// deployment mixing the two fails loudly instead of silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseStyle {
    /// The entity arrives wrapped under a `data` key.
    #[default]
    DataWrapped,
    /// The entity arrives as a bare JSON value.
    Bare,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize, Default)]
struct ApiMessage {
    #[serde(default)]
    message: String,
}

/// Execute a request and decode the successful response body against `T`.
///
/// Any status >= 400 becomes an [`ErrorKind::Api`](crate::ErrorKind::Api)
/// error carrying the status code and the best-effort decoded `message`
/// field of the body; a missing or unparseable body yields an empty
/// message, not a hard failure. Connection failures and timeouts surface
/// as-is from the transport with no retry.
pub async fn send_json<T: DeserializeOwned>(
    ctx: &Context,
    req: http::Request<Bytes>,
    style: ResponseStyle,
) -> Result<T> {
    let body = execute(ctx, req).await?;

    match style {
        ResponseStyle::DataWrapped => {
            let envelope: DataEnvelope<T> = serde_json::from_slice(&body)
                .map_err(|e| Error::unexpected("failed to decode response body").with_source(e))?;
            Ok(envelope.data)
        }
        ResponseStyle::Bare => serde_json::from_slice(&body)
            .map_err(|e| Error::unexpected("failed to decode response body").with_source(e)),
    }
}

/// Execute a request where the remote reports only a success status.
///
/// The body is still fully consumed before returning.
pub async fn send_unit(ctx: &Context, req: http::Request<Bytes>) -> Result<()> {
    execute(ctx, req).await?;
    Ok(())
}

async fn execute(ctx: &Context, req: http::Request<Bytes>) -> Result<Bytes> {
    let method = req.method().clone();
    let uri = req.uri().clone();

    // The context buffers the body on every path, so the response is
    // drained regardless of outcome.
    let resp = ctx.http_send(req).await?;
    let (parts, body) = resp.into_parts();
    debug!("{method} {uri} returned {}", parts.status);

    if parts.status.as_u16() >= 400 {
        let message = serde_json::from_slice::<ApiMessage>(&body)
            .unwrap_or_default()
            .message;
        return Err(Error::api(parts.status, message));
    }

    Ok(body)
}

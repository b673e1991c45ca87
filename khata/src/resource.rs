use bytes::Bytes;
use http::Method;
use khata_core::{
    base_headers, send_json, send_unit, Context, Credential, EnvelopeSigner, Error, ResponseStyle,
    Result,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::sync::Arc;

/// An entity family exposed by the ledger service.
///
/// Entities are identified by a server-assigned id once created, and
/// additionally addressable by a human-assigned natural key (code or name)
/// for lookup. The client never hard-deletes an entity; its lifecycle flag
/// toggles between active and inactive via the two transition calls.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Collection path segment, e.g. `accounts`.
    const COLLECTION: &'static str;
    /// Human label used in error messages, e.g. `account`.
    const LABEL: &'static str;

    /// The server-assigned identifier.
    fn id(&self) -> &str;
    /// The human-assigned unique code or name.
    fn natural_key(&self) -> &str;
}

/// One resource family's operations, composed from the shared envelope
/// signer and the context's transport.
///
/// Each call is one request/response exchange; nothing here coordinates
/// across calls, and the only idempotent operations are [`list`](Self::list)
/// and [`get`](Self::get).
pub struct ResourceService<R> {
    ctx: Context,
    credential: Arc<Credential>,
    signer: Arc<EnvelopeSigner>,
    base_url: String,
    style: ResponseStyle,
    _marker: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            credential: self.credential.clone(),
            signer: self.signer.clone(),
            base_url: self.base_url.clone(),
            style: self.style,
            _marker: PhantomData,
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub(crate) fn new(
        ctx: Context,
        credential: Arc<Credential>,
        signer: Arc<EnvelopeSigner>,
        base_url: String,
        style: ResponseStyle,
    ) -> Self {
        Self {
            ctx,
            credential,
            signer,
            base_url,
            style,
            _marker: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, R::COLLECTION)
    }

    fn entity_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, R::COLLECTION, id)
    }

    /// List the collection in server order. An empty collection is a valid
    /// result, not an error.
    pub async fn list(&self) -> Result<Vec<R>> {
        self.get_unsigned(self.collection_url()).await
    }

    /// Fetch one entity by its server-assigned id.
    pub async fn get(&self, id: &str) -> Result<R> {
        self.get_unsigned(self.entity_url(id)).await
    }

    /// Fetch one entity by its natural key (code or name).
    ///
    /// The remote exposes no lookup-by-natural-key endpoint, so this lists
    /// the collection and scans for an exact match. A miss is a local
    /// [`ErrorKind::NotFound`](khata_core::ErrorKind::NotFound), distinct
    /// from a remote 404.
    pub async fn get_by_natural_key(&self, key: &str) -> Result<R> {
        let entities = self.list().await?;
        entities
            .into_iter()
            .find(|e| e.natural_key() == key)
            .ok_or_else(|| Error::not_found(format!("{} with key {key:?} not found", R::LABEL)))
    }

    /// Create a new entity; the returned entity carries the id the server
    /// assigned.
    ///
    /// Create is not idempotent: retrying after a timeout can produce a
    /// duplicate record, and avoiding that is the caller's responsibility.
    pub async fn create<P: Serialize>(&self, payload: &P) -> Result<R> {
        let map = to_payload_map(payload)?;
        self.send_signed(Method::POST, self.collection_url(), Some(&map))
            .await
    }

    /// Update the entity identified by `id`.
    ///
    /// The remote creates a new record instead of updating when the body's
    /// id is absent or empty, so an empty `id` is refused locally before
    /// any network call, and the payload's embedded id field is always
    /// overwritten with the argument. POST is the only update entry point
    /// the remote exposes.
    pub async fn update<P: Serialize>(&self, id: &str, payload: &P) -> Result<R> {
        if id.is_empty() {
            return Err(Error::request_invalid(format!(
                "id is required to update a {}; updating without an id would create a duplicate record",
                R::LABEL
            )));
        }

        let mut map = to_payload_map(payload)?;
        map.insert("id".to_string(), Value::from(id));
        self.send_signed(Method::POST, self.entity_url(id), Some(&map))
            .await
    }

    /// Clear the entity's inactive flag.
    ///
    /// Idempotent from the caller's perspective: activating an already
    /// active entity succeeds and leaves it active.
    pub async fn activate(&self, id: &str) -> Result<R> {
        self.transition(id, "active").await
    }

    /// Set the entity's inactive flag.
    pub async fn deactivate(&self, id: &str) -> Result<R> {
        self.transition(id, "inactive").await
    }

    // The remote returns only a success status for transitions, so the
    // post-transition entity comes from a follow-up get. A concurrent
    // write between the two calls is observable; see the crate docs.
    async fn transition(&self, id: &str, state: &str) -> Result<R> {
        if id.is_empty() {
            return Err(Error::request_invalid(format!(
                "id is required to change a {}'s state",
                R::LABEL
            )));
        }

        let url = format!("{}/{}", self.entity_url(id), state);
        // The protocol requires timestamp/nonce/signature even for
        // effectively bodyless transitions.
        let envelope = self.signer.sign(&self.credential, None)?;
        let mut req = http::Request::builder()
            .method(Method::PATCH)
            .uri(url)
            .body(envelope.body)?;
        *req.headers_mut() = envelope.headers;

        send_unit(&self.ctx, req).await?;
        self.get(id).await
    }

    async fn get_unsigned<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let mut req = http::Request::builder()
            .method(Method::GET)
            .uri(url)
            .body(Bytes::new())?;
        *req.headers_mut() = base_headers(&self.credential)?;

        send_json(&self.ctx, req, self.style).await
    }

    async fn send_signed(
        &self,
        method: Method,
        url: String,
        payload: Option<&Map<String, Value>>,
    ) -> Result<R> {
        let envelope = self.signer.sign(&self.credential, payload)?;
        let mut req = http::Request::builder()
            .method(method)
            .uri(url)
            .body(envelope.body)?;
        *req.headers_mut() = envelope.headers;

        send_json(&self.ctx, req, self.style).await
    }
}

fn to_payload_map<P: Serialize>(payload: &P) -> Result<Map<String, Value>> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(Error::payload_invalid(
            "payload must serialize to a JSON object",
        )),
        Err(e) => Err(Error::payload_invalid("payload is not serializable").with_source(e)),
    }
}

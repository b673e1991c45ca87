use crate::account::AccountService;
use crate::account_group::AccountGroupService;
use crate::journal::JournalVoucherService;
use crate::resource::{Resource, ResourceService};
use crate::Config;
use khata_core::{Context, Credential, EnvelopeSigner, Error, ResponseStyle, Result};
use khata_http_send_reqwest::ReqwestHttpSend;
use std::sync::Arc;

/// Client for the Khata accounting-ledger API.
///
/// The client owns the credential and one shared [`EnvelopeSigner`]; every
/// resource service is a thin view over them, so the envelope construction
/// cannot drift between resource families. The client is cheap to clone
/// and safe to share across tasks — each call is an independent
/// request/response exchange with no cross-call coordination.
#[derive(Clone, Debug)]
pub struct Client {
    ctx: Context,
    credential: Arc<Credential>,
    signer: Arc<EnvelopeSigner>,
    base_url: String,
    style: ResponseStyle,
}

impl Client {
    /// Create a client backed by a reqwest transport with the configured
    /// per-call timeout.
    pub fn new(config: Config) -> Result<Self> {
        let http = ReqwestHttpSend::with_timeout(config.timeout())?;
        let ctx = Context::new().with_http_send(http);
        Self::with_context(config, ctx)
    }

    /// Create a client over an explicit [`Context`].
    ///
    /// This is the entry point for wiring in a custom transport, e.g. a
    /// mock `HttpSend` in tests.
    pub fn with_context(config: Config, ctx: Context) -> Result<Self> {
        let credential = config.credential()?;
        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| Error::config_invalid("base url is required"))?
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            ctx,
            credential: Arc::new(credential),
            signer: Arc::new(EnvelopeSigner::new()),
            base_url,
            style: ResponseStyle::default(),
        })
    }

    /// Select the response-envelope convention the deployment speaks.
    ///
    /// The style applies to every call for the lifetime of the client; it
    /// is never inferred per response.
    pub fn with_response_style(mut self, style: ResponseStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the envelope signer.
    ///
    /// # Note
    ///
    /// Only replace the signer to pin the clock and nonce source in tests.
    pub fn with_signer(mut self, signer: EnvelopeSigner) -> Self {
        self.signer = Arc::new(signer);
        self
    }

    /// The account service.
    pub fn accounts(&self) -> AccountService {
        self.service()
    }

    /// The account-group service.
    pub fn account_groups(&self) -> AccountGroupService {
        self.service()
    }

    /// The journal-voucher service.
    pub fn journal_vouchers(&self) -> JournalVoucherService {
        self.service()
    }

    fn service<R: Resource>(&self) -> ResourceService<R> {
        ResourceService::new(
            self.ctx.clone(),
            self.credential.clone(),
            self.signer.clone(),
            self.base_url.clone(),
            self.style,
        )
    }
}

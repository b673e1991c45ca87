//! Typed client for the Khata accounting-ledger API.
//!
//! Three resource families — accounts, account groups, journal vouchers —
//! each support create, read, list, update and activate/deactivate
//! lifecycle transitions. Write operations go through a signed request
//! envelope (timestamp + nonce + HMAC-SHA256 signature, see
//! [`khata_core::EnvelopeSigner`]); reads are authenticated by headers
//! only.
//!
//! ## Example
//!
//! ```no_run
//! use khata::{Client, Config, CreateAccountRequest};
//! use khata_core::{Context, OsEnv};
//!
//! # async fn example() -> khata::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let client = Client::new(Config::from_env(&ctx))?;
//!
//! let accounts = client.accounts();
//! let created = accounts
//!     .create(&CreateAccountRequest {
//!         code: "AC-1001".into(),
//!         name: "Cash".into(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let fetched = accounts.get(&created.id).await?;
//! assert_eq!(fetched.id, created.id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! Callers pattern-match on [`ErrorKind`] plus [`Error::status`] rather
//! than parse message strings: a 404 from the remote is an `Api` error with
//! status `404`, while a natural-key lookup that exhausts the listing is a
//! local `NotFound` with no status at all.

#![warn(missing_docs)]

pub mod constants;

mod config;
pub use config::Config;
mod client;
pub use client::Client;
mod resource;
pub use resource::{Resource, ResourceService};

mod account;
pub use account::{Account, AccountService, CreateAccountRequest, UpdateAccountRequest};
mod account_group;
pub use account_group::{
    AccountGroup, AccountGroupService, CreateAccountGroupRequest, UpdateAccountGroupRequest,
};
mod journal;
pub use journal::{
    CreateJournalVoucherRequest, JournalVoucher, JournalVoucherItem, JournalVoucherService,
    UpdateJournalVoucherRequest, VoucherStatus,
};

pub use khata_core::{Error, ErrorKind, ResponseStyle, Result};

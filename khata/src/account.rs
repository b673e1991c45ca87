use crate::resource::{Resource, ResourceService};
use khata_core::Result;
use serde::{Deserialize, Serialize};

/// A ledger account as returned by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Server-assigned identifier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Human-assigned unique code, the account's natural key.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Lowercased name maintained by the server.
    #[serde(default)]
    pub name_lower: String,
    /// Account type, e.g. `ASSET` or `LIABILITY`.
    #[serde(rename = "type", default)]
    pub account_type: String,
    /// Identifier of the account class this account belongs to.
    #[serde(default)]
    pub account_class_id: String,
    /// Name of the account class.
    #[serde(default)]
    pub account_class_name: String,
    /// Identifier of the primary group.
    #[serde(default)]
    pub primary_group_id: String,
    /// Name of the primary group.
    #[serde(default)]
    pub primary_group_name: String,
    /// Identifier of the parent group, when nested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_group_id: Option<String>,
    /// Name of the parent group, when nested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_group_name: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Lifecycle flag, toggled only via activate/deactivate.
    #[serde(default)]
    pub inactive: bool,
    /// Server-side creation timestamp.
    #[serde(default)]
    pub created_at: String,
}

impl Resource for Account {
    const COLLECTION: &'static str = "accounts";
    const LABEL: &'static str = "account";

    fn id(&self) -> &str {
        &self.id
    }

    fn natural_key(&self) -> &str {
        &self.code
    }
}

/// Payload for creating an account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateAccountRequest {
    /// Human-assigned unique code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Parent group to nest the account under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_group_id: Option<String>,
    /// Parent group referenced by name instead of id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_group_name: Option<String>,
}

/// Payload for updating an account.
///
/// The `id` field is overwritten with the explicit id argument of
/// [`ResourceService::update`] before signing; it exists here so the
/// serialized body always carries it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAccountRequest {
    /// Server-assigned identifier; forced to the update call's argument.
    pub id: String,
    /// Human-assigned unique code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Parent group to nest the account under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_group_id: Option<String>,
    /// Parent group referenced by name instead of id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_group_name: Option<String>,
}

/// Service for the `accounts` collection.
pub type AccountService = ResourceService<Account>;

impl AccountService {
    /// Fetch one account by its code.
    ///
    /// Listing plus a linear scan; see
    /// [`get_by_natural_key`](ResourceService::get_by_natural_key).
    pub async fn get_by_code(&self, code: &str) -> Result<Account> {
        self.get_by_natural_key(code).await
    }
}

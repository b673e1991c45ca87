use crate::resource::{Resource, ResourceService};
use khata_core::Result;
use serde::{Deserialize, Serialize};

/// An account group as returned by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountGroup {
    /// Server-assigned identifier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Display name, the group's natural key.
    pub name: String,
    /// Lowercased name maintained by the server.
    #[serde(default)]
    pub name_lower: String,
    /// Identifier of the account class this group belongs to.
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

impl Resource for AccountGroup {
    const COLLECTION: &'static str = "account-groups";
    const LABEL: &'static str = "account group";

    fn id(&self) -> &str {
        &self.id
    }

    fn natural_key(&self) -> &str {
        &self.name
    }
}

/// Payload for creating an account group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateAccountGroupRequest {
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Parent group to nest the group under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_group_id: Option<String>,
    /// Parent group referenced by name instead of id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_group_name: Option<String>,
}

/// Payload for updating an account group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAccountGroupRequest {
    /// Server-assigned identifier; forced to the update call's argument.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Parent group to nest the group under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_group_id: Option<String>,
    /// Parent group referenced by name instead of id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_group_name: Option<String>,
}

/// Service for the `account-groups` collection.
pub type AccountGroupService = ResourceService<AccountGroup>;

impl AccountGroupService {
    /// Fetch one account group by its name.
    pub async fn get_by_name(&self, name: &str) -> Result<AccountGroup> {
        self.get_by_natural_key(name).await
    }
}

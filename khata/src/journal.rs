use crate::resource::{Resource, ResourceService};
use khata_core::Result;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a journal voucher on the server side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoucherStatus {
    /// Recorded but not yet posted to the ledger.
    #[serde(rename = "DRAFT")]
    Draft,
    /// Posted to the ledger.
    #[serde(rename = "POSTED")]
    Posted,
    /// Voided; kept for audit, excluded from balances.
    #[serde(rename = "VOIDED")]
    Voided,
}

/// A journal voucher as returned by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalVoucher {
    /// Server-assigned identifier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Human-assigned unique code, the voucher's natural key.
    pub code: String,
    /// Voucher date, `YYYY-MM-DD`.
    pub date: String,
    /// ISO currency code.
    pub currency_code: String,
    /// Server-side lifecycle status.
    #[serde(rename = "status", default, skip_serializing_if = "Option::is_none")]
    pub voucher_status: Option<VoucherStatus>,
    /// Free-form narration.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub narration: String,
    /// Debit/credit lines; the server requires them to balance.
    pub items: Vec<JournalVoucherItem>,
    /// Lifecycle flag, toggled only via activate/deactivate.
    #[serde(default)]
    pub inactive: bool,
    /// Server-side creation timestamp.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    /// Server-side last-update timestamp.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub updated_at: String,
}

/// One debit or credit line of a journal voucher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalVoucherItem {
    /// Account referenced by id.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account_id: String,
    /// Account referenced by code instead of id.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account_code: String,
    /// Decimal amount as a string, as the remote transmits it.
    pub amount: String,
    /// Transaction type, `DEBIT` or `CREDIT`.
    pub txn_type: String,
    /// Free-form narration for this line.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub narration: String,
}

impl Resource for JournalVoucher {
    const COLLECTION: &'static str = "journal-vouchers";
    const LABEL: &'static str = "journal voucher";

    fn id(&self) -> &str {
        &self.id
    }

    fn natural_key(&self) -> &str {
        &self.code
    }
}

/// Payload for creating a journal voucher.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateJournalVoucherRequest {
    /// Human-assigned unique code.
    pub code: String,
    /// Voucher date, `YYYY-MM-DD`.
    pub date: String,
    /// ISO currency code.
    pub currency_code: String,
    /// Free-form narration.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub narration: String,
    /// Debit/credit lines; must balance server-side.
    pub items: Vec<JournalVoucherItem>,
}

/// Payload for updating a journal voucher.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateJournalVoucherRequest {
    /// Server-assigned identifier; forced to the update call's argument.
    pub id: String,
    /// Human-assigned unique code.
    pub code: String,
    /// Voucher date, `YYYY-MM-DD`.
    pub date: String,
    /// ISO currency code.
    pub currency_code: String,
    /// Free-form narration.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub narration: String,
    /// Debit/credit lines; must balance server-side.
    pub items: Vec<JournalVoucherItem>,
}

/// Service for the `journal-vouchers` collection.
pub type JournalVoucherService = ResourceService<JournalVoucher>;

impl JournalVoucherService {
    /// Fetch one journal voucher by its code.
    pub async fn get_by_code(&self, code: &str) -> Result<JournalVoucher> {
        self.get_by_natural_key(code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voucher_status_wire_form() {
        assert_eq!(
            serde_json::to_string(&VoucherStatus::Draft).unwrap(),
            "\"DRAFT\""
        );
        let status: VoucherStatus = serde_json::from_str("\"POSTED\"").unwrap();
        assert_eq!(status, VoucherStatus::Posted);
    }

    #[test]
    fn test_voucher_deserializes_without_optional_fields() {
        let voucher: JournalVoucher = serde_json::from_str(
            r#"{
                "code": "JV-001",
                "date": "2026-08-01",
                "currency_code": "NPR",
                "items": [
                    {"account_code": "AC-1001", "amount": "100.00", "txn_type": "DEBIT"},
                    {"account_code": "AC-2001", "amount": "100.00", "txn_type": "CREDIT"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(voucher.id, "");
        assert_eq!(voucher.voucher_status, None);
        assert_eq!(voucher.items.len(), 2);
        assert!(!voucher.inactive);
    }
}

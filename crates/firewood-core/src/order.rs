//! # Wholesale Order
//!
//! Types for the store-restock order form.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  open form ──► OrderDraft (all strings, user-editable)                  │
//! │                    │                                                    │
//! │                    │ validate (validation.rs)                           │
//! │                    ▼                                                    │
//! │               OrderSubmission (trimmed, camelCase JSON, timestamped)    │
//! │                    │                                                    │
//! │                    ├──► webhook POST (firewood-sync)                    │
//! │                    └──► kept as "last order" for the confirmation PDF   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Prefix of every generated order number.
pub const ORDER_NUMBER_PREFIX: &str = "WEB_";

/// Sent in place of an empty current-stock field.
pub const STOCK_NOT_SPECIFIED: &str = "Not specified";

// =============================================================================
// Form Fields
// =============================================================================

/// The fields of the order form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum FormField {
    OrderNumber,
    StoreId,
    StoreName,
    City,
    Quantity,
    DateNeeded,
    CurrentStock,
    ManagerName,
    ContactNo,
}

impl FormField {
    /// Every field, in the order the form shows them.
    pub const ALL: [FormField; 9] = [
        FormField::OrderNumber,
        FormField::StoreId,
        FormField::StoreName,
        FormField::City,
        FormField::Quantity,
        FormField::DateNeeded,
        FormField::CurrentStock,
        FormField::ManagerName,
        FormField::ContactNo,
    ];

    /// The element id / JSON key.
    pub fn id(&self) -> &'static str {
        match self {
            FormField::OrderNumber => "orderNumber",
            FormField::StoreId => "storeId",
            FormField::StoreName => "storeName",
            FormField::City => "city",
            FormField::Quantity => "quantity",
            FormField::DateNeeded => "dateNeeded",
            FormField::CurrentStock => "currentStock",
            FormField::ManagerName => "managerName",
            FormField::ContactNo => "contactNo",
        }
    }

    /// Form label shown next to the input.
    pub fn form_label(&self) -> &'static str {
        match self {
            FormField::OrderNumber => "Order Number:",
            FormField::StoreId => "Store ID:",
            FormField::StoreName => "Store Name:",
            FormField::City => "City:",
            FormField::Quantity => "Quantity Needed (In Pallets):",
            FormField::DateNeeded => "Date Needed:",
            FormField::CurrentStock => "Current Stock Remaining (optional):",
            FormField::ManagerName => "Manager Name:",
            FormField::ContactNo => "Contact Number:",
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, FormField::OrderNumber)
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, FormField::OrderNumber | FormField::CurrentStock)
    }
}

/// Name used inside validation messages, e.g. "Store name is required".
impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormField::OrderNumber => "Order number",
            FormField::StoreId => "Store ID",
            FormField::StoreName => "Store name",
            FormField::City => "City",
            FormField::Quantity => "Quantity",
            FormField::DateNeeded => "Date needed",
            FormField::CurrentStock => "Current stock",
            FormField::ManagerName => "Manager name",
            FormField::ContactNo => "Contact number",
        };
        f.write_str(name)
    }
}

impl FromStr for FormField {
    type Err = CoreError;

    /// Accepts the element id, case-insensitively (`storeName`, `storename`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FormField::ALL
            .into_iter()
            .find(|field| field.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownField(wanted.to_string()))
    }
}

// =============================================================================
// Draft
// =============================================================================

/// The order form exactly as typed. Nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    pub order_number: String,
    pub store_id: String,
    pub store_name: String,
    pub city: String,
    pub quantity: String,
    pub date_needed: String,
    pub current_stock: String,
    pub manager_name: String,
    pub contact_no: String,
}

impl OrderDraft {
    /// Creates an empty draft carrying a pre-generated order number.
    pub fn new(order_number: impl Into<String>) -> Self {
        OrderDraft {
            order_number: order_number.into(),
            ..Default::default()
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::OrderNumber => &self.order_number,
            FormField::StoreId => &self.store_id,
            FormField::StoreName => &self.store_name,
            FormField::City => &self.city,
            FormField::Quantity => &self.quantity,
            FormField::DateNeeded => &self.date_needed,
            FormField::CurrentStock => &self.current_stock,
            FormField::ManagerName => &self.manager_name,
            FormField::ContactNo => &self.contact_no,
        }
    }

    /// Replaces a field's value. The order number cannot be edited.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) -> CoreResult<()> {
        let slot = match field {
            FormField::OrderNumber => return Err(CoreError::ReadOnlyField(field)),
            FormField::StoreId => &mut self.store_id,
            FormField::StoreName => &mut self.store_name,
            FormField::City => &mut self.city,
            FormField::Quantity => &mut self.quantity,
            FormField::DateNeeded => &mut self.date_needed,
            FormField::CurrentStock => &mut self.current_stock,
            FormField::ManagerName => &mut self.manager_name,
            FormField::ContactNo => &mut self.contact_no,
        };
        *slot = value.into();
        Ok(())
    }
}

// =============================================================================
// Submission
// =============================================================================

/// A validated order, as posted to the webhook.
///
/// Serialized with camelCase keys; `timestamp` is ISO-8601 UTC with
/// millisecond precision (`2025-03-01T14:05:09.123Z`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSubmission {
    pub order_number: String,
    pub store_id: String,
    pub store_name: String,
    pub city: String,
    pub quantity: String,
    pub date_needed: String,
    pub current_stock: String,
    pub manager_name: String,
    pub contact_no: String,
    pub timestamp: String,
}

impl OrderSubmission {
    /// Builds the payload from a draft that already passed validation.
    pub fn from_draft(draft: &OrderDraft, submitted_at: DateTime<Utc>) -> Self {
        let stock = draft.current_stock.trim();
        OrderSubmission {
            order_number: draft.order_number.clone(),
            store_id: draft.store_id.trim().to_string(),
            store_name: draft.store_name.trim().to_string(),
            city: draft.city.trim().to_string(),
            quantity: draft.quantity.trim().to_string(),
            date_needed: draft.date_needed.trim().to_string(),
            current_stock: if stock.is_empty() {
                STOCK_NOT_SPECIFIED.to_string()
            } else {
                stock.to_string()
            },
            manager_name: draft.manager_name.trim().to_string(),
            contact_no: draft.contact_no.trim().to_string(),
            timestamp: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Parses `timestamp` back into a UTC instant.
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

// =============================================================================
// Order Number
// =============================================================================

/// Generates `WEB_` followed by a random number in `[1000000, 9999999]`.
///
/// Display-only; two orders may collide.
pub fn generate_order_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    let digits: u32 = rng.gen_range(1_000_000..=9_999_999);
    format!("{ORDER_NUMBER_PREFIX}{digits}")
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Validation Module
//!
//! Rules that gate an order submission.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Live sanitizer (sanitize.rs)                                  │
//! │  ├── Strips characters as they are typed                                │
//! │  └── Best effort only, never trusted                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Every rule runs; violations are collected in a fixed order         │
//! │  └── Any violation blocks the submission                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Spreadsheet webhook                                           │
//! │  └── Accepts whatever it is sent                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reporting Order
//! Store ID, Quantity, Store name, Manager name, Contact number,
//! Date needed, City, Current stock. At most one message per field.
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use firewood_core::order::OrderDraft;
//! use firewood_core::validation::{validate_order, FormRules};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//! let errors = validate_order(&OrderDraft::new("WEB_1234567"), &FormRules::default(), today);
//! assert_eq!(errors[0].to_string(), "Store ID is required");
//! ```

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::ValidationError;
use crate::order::{FormField, OrderDraft};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Date format accepted for "date needed".
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of a normalized contact number.
pub const CONTACT_DIGITS: usize = 10;

// =============================================================================
// Rules Configuration
// =============================================================================

/// Tunable parts of the rule set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormRules {
    /// Upper bound on pallets per order. `None` means unbounded.
    pub max_quantity: Option<u32>,
}

impl FormRules {
    pub fn with_max_quantity(max: u32) -> Self {
        FormRules {
            max_quantity: Some(max),
        }
    }
}

// =============================================================================
// Patterns
// =============================================================================

fn digits_only() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+$").expect("valid digits regex"))
}

fn store_name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z\s\-\.&]+$").expect("valid store name regex"))
}

fn manager_name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z\s\-\.']+$").expect("valid manager name regex"))
}

fn city_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z\s\-\.]+$").expect("valid city regex"))
}

// =============================================================================
// Field Validators
// =============================================================================

fn required(field: FormField, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

fn allowed_characters(
    field: FormField,
    value: &str,
    pattern: &Regex,
    allowed: &'static str,
) -> ValidationResult<()> {
    required(field, value)?;
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::DisallowedCharacters { field, allowed })
    }
}

/// Store ID: required, free-form.
pub fn validate_store_id(value: &str) -> ValidationResult<()> {
    required(FormField::StoreId, value.trim())
}

/// Quantity in pallets.
///
/// ## Rules
/// - Must not be empty
/// - Digits only (no sign, no decimal point)
/// - At least 1
/// - At most `rules.max_quantity`, when configured
pub fn validate_quantity(value: &str, rules: &FormRules) -> ValidationResult<u32> {
    let value = value.trim();
    required(FormField::Quantity, value)?;

    if !digits_only().is_match(value) {
        return Err(ValidationError::QuantityNotNumeric);
    }

    let digits = value.trim_start_matches('0');
    if digits.is_empty() {
        return Err(ValidationError::QuantityTooSmall);
    }

    // ASCII digits and non-zero, so a parse failure can only be overflow.
    let max = rules.max_quantity.unwrap_or(u32::MAX);
    match digits.parse::<u32>() {
        Ok(qty) if qty <= max => Ok(qty),
        _ => Err(ValidationError::QuantityTooLarge { max }),
    }
}

pub fn validate_store_name(value: &str) -> ValidationResult<()> {
    allowed_characters(
        FormField::StoreName,
        value.trim(),
        store_name_pattern(),
        "letters, spaces, hyphens, periods, and ampersands",
    )
}

pub fn validate_manager_name(value: &str) -> ValidationResult<()> {
    allowed_characters(
        FormField::ManagerName,
        value.trim(),
        manager_name_pattern(),
        "letters, spaces, hyphens, periods, and apostrophes",
    )
}

pub fn validate_city(value: &str) -> ValidationResult<()> {
    allowed_characters(
        FormField::City,
        value.trim(),
        city_pattern(),
        "letters, spaces, hyphens, and periods",
    )
}

/// Contact number: required, and exactly 10 digits once every non-digit
/// is stripped. `(555) 123-4567` passes.
pub fn validate_contact_number(value: &str) -> ValidationResult<()> {
    let value = value.trim();
    required(FormField::ContactNo, value)?;

    let digits = value.chars().filter(char::is_ascii_digit).count();
    if digits == CONTACT_DIGITS {
        Ok(())
    } else {
        Err(ValidationError::ContactNumberLength)
    }
}

/// Date needed: a `YYYY-MM-DD` date that is `today` or later.
///
/// Only the calendar date is compared; time of day never matters.
pub fn validate_date_needed(value: &str, today: NaiveDate) -> ValidationResult<NaiveDate> {
    let value = value.trim();
    required(FormField::DateNeeded, value)?;

    let date =
        NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate)?;
    if date < today {
        return Err(ValidationError::DateInPast);
    }
    Ok(date)
}

/// Current stock: optional; when given, a whole number of pallets.
pub fn validate_current_stock(value: &str) -> ValidationResult<()> {
    let value = value.trim();
    if value.is_empty() || digits_only().is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::StockNotNumeric)
    }
}

// =============================================================================
// Whole Form
// =============================================================================

/// Runs every rule and returns all violations, in reporting order.
///
/// An empty vector means the draft may be submitted.
pub fn validate_order(draft: &OrderDraft, rules: &FormRules, today: NaiveDate) -> Vec<ValidationError> {
    [
        validate_store_id(&draft.store_id),
        validate_quantity(&draft.quantity, rules).map(|_| ()),
        validate_store_name(&draft.store_name),
        validate_manager_name(&draft.manager_name),
        validate_contact_number(&draft.contact_no),
        validate_date_needed(&draft.date_needed, today).map(|_| ()),
        validate_city(&draft.city),
        validate_current_stock(&draft.current_stock),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}

/// The field a violation belongs to, for highlighting.
pub fn field_of(error: &ValidationError) -> FormField {
    match error {
        ValidationError::Required { field } => *field,
        ValidationError::DisallowedCharacters { field, .. } => *field,
        ValidationError::QuantityNotNumeric
        | ValidationError::QuantityTooSmall
        | ValidationError::QuantityTooLarge { .. } => FormField::Quantity,
        ValidationError::ContactNumberLength => FormField::ContactNo,
        ValidationError::InvalidDate | ValidationError::DateInPast => FormField::DateNeeded,
        ValidationError::StockNotNumeric => FormField::CurrentStock,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn valid_draft() -> OrderDraft {
        OrderDraft {
            order_number: "WEB_1234567".into(),
            store_id: "S-42".into(),
            store_name: "Abe & Sons".into(),
            city: "St. Louis".into(),
            quantity: "2".into(),
            date_needed: "2025-03-01".into(),
            current_stock: "".into(),
            manager_name: "Mary O'Neil".into(),
            contact_no: "(555) 123-4567".into(),
        }
    }

    fn messages(draft: &OrderDraft, rules: &FormRules) -> Vec<String> {
        validate_order(draft, rules, today())
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_order(&valid_draft(), &FormRules::default(), today()).is_empty());
    }

    #[test]
    fn test_empty_form_reports_every_required_field_in_order() {
        let draft = OrderDraft::new("WEB_1234567");
        assert_eq!(
            messages(&draft, &FormRules::default()),
            vec![
                "Store ID is required",
                "Quantity is required",
                "Store name is required",
                "Manager name is required",
                "Contact number is required",
                "Date needed is required",
                "City is required",
            ]
        );
    }

    #[test]
    fn test_yesterday_reports_exactly_one_date_message() {
        let mut draft = valid_draft();
        draft.date_needed = "2025-02-28".into();
        assert_eq!(
            messages(&draft, &FormRules::default()),
            vec!["Date needed must be today or in the future"]
        );
    }

    #[test]
    fn test_malformed_date() {
        assert_eq!(
            validate_date_needed("03/10/2025", today()),
            Err(ValidationError::InvalidDate)
        );
        assert_eq!(
            validate_date_needed("2025-02-30", today()),
            Err(ValidationError::InvalidDate)
        );
    }

    #[test]
    fn test_quantity_rules() {
        let rules = FormRules::default();
        assert_eq!(validate_quantity("3", &rules), Ok(3));
        assert_eq!(
            validate_quantity("2.5", &rules),
            Err(ValidationError::QuantityNotNumeric)
        );
        assert_eq!(
            validate_quantity("-1", &rules),
            Err(ValidationError::QuantityNotNumeric)
        );
        assert_eq!(
            validate_quantity("00", &rules),
            Err(ValidationError::QuantityTooSmall)
        );

        let capped = FormRules::with_max_quantity(10);
        assert_eq!(validate_quantity("10", &capped), Ok(10));
        assert_eq!(
            validate_quantity("11", &capped),
            Err(ValidationError::QuantityTooLarge { max: 10 })
        );
        assert_eq!(
            validate_quantity("99999999999", &capped),
            Err(ValidationError::QuantityTooLarge { max: 10 })
        );
    }

    #[test]
    fn test_quantity_rejects_non_ascii_digits() {
        let rules = FormRules::default();
        // Arabic-Indic three, and fullwidth seven
        assert_eq!(
            validate_quantity("\u{0663}", &rules),
            Err(ValidationError::QuantityNotNumeric)
        );
        assert_eq!(
            validate_quantity("\u{FF17}", &rules),
            Err(ValidationError::QuantityNotNumeric)
        );
        assert_eq!(
            validate_current_stock("\u{0663}\u{0664}"),
            Err(ValidationError::StockNotNumeric)
        );

        let mut draft = valid_draft();
        draft.quantity = "\u{0663}".into();
        assert_eq!(messages(&draft, &rules), vec!["Quantity must be a number only"]);
    }

    #[test]
    fn test_quantity_overflow_is_never_accepted() {
        let rules = FormRules::default();
        assert_eq!(validate_quantity("4294967295", &rules), Ok(u32::MAX));
        assert_eq!(
            validate_quantity("4294967296", &rules),
            Err(ValidationError::QuantityTooLarge { max: u32::MAX })
        );
        assert_eq!(
            validate_quantity("0099999999999999999999", &rules),
            Err(ValidationError::QuantityTooLarge { max: u32::MAX })
        );
    }

    #[test]
    fn test_name_patterns() {
        assert!(validate_store_name("Abe & Sons Co.").is_ok());
        assert!(validate_store_name("Abe's").is_err());
        assert!(validate_manager_name("Mary O'Neil-Smith").is_ok());
        assert!(validate_manager_name("Mary & Co").is_err());
        assert!(validate_city("Winston-Salem").is_ok());
        assert!(validate_city("Springfield 2").is_err());
    }

    #[test]
    fn test_contact_number() {
        assert!(validate_contact_number("5551234567").is_ok());
        assert!(validate_contact_number("555-123-4567").is_ok());
        assert_eq!(
            validate_contact_number("555123456"),
            Err(ValidationError::ContactNumberLength)
        );
        assert_eq!(
            validate_contact_number("   "),
            Err(ValidationError::Required {
                field: FormField::ContactNo
            })
        );
    }

    #[test]
    fn test_current_stock_optional() {
        assert!(validate_current_stock("").is_ok());
        assert!(validate_current_stock("12").is_ok());
        assert_eq!(
            validate_current_stock("a few"),
            Err(ValidationError::StockNotNumeric)
        );
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut draft = valid_draft();
        draft.store_name = "  Abe & Sons  ".into();
        draft.quantity = " 4 ".into();
        assert!(validate_order(&draft, &FormRules::default(), today()).is_empty());
    }

    #[test]
    fn test_field_of() {
        assert_eq!(field_of(&ValidationError::DateInPast), FormField::DateNeeded);
        assert_eq!(
            field_of(&ValidationError::Required {
                field: FormField::City
            }),
            FormField::City
        );
    }
}

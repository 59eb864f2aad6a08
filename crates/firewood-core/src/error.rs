//! # Error Types
//!
//! Domain-specific error types for firewood-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  firewood-core errors (this file)                                       │
//! │  ├── CoreError        - Preconditions and state machine misuse          │
//! │  └── ValidationError  - One order-form rule violation                   │
//! │                                                                         │
//! │  firewood-store errors (separate crate)                                 │
//! │  └── DbError          - Local storage / document output failures        │
//! │                                                                         │
//! │  firewood-sync errors (separate crate)                                  │
//! │  └── SyncError        - Webhook configuration and transport failures    │
//! │                                                                         │
//! │  Storefront app                                                         │
//! │  └── ApiError         - What the adapter shows the user                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. A `ValidationError`'s `Display` IS the message shown in the form
//! 3. Precondition messages are the exact notices the shopper sees

use thiserror::Error;

use crate::order::FormField;
use crate::submission::SubmissionState;

// =============================================================================
// Core Error
// =============================================================================

/// Core storefront errors.
///
/// Every variant is checked synchronously before any side effect happens.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout attempted with every quantity at zero.
    #[error("Your cart is empty. Please add some firewood bundles.")]
    EmptyCart,

    /// Checkout attempted with a blank delivery address.
    #[error("Please enter a delivery address.")]
    MissingAddress,

    /// "Download order PDF" before any order was submitted.
    #[error("No order data available for PDF generation.")]
    NoOrderData,

    /// A product slug, name or position that is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// An order-form action while no form is open.
    #[error("No order form is open")]
    NoOpenForm,

    /// Attempt to edit a read-only form field (the order number).
    #[error("{0} is read-only")]
    ReadOnlyField(FormField),

    /// A field name the order form does not have.
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    /// The submission state machine was driven out of order.
    ///
    /// ## When This Occurs
    /// - Submit clicked again while a submission is in flight
    /// - A completion arriving for a flow that never dispatched
    #[error("Cannot {action} while submission is {state}")]
    InvalidTransition {
        state: SubmissionState,
        action: &'static str,
    },

    /// One or more order-form rules failed. Nothing was sent.
    #[error("Please fix the following errors: {}", join_messages(.0))]
    ValidationFailed(Vec<ValidationError>),

    /// The persisted cart could not be read back.
    #[error("Saved cart is unreadable: {0}")]
    CorruptSnapshot(String),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single order-form rule violation.
///
/// The `Display` output is the exact, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{field} is required")]
    Required { field: FormField },

    /// Quantity contains something other than digits.
    #[error("Quantity must be a number only")]
    QuantityNotNumeric,

    /// Quantity is zero.
    #[error("Quantity must be at least 1")]
    QuantityTooSmall,

    /// Quantity is above the configured pallet limit.
    #[error("Quantity cannot exceed {max}")]
    QuantityTooLarge { max: u32 },

    /// A name-like field contains characters outside its allowed set.
    #[error("{field} can only contain {allowed}")]
    DisallowedCharacters {
        field: FormField,
        allowed: &'static str,
    },

    /// Contact number does not normalize to exactly 10 digits.
    #[error("Contact number must be exactly 10 digits (numbers only)")]
    ContactNumberLength,

    /// Date needed is not a calendar date.
    #[error("Date needed must be a valid date (YYYY-MM-DD)")]
    InvalidDate,

    /// Date needed is before today.
    #[error("Date needed must be today or in the future")]
    DateInPast,

    /// Current stock was given but is not a whole number.
    #[error("Current stock must be a whole number")]
    StockNotNumeric,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_messages() {
        assert_eq!(
            CoreError::EmptyCart.to_string(),
            "Your cart is empty. Please add some firewood bundles."
        );
        assert_eq!(
            CoreError::MissingAddress.to_string(),
            "Please enter a delivery address."
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: FormField::StoreName,
        };
        assert_eq!(err.to_string(), "Store name is required");

        let err = ValidationError::DisallowedCharacters {
            field: FormField::City,
            allowed: "letters, spaces, hyphens, and periods",
        };
        assert_eq!(
            err.to_string(),
            "City can only contain letters, spaces, hyphens, and periods"
        );

        let err = ValidationError::QuantityTooLarge { max: 10 };
        assert_eq!(err.to_string(), "Quantity cannot exceed 10");
    }

    #[test]
    fn test_validation_failed_lists_every_message() {
        let err = CoreError::ValidationFailed(vec![
            ValidationError::QuantityTooSmall,
            ValidationError::DateInPast,
        ]);
        assert_eq!(
            err.to_string(),
            "Please fix the following errors: Quantity must be at least 1; \
             Date needed must be today or in the future"
        );
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = CoreError::InvalidTransition {
            state: SubmissionState::Submitting,
            action: "submit",
        };
        assert_eq!(err.to_string(), "Cannot submit while submission is submitting");
    }
}

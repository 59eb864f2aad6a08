//! # View Models
//!
//! Pure `state → view` transforms. Adapters only draw these; they never
//! compute prices, totals or labels themselves.
//!
//! ```text
//! ┌───────────────┐      ┌──────────────────┐      ┌─────────────────────┐
//! │ Cart,         │      │ render_shop      │      │ terminal adapter    │
//! │ discount,     │ ───► │ render_cart_*    │ ───► │ (apps/storefront)   │
//! │ form session  │      │ render_order_form│      │ or a browser, via   │
//! └───────────────┘      └──────────────────┘      │ the ts-rs bindings  │
//!                                                  └─────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartTotals};
use crate::error::ValidationError;
use crate::form::OrderFormSession;
use crate::money::Money;
use crate::order::FormField;
use crate::submission::SubmitControl;
use crate::validation::DATE_FORMAT;

/// Shown in the modal when every quantity is zero.
pub const EMPTY_CART_MESSAGE: &str = "No items yet.";

/// Heading above the validation error list.
pub const VALIDATION_HEADER: &str = "Please fix the following errors:";

const PHONE_PLACEHOLDER: &str = "Enter 10 digits (e.g., 1234567890)";

// =============================================================================
// Shop Panel
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QualityFeature {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QualitySection {
    pub heading: String,
    pub intro: String,
    pub features: Vec<QualityFeature>,
}

impl QualitySection {
    pub fn standard() -> Self {
        let feature = |heading: &str, body: &str| QualityFeature {
            heading: heading.to_string(),
            body: body.to_string(),
        };
        QualitySection {
            heading: "Premium Firewood Quality".to_string(),
            intro: "Our firewood is sourced locally from Honest Abe's old stomping grounds. \
                    We select the finest and cleanest burning wood from Midwest."
                .to_string(),
            features: vec![
                feature(
                    "🌲 Sustainably Harvested",
                    "All our firewood comes from responsible wood clearing projects and scrap \
                     wood to ensure we preserve the natural beauty of our planet for future \
                     generations.",
                ),
                feature(
                    "🔥 Perfectly Seasoned",
                    "Each bundle is properly dried and seasoned to ensure optimal burning \
                     efficiency and maximum heat output.",
                ),
                feature(
                    "🌿 Natural & Clean",
                    "No chemicals or artificial treatments - just pure, natural firewood that \
                     burns clean and safe for your family.",
                ),
            ],
        }
    }
}

/// A product tile with its stepper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductTileView {
    pub index: u32,
    pub name: String,
    /// `$15.99`
    pub price: String,
    pub image: String,
    pub quantity: u32,
    /// The "−" button is inert at zero.
    pub can_decrement: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShopView {
    pub quality: QualitySection,
    pub tiles: Vec<ProductTileView>,
    pub summary: CartSummaryView,
}

// =============================================================================
// Cart Summary & Modal
// =============================================================================

/// The floating summary: item count and total after discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummaryView {
    pub item_count: u32,
    /// Two decimals, no currency symbol (`45.47`).
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineView {
    /// `Oak Bundle x 2 = $31.98`
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartModalView {
    pub open: bool,
    pub lines: Vec<CartLineView>,
    /// Set instead of `lines` when the cart is empty.
    pub empty_message: Option<String>,
    /// Two decimals, no currency symbol.
    pub total: String,
    pub promo_code: String,
    pub address: String,
}

pub fn render_cart_summary(cart: &Cart, discount: Money) -> CartSummaryView {
    let totals = CartTotals::compute(cart, discount);
    CartSummaryView {
        item_count: totals.total_items,
        total: totals.total.to_plain_string(),
    }
}

pub fn render_shop(cart: &Cart, discount: Money) -> ShopView {
    let tiles = cart
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| ProductTileView {
            index: u32::try_from(index).unwrap_or(u32::MAX),
            name: item.name.clone(),
            price: item.unit_price.to_string(),
            image: item.image.clone(),
            quantity: item.quantity,
            can_decrement: item.quantity > 0,
        })
        .collect();

    ShopView {
        quality: QualitySection::standard(),
        tiles,
        summary: render_cart_summary(cart, discount),
    }
}

pub fn render_cart_modal(
    cart: &Cart,
    discount: Money,
    open: bool,
    promo_code: &str,
    address: &str,
) -> CartModalView {
    let lines: Vec<CartLineView> = cart
        .ordered_lines()
        .map(|item| CartLineView {
            text: format!("{} x {} = {}", item.name, item.quantity, item.line_total()),
        })
        .collect();
    let empty_message = lines.is_empty().then(|| EMPTY_CART_MESSAGE.to_string());

    CartModalView {
        open,
        lines,
        empty_message,
        total: CartTotals::compute(cart, discount).total.to_plain_string(),
        promo_code: promo_code.to_string(),
        address: address.to_string(),
    }
}

// =============================================================================
// Order Form
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum InputKind {
    Text,
    Number,
    Date,
    Tel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FormFieldView {
    pub field: FormField,
    pub label: String,
    pub kind: InputKind,
    pub value: String,
    pub required: bool,
    pub read_only: bool,
    /// Draw with the error style.
    pub invalid: bool,
    pub placeholder: Option<String>,
    /// Earliest selectable date (`dateNeeded` only).
    pub min: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ValidationErrorsView {
    pub header: String,
    pub messages: Vec<String>,
}

impl ValidationErrorsView {
    pub fn from_errors(errors: &[ValidationError]) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        Some(ValidationErrorsView {
            header: VALIDATION_HEADER.to_string(),
            messages: errors.iter().map(ToString::to_string).collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderFormView {
    pub title: String,
    pub fields: Vec<FormFieldView>,
    pub errors: Option<ValidationErrorsView>,
    pub submit: SubmitControl,
    pub cancel_label: String,
}

fn input_kind(field: FormField) -> InputKind {
    match field {
        FormField::Quantity | FormField::CurrentStock => InputKind::Number,
        FormField::DateNeeded => InputKind::Date,
        FormField::ContactNo => InputKind::Tel,
        _ => InputKind::Text,
    }
}

pub fn render_order_form(session: &OrderFormSession, today: NaiveDate) -> OrderFormView {
    let fields = FormField::ALL
        .into_iter()
        .map(|field| FormFieldView {
            field,
            label: field.form_label().to_string(),
            kind: input_kind(field),
            value: session.draft().get(field).to_string(),
            required: field.is_required(),
            read_only: field.is_read_only(),
            invalid: session.is_invalid(field),
            placeholder: (field == FormField::ContactNo).then(|| PHONE_PLACEHOLDER.to_string()),
            min: (field == FormField::DateNeeded).then(|| today.format(DATE_FORMAT).to_string()),
        })
        .collect();

    OrderFormView {
        title: "Firewood Order Form".to_string(),
        fields,
        errors: ValidationErrorsView::from_errors(session.errors()),
        submit: session.flow().control(),
        cancel_label: "Cancel".to_string(),
    }
}

// =============================================================================
// Success Modal
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SuccessModalView {
    pub order_number: String,
    pub download_label: String,
}

impl SuccessModalView {
    pub fn new(order_number: impl Into<String>) -> Self {
        SuccessModalView {
            order_number: order_number.into(),
            download_label: "Download Order PDF".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FormRules;

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.adjust(0, 2).unwrap();
        cart.adjust(1, 1).unwrap();
        cart
    }

    #[test]
    fn test_summary_with_and_without_promo() {
        assert_eq!(
            render_cart_summary(&cart(), Money::zero()),
            CartSummaryView {
                item_count: 3,
                total: "45.47".into()
            }
        );
        assert_eq!(render_cart_summary(&cart(), Money::from_dollars(10)).total, "35.47");
    }

    #[test]
    fn test_modal_lines() {
        let view = render_cart_modal(&cart(), Money::zero(), true, "", "");
        let lines: Vec<_> = view.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(lines, vec!["Oak Bundle x 2 = $31.98", "Maple Bundle x 1 = $13.49"]);
        assert_eq!(view.empty_message, None);
    }

    #[test]
    fn test_empty_modal() {
        let view = render_cart_modal(&Cart::new(), Money::from_dollars(10), true, "campfire10", "");
        assert!(view.lines.is_empty());
        assert_eq!(view.empty_message.as_deref(), Some("No items yet."));
        assert_eq!(view.total, "0.00");
    }

    #[test]
    fn test_shop_tiles() {
        let view = render_shop(&cart(), Money::zero());
        assert_eq!(view.tiles.len(), 3);
        assert_eq!(view.tiles[0].price, "$15.99");
        assert!(view.tiles[0].can_decrement);
        assert!(!view.tiles[2].can_decrement);
        assert_eq!(view.quality.features.len(), 3);
    }

    #[test]
    fn test_order_form_view() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut session = OrderFormSession::open("WEB_1234567", FormRules::default());
        let _ = session.begin_submit(today, chrono::Utc::now());

        let view = render_order_form(&session, today);
        assert_eq!(view.fields.len(), 9);
        assert_eq!(view.fields[0].value, "WEB_1234567");
        assert!(view.fields[0].read_only);
        assert_eq!(view.submit.label, "Submit Order");

        let date = view.fields.iter().find(|f| f.field == FormField::DateNeeded).unwrap();
        assert_eq!(date.min.as_deref(), Some("2025-03-01"));
        assert!(date.invalid);

        let errors = view.errors.unwrap();
        assert_eq!(errors.header, "Please fix the following errors:");
        assert_eq!(errors.messages[0], "Store ID is required");
    }
}

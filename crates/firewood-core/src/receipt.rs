//! # Receipts
//!
//! Lays out the two printable documents the shop produces. Layout is in
//! millimetres from the top-left corner of an A4 page; [`crate::pdf`]
//! turns a [`Document`] into bytes.
//!
//! ## Cart Receipt
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ (14,20)  Firewood Shop - Order Receipt   18pt │
//! │                                               │
//! │ (14,40)  Items Ordered:                  12pt │
//! │ (14,50)  Oak Bundle x 2 = $31.98              │
//! │ (14,60)  Maple Bundle x 1 = $13.49            │
//! │   +15    Total Amount: $35.47                 │
//! │   +20    Delivery Address:                    │
//! │   +10    12 Rail Splitter Lane, Springfield   │
//! │          (wrapped to the 180 mm text width)   │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Order Confirmation
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ (20,30)  Honest Abe's Firewood    18pt brown  │
//! │ (20,50)  Order Confirmation       16pt        │
//! │ (20,70)  Order Number:   (80,70) WEB_1234567  │
//! │   +8     Store ID:               ...          │
//! │          ... ten rows, bold labels ...        │
//! │   +20    Thank you for your order! ...  10pt  │
//! │   +10    Generated on: ...             grey   │
//! └───────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, FixedOffset, Utc};

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::order::OrderSubmission;

/// Filename of the cart receipt.
pub const CART_RECEIPT_FILENAME: &str = "FirewoodOrderReceipt.pdf";

/// Characters per wrapped address line at 12pt across 180 mm.
pub const ADDRESS_WRAP_CHARS: usize = 85;

/// Line advance for wrapped text: 1.15 × font size, in mm.
fn line_height_mm(size_pt: f64) -> f64 {
    size_pt * 1.15 * 25.4 / 72.0
}

// =============================================================================
// Document Model
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const BRAND_BROWN: Rgb = Rgb(74, 63, 53);
    pub const FOOTER_GREY: Rgb = Rgb(100, 100, 100);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// A single positioned line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x_mm: f64,
    pub y_mm: f64,
    pub size_pt: f64,
    pub weight: FontWeight,
    pub color: Rgb,
    pub text: String,
}

/// A one-page printable document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub filename: String,
    pub title: String,
    pub runs: Vec<TextRun>,
}

impl Document {
    /// The text of every run, in drawing order.
    pub fn lines(&self) -> Vec<&str> {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Tracks the current font state while laying out, like a PDF pen.
struct Layout {
    size_pt: f64,
    weight: FontWeight,
    color: Rgb,
    runs: Vec<TextRun>,
}

impl Layout {
    fn new() -> Self {
        Layout {
            size_pt: 16.0,
            weight: FontWeight::Normal,
            color: Rgb::BLACK,
            runs: Vec::new(),
        }
    }

    fn text(&mut self, text: impl Into<String>, x_mm: f64, y_mm: f64) {
        self.runs.push(TextRun {
            x_mm,
            y_mm,
            size_pt: self.size_pt,
            weight: self.weight,
            color: self.color,
            text: text.into(),
        });
    }

    fn finish(self, filename: impl Into<String>, title: impl Into<String>) -> Document {
        Document {
            filename: filename.into(),
            title: title.into(),
            runs: self.runs,
        }
    }
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
                out.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        out.push(line);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

// =============================================================================
// Cart Receipt
// =============================================================================

/// Builds the checkout receipt.
///
/// ## Preconditions
/// - At least one item in the cart
/// - A non-blank delivery address
///
/// The total is the subtotal minus `discount`, floored at zero.
pub fn cart_receipt(cart: &Cart, discount: Money, address: &str) -> CoreResult<Document> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }
    let address = address.trim();
    if address.is_empty() {
        return Err(CoreError::MissingAddress);
    }

    let mut doc = Layout::new();
    doc.size_pt = 18.0;
    doc.text("Firewood Shop - Order Receipt", 14.0, 20.0);

    doc.size_pt = 12.0;
    let mut y = 40.0;
    doc.text("Items Ordered:", 14.0, y);

    for item in cart.ordered_lines() {
        y += 10.0;
        doc.text(
            format!("{} x {} = {}", item.name, item.quantity, item.line_total()),
            14.0,
            y,
        );
    }

    y += 15.0;
    let total = cart.subtotal().minus_floored(discount);
    doc.text(format!("Total Amount: {total}"), 14.0, y);

    y += 20.0;
    doc.text("Delivery Address:", 14.0, y);

    let mut line_y = y + 10.0;
    for line in wrap_text(address, ADDRESS_WRAP_CHARS) {
        doc.text(line, 14.0, line_y);
        line_y += line_height_mm(12.0);
    }

    Ok(doc.finish(CART_RECEIPT_FILENAME, "Firewood Order Receipt"))
}

// =============================================================================
// Order Confirmation
// =============================================================================

/// `3/1/2025`
const SHORT_DATE: &str = "%-m/%-d/%Y";
/// `3/1/2025, 2:05:09 PM`
const LONG_DATE_TIME: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// `Order_{orderNumber}_{YYYY-MM-DD}.pdf`, dated in UTC at generation time.
pub fn order_confirmation_filename(order_number: &str, generated_at: DateTime<FixedOffset>) -> String {
    format!(
        "Order_{}_{}.pdf",
        order_number,
        generated_at.with_timezone(&Utc).format("%Y-%m-%d")
    )
}

/// Builds the wholesale order confirmation.
///
/// `generated_at` carries the local offset used for the displayed dates.
pub fn order_confirmation(order: &OrderSubmission, generated_at: DateTime<FixedOffset>) -> Document {
    let order_date = order
        .submitted_at()
        .map(|ts| {
            ts.with_timezone(generated_at.offset())
                .format(SHORT_DATE)
                .to_string()
        })
        .unwrap_or_else(|| order.timestamp.clone());

    let mut doc = Layout::new();
    doc.size_pt = 18.0;
    doc.color = Rgb::BRAND_BROWN;
    doc.text("Honest Abe's Firewood", 20.0, 30.0);

    doc.size_pt = 16.0;
    doc.color = Rgb::BLACK;
    doc.text("Order Confirmation", 20.0, 50.0);

    doc.size_pt = 12.0;
    let rows: [(&str, &str); 10] = [
        ("Order Number:", &order.order_number),
        ("Store ID:", &order.store_id),
        ("Store Name:", &order.store_name),
        ("City:", &order.city),
        ("Quantity (Pallets):", &order.quantity),
        ("Date Needed:", &order.date_needed),
        ("Current Stock:", &order.current_stock),
        ("Manager Name:", &order.manager_name),
        ("Contact Number:", &order.contact_no),
        ("Order Date:", &order_date),
    ];

    let mut y = 70.0;
    for (label, value) in rows {
        doc.weight = FontWeight::Bold;
        doc.text(label, 20.0, y);
        doc.weight = FontWeight::Normal;
        doc.text(value, 80.0, y);
        y += 8.0;
    }

    y += 20.0;
    doc.size_pt = 10.0;
    doc.color = Rgb::FOOTER_GREY;
    doc.text(
        "Thank you for your order! We will contact you shortly to confirm.",
        20.0,
        y,
    );
    doc.text(
        format!("Generated on: {}", generated_at.format(LONG_DATE_TIME)),
        20.0,
        y + 10.0,
    );

    doc.finish(
        order_confirmation_filename(&order.order_number, generated_at),
        format!("Order Confirmation {}", order.order_number),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn cart_with_oak_and_maple() -> Cart {
        let mut cart = Cart::new();
        cart.adjust(0, 2).unwrap();
        cart.adjust(1, 1).unwrap();
        cart
    }

    fn submission() -> OrderSubmission {
        OrderSubmission {
            order_number: "WEB_1234567".into(),
            store_id: "S-42".into(),
            store_name: "Lincoln Mart".into(),
            city: "Springfield".into(),
            quantity: "4".into(),
            date_needed: "2025-03-05".into(),
            current_stock: "Not specified".into(),
            manager_name: "Mary Todd".into(),
            contact_no: "5551234567".into(),
            timestamp: "2025-03-01T20:05:09.000Z".into(),
        }
    }

    #[test]
    fn test_cart_receipt_lines() {
        let doc = cart_receipt(
            &cart_with_oak_and_maple(),
            Money::from_dollars(10),
            "  12 Rail Splitter Lane, Springfield  ",
        )
        .unwrap();

        assert_eq!(doc.filename, "FirewoodOrderReceipt.pdf");
        assert_eq!(
            doc.lines(),
            vec![
                "Firewood Shop - Order Receipt",
                "Items Ordered:",
                "Oak Bundle x 2 = $31.98",
                "Maple Bundle x 1 = $13.49",
                "Total Amount: $35.47",
                "Delivery Address:",
                "12 Rail Splitter Lane, Springfield",
            ]
        );
        assert_eq!(doc.runs[4].y_mm, 75.0);
        assert_eq!(doc.runs[6].y_mm, 105.0);
    }

    #[test]
    fn test_cart_receipt_preconditions() {
        assert!(matches!(
            cart_receipt(&Cart::new(), Money::zero(), "somewhere"),
            Err(CoreError::EmptyCart)
        ));
        assert!(matches!(
            cart_receipt(&cart_with_oak_and_maple(), Money::zero(), "   "),
            Err(CoreError::MissingAddress)
        ));
    }

    #[test]
    fn test_long_address_wraps() {
        let address = "Loading dock B, ".repeat(12);
        let doc = cart_receipt(&cart_with_oak_and_maple(), Money::zero(), &address).unwrap();
        let address_lines: Vec<_> = doc.runs.iter().skip(6).collect();
        assert!(address_lines.len() > 1);
        assert!(address_lines
            .iter()
            .all(|run| run.text.chars().count() <= ADDRESS_WRAP_CHARS));
        assert!(address_lines[1].y_mm > address_lines[0].y_mm);
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("", 10), vec![""]);
        assert_eq!(wrap_text("a\nb", 10), vec!["a", "b"]);
    }

    #[test]
    fn test_order_confirmation_layout() {
        let central = FixedOffset::west_opt(6 * 3600).unwrap();
        let generated = central.with_ymd_and_hms(2025, 3, 1, 14, 5, 9).unwrap();
        let doc = order_confirmation(&submission(), generated);

        assert_eq!(doc.filename, "Order_WEB_1234567_2025-03-01.pdf");
        assert_eq!(doc.runs[0].text, "Honest Abe's Firewood");
        assert_eq!(doc.runs[0].color, Rgb::BRAND_BROWN);
        assert_eq!(doc.runs[1].text, "Order Confirmation");

        // label/value pairs
        assert_eq!(doc.runs[2].text, "Order Number:");
        assert_eq!(doc.runs[2].weight, FontWeight::Bold);
        assert_eq!(doc.runs[3].text, "WEB_1234567");
        assert_eq!(doc.runs[3].x_mm, 80.0);
        assert_eq!(doc.runs[20].text, "Order Date:");
        assert_eq!(doc.runs[21].text, "3/1/2025");
        assert_eq!(doc.runs[21].y_mm, 142.0);

        let footer = &doc.runs[22];
        assert_eq!(footer.y_mm, 170.0);
        assert_eq!(footer.color, Rgb::FOOTER_GREY);
        assert_eq!(doc.runs[23].text, "Generated on: 3/1/2025, 2:05:09 PM");
    }

    #[test]
    fn test_filename_uses_utc_date() {
        let central = FixedOffset::west_opt(6 * 3600).unwrap();
        let late_evening = central.with_ymd_and_hms(2025, 3, 1, 21, 0, 0).unwrap();
        assert_eq!(
            order_confirmation_filename("WEB_1000000", late_evening),
            "Order_WEB_1000000_2025-03-02.pdf"
        );
    }
}

//! # Live Input Sanitizer
//!
//! Coerces order-form inputs while they are being edited. One sanitizer
//! type, parameterized by an allowed-character policy, serves every field.
//!
//! ```text
//! ┌──────────────┬────────────┬────────────────────────────────────────────┐
//! │ field        │ policy     │ behaviour                                  │
//! ├──────────────┼────────────┼────────────────────────────────────────────┤
//! │ contactNo    │ Digits/10  │ input, focus, paste: digits, max 10        │
//! │              │            │ keydown: digits + editing keys only        │
//! │              │            │ blur: digits; invalid unless len 0 or 10   │
//! ├──────────────┼────────────┼────────────────────────────────────────────┤
//! │ quantity     │ Digits ≥1  │ input: digits; "" or "0" becomes "1"       │
//! │              │            │ blur: empty or < 1 becomes "1"             │
//! ├──────────────┼────────────┼────────────────────────────────────────────┤
//! │ storeName    │ NameLike   │ input: drop anything outside               │
//! │ managerName  │            │ letters, whitespace, - . ' &               │
//! │ city         │            │                                            │
//! └──────────────┴────────────┴────────────────────────────────────────────┘
//! ```
//!
//! This is best-effort UX only. `validation` is what gates a submission.

use crate::order::FormField;

// =============================================================================
// Policies
// =============================================================================

/// Which characters survive sanitizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharPolicy {
    /// ASCII digits.
    Digits,
    /// ASCII letters, whitespace, `-`, `.`, `'`, `&`.
    NameLike,
}

impl CharPolicy {
    pub fn allows(&self, c: char) -> bool {
        match self {
            CharPolicy::Digits => c.is_ascii_digit(),
            CharPolicy::NameLike => {
                c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '-' | '.' | '\'' | '&')
            }
        }
    }
}

/// A field sanitizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSanitizer {
    pub policy: CharPolicy,
    /// Truncate to this many characters after filtering.
    pub max_len: Option<usize>,
    /// Coerce empty or zero to `"1"`.
    pub min_one: bool,
    /// Keystrokes outside the policy are blocked.
    pub filter_keys: bool,
    /// On blur, a non-empty value must be exactly `max_len` long.
    pub exact_len_on_blur: bool,
}

impl FieldSanitizer {
    pub const PHONE: FieldSanitizer = FieldSanitizer {
        policy: CharPolicy::Digits,
        max_len: Some(10),
        min_one: false,
        filter_keys: true,
        exact_len_on_blur: true,
    };

    pub const QUANTITY: FieldSanitizer = FieldSanitizer {
        policy: CharPolicy::Digits,
        max_len: None,
        min_one: true,
        filter_keys: false,
        exact_len_on_blur: false,
    };

    pub const NAME: FieldSanitizer = FieldSanitizer {
        policy: CharPolicy::NameLike,
        max_len: None,
        min_one: false,
        filter_keys: false,
        exact_len_on_blur: false,
    };

    /// The sanitizer attached to a form field, if any.
    pub fn for_field(field: FormField) -> Option<FieldSanitizer> {
        match field {
            FormField::ContactNo => Some(FieldSanitizer::PHONE),
            FormField::Quantity => Some(FieldSanitizer::QUANTITY),
            FormField::StoreName | FormField::ManagerName | FormField::City => {
                Some(FieldSanitizer::NAME)
            }
            _ => None,
        }
    }

    /// Drops disallowed characters and applies `max_len`.
    pub fn clean(&self, raw: &str) -> String {
        let filtered = raw.chars().filter(|c| self.policy.allows(*c));
        match self.max_len {
            Some(max) => filtered.take(max).collect(),
            None => filtered.collect(),
        }
    }

    /// Handles one editing event, returning the new value and style.
    pub fn apply(&self, current: &str, event: &FieldEvent) -> FieldFeedback {
        match event {
            FieldEvent::Input(raw) | FieldEvent::Paste(raw) => {
                let mut value = self.clean(raw);
                if self.min_one && (value.is_empty() || value == "0") {
                    value = "1".to_string();
                }
                FieldFeedback::valid(value)
            }
            FieldEvent::Focus => FieldFeedback::valid(self.clean(current)),
            FieldEvent::Blur => self.blur(current),
        }
    }

    fn blur(&self, current: &str) -> FieldFeedback {
        if self.min_one {
            let trimmed = current.trim();
            let below_one = trimmed.is_empty() || leading_integer(trimmed).map_or(false, |n| n < 1);
            let value = if below_one { "1".to_string() } else { current.to_string() };
            return FieldFeedback::valid(value);
        }

        if self.exact_len_on_blur {
            let value: String = current.chars().filter(|c| self.policy.allows(*c)).collect();
            let invalid = match self.max_len {
                Some(len) => !value.is_empty() && value.chars().count() != len,
                None => false,
            };
            return FieldFeedback { value, invalid };
        }

        FieldFeedback::valid(current.to_string())
    }

    /// Decides whether a keystroke reaches the field.
    pub fn key_down(&self, press: &KeyPress) -> KeyDecision {
        if !self.filter_keys {
            return KeyDecision::Allow;
        }
        match &press.key {
            Key::Backspace
            | Key::Delete
            | Key::Tab
            | Key::Escape
            | Key::Enter
            | Key::Home
            | Key::End
            | Key::ArrowLeft
            | Key::ArrowRight
            | Key::ArrowUp
            | Key::ArrowDown => KeyDecision::Allow,
            Key::Char(c) if press.ctrl && matches!(c.to_ascii_lowercase(), 'a' | 'c' | 'v' | 'x' | 'z') => {
                KeyDecision::Allow
            }
            Key::Char(c) if self.policy.allows(*c) => KeyDecision::Allow,
            _ => KeyDecision::Block,
        }
    }
}

/// Integer prefix of `s`, the way a lenient number parse reads it.
fn leading_integer(s: &str) -> Option<i64> {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<i64>().ok().map(|n| sign * n)
}

// =============================================================================
// Events
// =============================================================================

/// An editing event on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The field's raw value after a keystroke.
    Input(String),
    /// Clipboard text pasted over the field. Replaces the whole value.
    Paste(String),
    Focus,
    Blur,
}

/// New field value plus whether to draw the error style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFeedback {
    pub value: String,
    pub invalid: bool,
}

impl FieldFeedback {
    fn valid(value: String) -> Self {
        FieldFeedback {
            value,
            invalid: false,
        }
    }
}

/// Keys the phone field distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
    Tab,
    Escape,
    Enter,
    Home,
    End,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    /// Function keys and anything else without a character.
    Other,
}

impl Key {
    /// Parses a DOM-style key name (`"Backspace"`, `"ArrowLeft"`, `"7"`).
    pub fn from_name(name: &str) -> Key {
        match name {
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            "Home" => Key::Home,
            "End" => Key::End,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        KeyPress { key, ctrl: false }
    }

    pub fn ctrl(key: Key) -> Self {
        KeyPress { key, ctrl: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDecision {
    Allow,
    Block,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input(s: &str) -> FieldEvent {
        FieldEvent::Input(s.to_string())
    }

    #[test]
    fn test_phone_input_strips_and_truncates() {
        let phone = FieldSanitizer::PHONE;
        assert_eq!(phone.apply("", &input("555-123-4567 ext 89")).value, "5551234567");
        assert_eq!(phone.apply("", &input("abc")).value, "");
    }

    #[test]
    fn test_phone_paste() {
        let feedback = FieldSanitizer::PHONE.apply("999", &FieldEvent::Paste("(555) 123-4567".into()));
        assert_eq!(feedback.value, "5551234567");
    }

    #[test]
    fn test_phone_sanitizing_is_idempotent() {
        let phone = FieldSanitizer::PHONE;
        let once = phone.clean("5551234567");
        assert_eq!(once, "5551234567");
        assert_eq!(phone.clean(&once), once);
        assert_eq!(phone.apply(&once, &FieldEvent::Focus).value, once);
    }

    #[test]
    fn test_phone_blur_flags_partial_numbers() {
        let phone = FieldSanitizer::PHONE;
        assert!(phone.apply("55512", &FieldEvent::Blur).invalid);
        assert!(!phone.apply("", &FieldEvent::Blur).invalid);
        assert!(!phone.apply("5551234567", &FieldEvent::Blur).invalid);
    }

    #[test]
    fn test_phone_keydown() {
        let phone = FieldSanitizer::PHONE;
        assert_eq!(phone.key_down(&KeyPress::plain(Key::Char('7'))), KeyDecision::Allow);
        assert_eq!(phone.key_down(&KeyPress::plain(Key::Backspace)), KeyDecision::Allow);
        assert_eq!(phone.key_down(&KeyPress::plain(Key::ArrowLeft)), KeyDecision::Allow);
        assert_eq!(phone.key_down(&KeyPress::ctrl(Key::Char('v'))), KeyDecision::Allow);
        assert_eq!(phone.key_down(&KeyPress::plain(Key::Char('v'))), KeyDecision::Block);
        assert_eq!(phone.key_down(&KeyPress::ctrl(Key::Char('b'))), KeyDecision::Block);
        assert_eq!(phone.key_down(&KeyPress::plain(Key::Char('-'))), KeyDecision::Block);
        assert_eq!(phone.key_down(&KeyPress::plain(Key::Other)), KeyDecision::Block);
    }

    #[test]
    fn test_quantity_input_coerces_to_one() {
        let qty = FieldSanitizer::QUANTITY;
        assert_eq!(qty.apply("", &input("0")).value, "1");
        assert_eq!(qty.apply("", &input("")).value, "1");
        assert_eq!(qty.apply("", &input("1a2")).value, "12");
    }

    #[test]
    fn test_quantity_blur() {
        let qty = FieldSanitizer::QUANTITY;
        assert_eq!(qty.apply("0", &FieldEvent::Blur).value, "1");
        assert_eq!(qty.apply("  ", &FieldEvent::Blur).value, "1");
        assert_eq!(qty.apply("-3", &FieldEvent::Blur).value, "1");
        assert_eq!(qty.apply("4", &FieldEvent::Blur).value, "4");
    }

    #[test]
    fn test_name_input() {
        let name = FieldSanitizer::NAME;
        assert_eq!(name.apply("", &input("Abe's #1 Wood & Co.")).value, "Abe's  Wood & Co.");
        assert_eq!(name.key_down(&KeyPress::plain(Key::Char('9'))), KeyDecision::Allow);
    }

    #[test]
    fn test_for_field() {
        assert_eq!(FieldSanitizer::for_field(FormField::ContactNo), Some(FieldSanitizer::PHONE));
        assert_eq!(FieldSanitizer::for_field(FormField::City), Some(FieldSanitizer::NAME));
        assert_eq!(FieldSanitizer::for_field(FormField::StoreId), None);
    }

    #[test]
    fn test_key_from_name() {
        assert_eq!(Key::from_name("ArrowUp"), Key::ArrowUp);
        assert_eq!(Key::from_name("x"), Key::Char('x'));
        assert_eq!(Key::from_name("F5"), Key::Other);
    }
}

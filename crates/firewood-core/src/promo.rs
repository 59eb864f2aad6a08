//! # Promo Codes
//!
//! Maps what the shopper typed into the promo box to a flat discount.
//!
//! ```text
//!   input (trimmed, lowercased)      outcome        discount   notice
//!   ───────────────────────────      ───────        ────────   ──────────────────────────────────
//!   "campfire10"                     Applied        $10.00     Promo code applied! $10 discount.
//!   ""                               Cleared        $0.00      Promo code cleared.
//!   anything else                    Invalid        $0.00      Invalid promo code.
//! ```

use crate::money::Money;

/// The one recognized code.
pub const PROMO_CODE: &str = "campfire10";

/// Discount granted by [`PROMO_CODE`].
pub const PROMO_DISCOUNT: Money = Money::from_dollars(10);

/// Result of resolving a promo input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoOutcome {
    Applied(Money),
    Cleared,
    Invalid,
}

impl PromoOutcome {
    /// The discount this outcome leaves in effect. Invalid input clears it.
    pub fn discount(&self) -> Money {
        match self {
            PromoOutcome::Applied(amount) => *amount,
            PromoOutcome::Cleared | PromoOutcome::Invalid => Money::zero(),
        }
    }

    /// Notice shown to the shopper.
    pub fn notice(&self) -> String {
        match self {
            PromoOutcome::Applied(amount) => {
                format!("Promo code applied! ${} discount.", amount.dollars())
            }
            PromoOutcome::Cleared => "Promo code cleared.".to_string(),
            PromoOutcome::Invalid => "Invalid promo code.".to_string(),
        }
    }
}

/// Resolves a promo input. Pure and repeatable.
pub fn resolve_promo(input: &str) -> PromoOutcome {
    let code = input.trim().to_lowercase();
    if code.is_empty() {
        PromoOutcome::Cleared
    } else if code == PROMO_CODE {
        PromoOutcome::Applied(PROMO_DISCOUNT)
    } else {
        PromoOutcome::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_code() {
        let outcome = resolve_promo("  CampFire10 ");
        assert_eq!(outcome, PromoOutcome::Applied(Money::from_cents(1000)));
        assert_eq!(outcome.notice(), "Promo code applied! $10 discount.");
    }

    #[test]
    fn test_empty_clears() {
        let outcome = resolve_promo("   ");
        assert_eq!(outcome, PromoOutcome::Cleared);
        assert!(outcome.discount().is_zero());
        assert_eq!(outcome.notice(), "Promo code cleared.");
    }

    #[test]
    fn test_unknown_code_is_invalid_and_clears() {
        let outcome = resolve_promo("campfire20");
        assert_eq!(outcome, PromoOutcome::Invalid);
        assert!(outcome.discount().is_zero());
        assert_eq!(outcome.notice(), "Invalid promo code.");
    }

    #[test]
    fn test_resolution_is_repeatable() {
        for input in ["campfire10", "", "nope"] {
            assert_eq!(resolve_promo(input), resolve_promo(input));
        }
    }
}

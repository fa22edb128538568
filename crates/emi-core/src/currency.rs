use serde::{Deserialize, Serialize};

use crate::loan::EmiResult;
use crate::types::Money;

/// Currency-formatted view of an EMI result. Presentation only; the
/// underlying [`EmiResult`] values are untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedEmi {
    pub monthly_payment: String,
    pub total_payable: String,
    pub total_interest: String,
}

/// Render an amount as Indian-format currency with no fractional digits,
/// e.g. `₹5,44,416`.
///
/// Grouping follows the Indian numbering system: the last three digits form
/// one group, then groups of two. Rounds half away from zero, matching the
/// `en-IN` display layer this mirrors; no paise are shown.
pub fn format_inr(amount: Money) -> String {
    let rounded = amount.round();
    if !rounded.is_finite() {
        return format!("₹{rounded}");
    }
    let grouped = group_indian(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Format all three fields of a result for display.
pub fn format_result(result: &EmiResult) -> FormattedEmi {
    FormattedEmi {
        monthly_payment: format_inr(result.monthly_payment),
        total_payable: format_inr(result.total_payable),
        total_interest: format_inr(result.total_interest),
    }
}

/// Indian digit grouping over a plain ASCII digit string.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts_ungrouped() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(7.0), "₹7");
        assert_eq!(format_inr(500.0), "₹500");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(1_000.0), "₹1,000");
        assert_eq!(format_inr(22_728.0), "₹22,728");
        assert_eq!(format_inr(100_000.0), "₹1,00,000");
        assert_eq!(format_inr(544_416.0), "₹5,44,416");
        assert_eq!(format_inr(10_000_000.0), "₹1,00,00,000");
        assert_eq!(format_inr(123_456_789.0), "₹12,34,56,789");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(format_inr(0.5), "₹1");
        assert_eq!(format_inr(2.5), "₹3");
        assert_eq!(format_inr(22_727.84), "₹22,728");
        assert_eq!(format_inr(22_727.49), "₹22,727");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_inr(-44_416.0), "-₹44,416");
        assert_eq!(format_inr(-0.5), "-₹1");
    }

    #[test]
    fn test_format_result() {
        let result = EmiResult {
            monthly_payment: 22_727.84,
            total_payable: 545_468.1,
            total_interest: 45_468.1,
        };
        let formatted = format_result(&result);
        assert_eq!(formatted.monthly_payment, "₹22,728");
        assert_eq!(formatted.total_payable, "₹5,45,468");
        assert_eq!(formatted.total_interest, "₹45,468");
    }
}

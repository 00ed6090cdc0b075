//! Display formatting for currency amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Whole currency units with Indian digit grouping: `1234567.4 → "12,34,567"`.
pub fn format_inr(amount: Decimal) -> String {
    let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = whole.abs().trunc().to_string();
    let grouped = group_indian(&digits);
    if whole.is_sign_negative() && !whole.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// [`format_inr`] with the rupee sign.
pub fn format_inr_currency(amount: Decimal) -> String {
    let formatted = format_inr(amount);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-₹{rest}"),
        None => format!("₹{formatted}"),
    }
}

// Last three digits, then groups of two.
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

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_small_amounts() {
        assert_eq!(format_inr(dec!(0)), "0");
        assert_eq!(format_inr(dec!(999)), "999");
        assert_eq!(format_inr(dec!(4339.12)), "4,339");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(dec!(100000)), "1,00,000");
        assert_eq!(format_inr(dec!(1234567)), "12,34,567");
        assert_eq!(format_inr(dec!(541387.88)), "5,41,388");
        assert_eq!(format_inr(dec!(123456789012)), "1,23,45,67,89,012");
    }

    #[test]
    fn test_rounding_and_sign() {
        assert_eq!(format_inr(dec!(999.5)), "1,000");
        assert_eq!(format_inr(dec!(-1500.4)), "-1,500");
        assert_eq!(format_inr(dec!(-0.4)), "0");
    }

    #[test]
    fn test_currency_prefix() {
        assert_eq!(format_inr_currency(dec!(500000)), "₹5,00,000");
        assert_eq!(format_inr_currency(dec!(-25000)), "-₹25,000");
    }
}

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to 2 decimal places, half-to-even on the exact decimal value
pub fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Render a percentage rounded to 2 places, e.g. `"12.3%"` or `"0.0%"`
///
/// Trailing zeros are trimmed but one fractional digit always remains.
pub fn format_percentage(value: Decimal) -> String {
    let rounded = round_price(value);
    if rounded.is_zero() {
        return "0.0%".to_string();
    }

    let normalized = rounded.normalize();
    if normalized.scale() == 0 {
        format!("{}.0%", normalized)
    } else {
        format!("{}%", normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_half_to_even_boundaries() {
        assert_eq!(round_price(dec("1.005")), dec("1.00"));
        assert_eq!(round_price(dec("1.015")), dec("1.02"));
        assert_eq!(round_price(dec("2.675")), dec("2.68"));
        assert_eq!(round_price(dec("-1.005")), dec("-1.00"));
        assert_eq!(round_price(dec("1.0051")), dec("1.01"));
    }

    #[test]
    fn test_round_keeps_two_places() {
        assert_eq!(round_price(dec("12.3456")), dec("12.35"));
        assert_eq!(round_price(dec("7")), dec("7"));
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(Decimal::ZERO), "0.0%");
        assert_eq!(format_percentage(dec("-0.001")), "0.0%");
        assert_eq!(format_percentage(dec("100")), "100.0%");
        assert_eq!(format_percentage(dec("12.30")), "12.3%");
        assert_eq!(format_percentage(dec("-8.3333333")), "-8.33%");
        assert_eq!(format_percentage(dec("29.4117647")), "29.41%");
    }
}

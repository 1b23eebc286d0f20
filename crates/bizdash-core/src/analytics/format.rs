use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Money, Percent};

/// Whole-dollar en-US currency, e.g. `$1,235` or `-$40`.
pub fn format_currency(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let grouped = group_thousands(&digits);
    if rounded < Decimal::ZERO {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// One decimal place with a trailing percent sign, e.g. `16.7%`.
pub fn format_percentage(value: Percent) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", rounded)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_rounds_to_whole_units() {
        assert_eq!(format_currency(dec!(1234.5)), "$1,235");
        assert_eq!(format_currency(dec!(26249.9999)), "$26,250");
        assert_eq!(format_currency(dec!(0)), "$0");
        assert_eq!(format_currency(dec!(999)), "$999");
        assert_eq!(format_currency(dec!(1000000)), "$1,000,000");
    }

    #[test]
    fn test_currency_negative_amounts() {
        assert_eq!(format_currency(dec!(-40)), "-$40");
        assert_eq!(format_currency(dec!(-1500.4)), "-$1,500");
        // Rounds to zero, so no sign.
        assert_eq!(format_currency(dec!(-0.4)), "$0");
    }

    #[test]
    fn test_percentage_one_decimal_place() {
        assert_eq!(format_percentage(dec!(16.666)), "16.7%");
        assert_eq!(format_percentage(dec!(0)), "0.0%");
        assert_eq!(format_percentage(dec!(-12.25)), "-12.3%");
        assert_eq!(format_percentage(dec!(150)), "150.0%");
    }
}

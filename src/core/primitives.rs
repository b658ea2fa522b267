use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const LABEL_DECIMALS: u32 = 2;

/// Formats a value for axis labels and markup coordinates.
///
/// Integral values print without a decimal point; everything else is
/// rounded half away from zero to two decimals with trailing zeros trimmed.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_owned();
    }
    if value == value.trunc() {
        return format!("{value:.0}");
    }

    match Decimal::from_f64(value) {
        Some(decimal) => decimal
            .round_dp_with_strategy(LABEL_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string(),
        None => {
            let fixed = format!("{value:.2}");
            fixed.trim_end_matches('0').trim_end_matches('.').to_owned()
        }
    }
}

/// Formats a share as a percentage with one decimal, e.g. `33.3`.
#[must_use]
pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage:.1}")
}

#[cfg(test)]
mod tests {
    use super::{format_number, format_percentage};

    #[test]
    fn integral_values_have_no_decimal_point() {
        assert_eq!(format_number(30.0), "30");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1_000_000.0), "1000000");
    }

    #[test]
    fn fractional_values_trim_trailing_zeros() {
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(12.50001), "12.5");
        assert_eq!(format_number(0.125), "0.13");
        assert_eq!(format_number(-2.333), "-2.33");
        assert_eq!(format_number(7.999), "8");
    }

    #[test]
    fn percentages_keep_one_decimal() {
        assert_eq!(format_percentage(50.0), "50.0");
        assert_eq!(format_percentage(33.3), "33.3");
    }
}

use rust_decimal::Decimal;

use crate::error::EmiError;
use crate::types::{Money, Rate};
use crate::EmiResult;

/// Compound growth factor `(1 + rate)^nper`.
///
/// Multiplied out period by period, so it matches a factor accumulated
/// month by month to the last digit.
pub fn compound_factor(rate: Rate, nper: u32) -> Decimal {
    let growth = Decimal::ONE + rate;
    (0..nper).fold(Decimal::ONE, |acc, _| acc * growth)
}

/// Level payment that retires `present_value` over `nper` periods at `rate`.
///
/// Evaluated as `PV·r / (1 − (1+r)^−n)`, which is algebraically the usual
/// `PV·r·(1+r)^n / ((1+r)^n − 1)` but never multiplies the principal by the
/// compound factor. A zero rate degenerates to straight-line repayment.
pub fn level_payment(rate: Rate, nper: u32, present_value: Money) -> EmiResult<Money> {
    if nper == 0 {
        return Err(EmiError::invalid("nper", "Number of periods must be > 0"));
    }

    if rate.is_zero() {
        return Ok(present_value / Decimal::from(nper));
    }

    let factor = compound_factor(rate, nper);
    let denominator = Decimal::ONE - Decimal::ONE / factor;

    if denominator.is_zero() {
        return Err(EmiError::invalid(
            "rate",
            "Rate too small to amortize over this many periods",
        ));
    }

    Ok(present_value * rate / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_level_payment_basic() {
        // 100,000 at 1% per period over 12 periods ≈ 8,884.88
        let result = level_payment(dec!(0.01), 12, dec!(100_000)).unwrap();
        assert!((result - dec!(8884.88)).abs() < dec!(0.01));
    }

    #[test]
    fn test_level_payment_zero_rate() {
        let result = level_payment(Decimal::ZERO, 4, dec!(1000)).unwrap();
        assert_eq!(result, dec!(250));
    }

    #[test]
    fn test_level_payment_zero_periods() {
        assert!(level_payment(dec!(0.01), 0, dec!(1000)).is_err());
    }

    #[test]
    fn test_compound_factor_one_period() {
        assert_eq!(compound_factor(dec!(0.05), 1), dec!(1.05));
    }
}

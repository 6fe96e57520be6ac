use crate::error::Res;
use anyhow::Context;
use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits kept in a percentage.
pub const PERCENT_DP: u32 = 2;

/// `amount` as a percentage of `total`, rounded half-up to two decimal places. A zero total
/// yields zero.
pub fn percentage(amount: Decimal, total: Decimal) -> Res<Decimal> {
    if total.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let share = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(total))
        .with_context(|| format!("Cannot express {amount} as a percentage of {total}"))?;
    Ok(share.round_dp_with_strategy(PERCENT_DP, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_total() {
        assert_eq!(percentage(dec!(0), dec!(0)).unwrap(), Decimal::ZERO);
        assert_eq!(percentage(dec!(5000), dec!(0)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(percentage(dec!(328830), dec!(549957)).unwrap(), dec!(59.79));
        assert_eq!(percentage(dec!(132687), dec!(549957)).unwrap(), dec!(24.13));
        assert_eq!(percentage(dec!(88440), dec!(549957)).unwrap(), dec!(16.08));
        assert_eq!(percentage(dec!(1), dec!(3)).unwrap(), dec!(33.33));
        assert_eq!(percentage(dec!(2), dec!(3)).unwrap(), dec!(66.67));
    }

    #[test]
    fn test_half_up() {
        // 1 / 800 = 0.125%
        assert_eq!(percentage(dec!(1), dec!(800)).unwrap(), dec!(0.13));
        // 1 / 1600 = 0.0625%
        assert_eq!(percentage(dec!(1), dec!(1600)).unwrap(), dec!(0.06));
    }

    #[test]
    fn test_whole() {
        assert_eq!(percentage(dec!(549957), dec!(549957)).unwrap(), dec!(100));
        assert_eq!(percentage(dec!(250), dec!(1000)).unwrap(), dec!(25));
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let huge = Decimal::MAX / Decimal::TEN;
        assert!(percentage(huge, huge).is_err());
    }
}

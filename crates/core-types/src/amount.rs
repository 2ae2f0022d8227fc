//! Overflow-safe arithmetic on stored amounts.
//!
//! `Decimal` panics once a result passes roughly 7.9e28. Stored quantities and
//! prices are not bounded, so products and sums of them clamp to the
//! representable range instead.

use rust_decimal::Decimal;

fn clamp(op: &'static str, negative: bool) -> Decimal {
    tracing::debug!(op, negative, "Amount out of range; clamped.");
    if negative { Decimal::MIN } else { Decimal::MAX }
}

pub fn add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b)
        .unwrap_or_else(|| clamp("add", a.is_sign_negative()))
}

pub fn sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b)
        .unwrap_or_else(|| clamp("sub", a.is_sign_negative()))
}

pub fn mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b)
        .unwrap_or_else(|| clamp("mul", a.is_sign_negative() != b.is_sign_negative()))
}

/// Zero when `b` is zero.
pub fn div(a: Decimal, b: Decimal) -> Decimal {
    if b.is_zero() {
        return Decimal::ZERO;
    }
    a.checked_div(b)
        .unwrap_or_else(|| clamp("div", a.is_sign_negative() != b.is_sign_negative()))
}

pub fn sum<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().fold(Decimal::ZERO, add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_in_range_arithmetic_is_exact() {
        assert_eq!(add(dec!(1.25), dec!(2)), dec!(3.25));
        assert_eq!(sub(dec!(1), dec!(2.5)), dec!(-1.5));
        assert_eq!(mul(dec!(3), dec!(-1.5)), dec!(-4.5));
        assert_eq!(div(dec!(10), dec!(4)), dec!(2.5));
        assert_eq!(sum([dec!(1), dec!(2), dec!(3)]), dec!(6));
    }

    #[test]
    fn test_overflow_clamps_with_sign() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(20), 0);
        let big = Decimal::from_i128_with_scale(10_i128.pow(25), 0);
        assert_eq!(mul(huge, huge), Decimal::MAX);
        assert_eq!(mul(-huge, huge), Decimal::MIN);
        assert_eq!(add(Decimal::MAX, Decimal::ONE), Decimal::MAX);
        assert_eq!(sub(Decimal::MIN, Decimal::ONE), Decimal::MIN);
        assert_eq!(div(big, dec!(0.0000001)), Decimal::MAX);
        assert_eq!(sum([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
    }

    #[test]
    fn test_division_by_zero_is_zero() {
        assert_eq!(div(dec!(5), Decimal::ZERO), Decimal::ZERO);
    }
}

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with thousands grouping and two decimals, e.g. `-1,234.50`.
pub fn format_currency(amount: Decimal) -> String {
    CurrencyFormat::default().format(amount)
}

/// Same as [`format_currency`], with a missing amount treated as zero.
pub fn format_currency_opt(amount: Option<Decimal>) -> String {
    format_currency(amount.unwrap_or_default())
}

/// Display settings for amounts. There is a single implicit currency; the symbol
/// is purely cosmetic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
}

impl CurrencyFormat {
    pub fn with_symbol(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into() }
    }

    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

        let digits = format!("{:.2}", rounded.abs());
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        format!("{sign}{}{}.{fraction}", self.symbol, group_thousands(whole))
    }
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format_currency(dec!(0)), "0.00");
        assert_eq!(format_currency(dec!(999.5)), "999.50");
        assert_eq!(format_currency(dec!(1234.5)), "1,234.50");
        assert_eq!(format_currency(dec!(1234567.891)), "1,234,567.89");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec!(2.345)), "2.35");
        assert_eq!(format_currency(dec!(-2.345)), "-2.35");
    }

    #[test]
    fn test_negative_amounts_keep_sign_before_symbol() {
        let format = CurrencyFormat::with_symbol("Rs. ");
        assert_eq!(format.format(dec!(-1500)), "-Rs. 1,500.00");
        assert_eq!(format.format(dec!(-0.001)), "Rs. 0.00");
    }

    #[test]
    fn test_missing_amount_is_zero() {
        assert_eq!(format_currency_opt(None), "0.00");
        assert_eq!(format_currency_opt(Some(dec!(12))), "12.00");
    }
}

use rust_decimal::{Decimal, RoundingStrategy};

const FRACTION_DIGITS: u32 = 2;

/// Display convention for amounts in the account currency.
///
/// Every amount shares one currency, so a single convention is applied to
/// totals, burn rates and list rows alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// Currency code printed in front of the digits.
    pub code: &'static str,
    /// Separator inserted between groups of three integer digits.
    pub group_separator: char,
    /// Separator between the integer and the fraction digits.
    pub decimal_separator: char
}

impl CurrencyFormat {
    pub const CHF: CurrencyFormat = CurrencyFormat {
        code: "CHF",
        group_separator: '\'',
        decimal_separator: '.'
    };

    /// Renders `amount` with two fraction digits and a leading `-` for outflows.
    pub fn format(&self, amount: Decimal) -> String {
        self.render(amount, false)
    }

    /// Same as [`CurrencyFormat::format`], but inflows carry an explicit `+`.
    pub fn format_signed(&self, amount: Decimal) -> String {
        self.render(amount, true)
    }

    fn render(&self, amount: Decimal, explicit_plus: bool) -> String {
        let rounded = amount.round_dp_with_strategy(FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero);

        let sign = if rounded.is_zero() {
            ""
        } else if rounded.is_sign_negative() {
            "-"
        } else if explicit_plus {
            "+"
        } else {
            ""
        };

        let digits = format!("{:.2}", rounded.abs());
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
        for (index, digit) in integer.chars().enumerate() {
            if index > 0 && (integer.len() - index) % 3 == 0 {
                grouped.push(self.group_separator);
            }
            grouped.push(digit);
        }

        format!("{sign}{} {grouped}{}{fraction}", self.code, self.decimal_separator)
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::CHF
    }
}

/// Formats an amount with the default account currency convention.
pub fn format_currency(amount: Decimal) -> String {
    CurrencyFormat::CHF.format(amount)
}

/// Formats an amount for list rows, where inflows are prefixed with `+`.
pub fn format_signed(amount: Decimal) -> String {
    CurrencyFormat::CHF.format_signed(amount)
}

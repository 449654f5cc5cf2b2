use alloy::primitives::{
    U256,
    utils::{ParseUnits, format_units, parse_units},
};
use color_eyre::eyre::{self, Context as _};

/// Number of fractional digits kept by [`fixed_value`].
const DISPLAY_FRACTION_DIGITS: usize = 4;

/// The amount field: the text as typed and its value in token base units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountInput {
    display: String,
    raw: U256,
}

impl Default for AmountInput {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            raw: U256::ZERO,
        }
    }
}

impl AmountInput {
    /// Parses `text` as a decimal number scaled by `decimals`.
    ///
    /// Empty, negative or malformed input keeps its text but has a raw value of zero,
    /// which leaves the submit button disabled.
    pub fn parse(text: &str, decimals: u8) -> Self {
        let trimmed = text.trim();
        let raw = if is_plain_decimal(trimmed) {
            match parse_units(trimmed, decimals) {
                Ok(ParseUnits::U256(value)) => value,
                _ => U256::ZERO,
            }
        } else {
            U256::ZERO
        };

        Self {
            display: text.to_string(),
            raw,
        }
    }

    /// Copies a fetched balance verbatim.
    pub fn from_balance(balance: &Balance) -> Self {
        Self {
            display: balance.formatted.clone(),
            raw: balance.value,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn raw(&self) -> U256 {
        self.raw
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }
}

/// ASCII digits with at most one `.`. Anything else never reaches `parse_units`,
/// which slices its input by byte offset.
fn is_plain_decimal(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_digit())
        && text.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && text.bytes().filter(|&b| b == b'.').count() <= 1
}

/// A token balance as returned by the balance query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub value: U256,
    /// `value` in whole tokens, without trailing fractional zeros
    pub formatted: String,
}

impl Balance {
    pub fn new(value: U256, decimals: u8) -> eyre::Result<Self> {
        let full = format_units(value, decimals)
            .wrap_err_with(|| format!("failed to format balance with {decimals} decimals"))?;
        let formatted = if full.contains('.') {
            full.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            full
        };

        Ok(Self { value, formatted })
    }
}

/// Formats a decimal string for display: the integer part gets thousands
/// separators and the fraction is truncated (not rounded) to four digits.
///
/// A non-numeric integer part renders as `0`.
pub fn fixed_value(value: &str) -> String {
    let value = value.trim();
    let (int, frac) = value.split_once('.').unwrap_or((value, ""));
    let (sign, digits) = match int.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", int),
    };

    let digits = if digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.trim_start_matches('0')
    } else {
        ""
    };
    let grouped = if digits.is_empty() {
        "0".to_string()
    } else {
        group_thousands(digits)
    };
    let sign = if digits.is_empty() { "" } else { sign };

    let frac: String = frac.chars().take(DISPLAY_FRACTION_DIGITS).collect();
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

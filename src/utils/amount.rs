use ethers::types::U256;
use ethers::utils::{format_units, parse_units, ParseUnits};

use crate::error::TipError;

/// Converts a human-entered amount into base units (`amount * 10^decimals`).
pub fn parse_amount(input: &str, decimals: u8) -> Result<U256, TipError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TipError::InvalidAmount("amount is empty".to_string()));
    }
    if trimmed.starts_with('-') {
        return Err(TipError::InvalidAmount(format!("{trimmed} is negative")));
    }

    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(TipError::InvalidAmount(format!("{trimmed} is not a number")));
    }
    // parse_units silently truncates extra digits
    if fraction.len() > decimals as usize {
        return Err(TipError::InvalidAmount(format!(
            "{trimmed} has more than {decimals} decimals"
        )));
    }
    // U256 holds 77 full decimal digits
    if whole.trim_start_matches('0').len() + decimals as usize > 77 {
        return Err(TipError::InvalidAmount(format!("{trimmed} is too large")));
    }

    let value = match parse_units(trimmed, decimals as u32) {
        Ok(ParseUnits::U256(value)) => value,
        Ok(ParseUnits::I256(_)) => {
            return Err(TipError::InvalidAmount(format!("{trimmed} is negative")))
        }
        Err(e) => return Err(TipError::InvalidAmount(format!("{trimmed}: {e}"))),
    };

    if value.is_zero() {
        return Err(TipError::InvalidAmount(
            "amount must be greater than zero".to_string(),
        ));
    }
    Ok(value)
}

pub fn ensure_sufficient_balance(amount: U256, balance: U256) -> Result<(), TipError> {
    if amount > balance {
        return Err(TipError::InsufficientBalance {
            needed: amount,
            available: balance,
        });
    }
    Ok(())
}

/// Renders base units with trailing zeros trimmed, e.g. `1.5` rather than
/// `1.500000000000000000`.
pub fn format_amount(value: U256, decimals: u8) -> String {
    match format_units(value, decimals as u32) {
        Ok(formatted) if formatted.contains('.') => formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string(),
        Ok(formatted) => formatted,
        Err(_) => value.to_string(),
    }
}

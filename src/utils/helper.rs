use std::str::FromStr;

use num_bigint::{BigInt, BigUint};
use bigdecimal::BigDecimal;
use solana_sdk::pubkey::Pubkey;

use crate::error::WalletError;

/// Lamports per SOL, as a power of ten
pub const SOL_DECIMALS: u8 = 9;

/// Parse a wallet address, rejecting anything that is not a 32-byte base58 key.
///
/// Short base58 strings such as `abc123` are rejected too: they decode, but not to 32 bytes.
pub fn parse_address(s: &str) -> Result<Pubkey, WalletError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(WalletError::InvalidAddress {
            address: s.to_string(),
            reason: "address is empty".to_string(),
        });
    }

    Pubkey::from_str(trimmed).map_err(|e| WalletError::InvalidAddress {
        address: s.to_string(),
        reason: e.to_string(),
    })
}

/// Convert lamports to SOL without going through floats
pub fn lamports_to_sol(lamports: u64) -> BigDecimal {
    BigDecimal::new(BigInt::from(lamports), i64::from(SOL_DECIMALS))
}

/// Split an integer digit string into integer and fractional parts at `decimals`.
/// The fractional part is always exactly `decimals` digits long.
pub fn split_scaled(raw: &str, decimals: u8) -> (String, String) {
    let digits = raw.trim_start_matches('0');
    let decimals = usize::from(decimals);

    if digits.len() <= decimals {
        ("0".to_string(), format!("{:0>width$}", digits, width = decimals))
    } else {
        let (int, frac) = digits.split_at(digits.len() - decimals);
        (int.to_string(), frac.to_string())
    }
}

/// `raw / 10^decimals` as a plain decimal string, trailing zeros removed
pub fn plain_amount(raw: &str, decimals: u8) -> String {
    let (int, frac) = split_scaled(raw, decimals);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        int
    } else {
        format!("{}.{}", int, frac)
    }
}

/// Insert thousands separators into a run of digits
pub fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Dashboard amount formatting.
///
/// Amounts of at least one are rounded half-up to a whole number and grouped
/// by thousands. Smaller amounts keep up to six significant digits.
pub fn format_token_amount(raw: &str, decimals: u8) -> String {
    let (int, frac) = split_scaled(raw, decimals);

    if int != "0" {
        let mut whole = BigUint::from_str(&int).unwrap_or_default();
        if frac.as_bytes().first().is_some_and(|d| *d >= b'5') {
            whole += 1u32;
        }
        return group_thousands(&whole.to_string());
    }

    let Some(lead) = frac.find(|c: char| c != '0') else {
        return "0".to_string();
    };

    let keep = (lead + 6).min(frac.len());
    let mut significant = BigUint::from_str(&frac[..keep]).unwrap_or_default();
    if frac.as_bytes().get(keep).is_some_and(|d| *d >= b'5') {
        significant += 1u32;
    }

    let digits = format!("{:0>width$}", significant.to_string(), width = keep);
    if digits.len() > keep {
        // rounded up to a whole unit
        return "1".to_string();
    }
    format!("0.{}", digits.trim_end_matches('0'))
}

/// Non-negative decimal rounded half-up to a fixed number of places
pub fn format_fixed(value: &BigDecimal, places: u8) -> String {
    let (scaled, _) = value
        .with_scale(i64::from(places) + 1)
        .as_bigint_and_exponent();

    let mut rounded = scaled.magnitude().clone();
    rounded += 5u32;
    rounded /= 10u32;

    let (int, frac) = split_scaled(&rounded.to_string(), places);
    if frac.is_empty() {
        int
    } else {
        format!("{}.{}", int, frac)
    }
}

/// Shorten an address for display, e.g. `5Q544f...ge4j1`
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Placeholder label for a token without a logo
pub fn logo_initials(symbol: &str) -> String {
    symbol.chars().take(2).collect::<String>().to_uppercase()
}

/// Truncate a string to a maximum number of characters
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

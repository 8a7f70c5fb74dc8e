use std::collections::HashMap;
use std::str::FromStr;

use num_bigint::BigInt;
use bigdecimal::BigDecimal;
use serde::Serialize;

use crate::utils::helper::plain_amount;

/// Sentinel used for name and symbol when the registry has no entry for a mint.
pub const UNKNOWN_TOKEN: &str = "Unknown";

/// A fungible token held by the wallet, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenHolding {
    pub mint: String,
    /// Integer amount in the token's smallest unit, canonical decimal digits.
    pub raw_amount: String,
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl TokenHolding {
    /// Exact display amount, `raw_amount / 10^decimals`
    pub fn display_amount(&self) -> BigDecimal {
        BigInt::from_str(&self.raw_amount)
            .map(|raw| BigDecimal::new(raw, i64::from(self.decimals)))
            .unwrap_or_default()
    }

    /// Display amount as a plain decimal string without trailing zeros
    pub fn ui_amount_string(&self) -> String {
        plain_amount(&self.raw_amount, self.decimals)
    }

    /// True when the registry could not resolve this mint
    pub fn is_unknown(&self) -> bool {
        self.symbol == UNKNOWN_TOKEN && self.name == UNKNOWN_TOKEN
    }
}

/// Registry reference data for one mint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadataEntry {
    pub mint_address: String,
    pub name: Option<String>,
    pub symbol: String,
    pub decimals: Option<u8>,
    pub logo_url: Option<String>,
}

/// Mint-keyed lookup over registry entries
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    entries: HashMap<String, TokenMetadataEntry>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any previous one for the same mint
    pub fn insert(&mut self, entry: TokenMetadataEntry) {
        self.entries.insert(entry.mint_address.clone(), entry);
    }

    pub fn get(&self, mint: &str) -> Option<&TokenMetadataEntry> {
        self.entries.get(mint)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<TokenMetadataEntry> for TokenRegistry {
    fn from_iter<I: IntoIterator<Item = TokenMetadataEntry>>(iter: I) -> Self {
        let mut registry = Self::new();
        for entry in iter {
            registry.insert(entry);
        }
        registry
    }
}

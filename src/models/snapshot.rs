use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::activity::TransactionRecord;
use super::collectible::NftAsset;
use super::defi::DefiPosition;
use super::token::TokenHolding;
use crate::error::WalletError;

/// One complete aggregation result for a wallet. Never mutated after it is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSnapshot {
    pub sol_balance: BigDecimal,
    pub tokens: Vec<TokenHolding>,
    pub nfts: Vec<NftAsset>,
    pub recent_transactions: Vec<TransactionRecord>,
    pub defi_positions: Vec<DefiPosition>,
    #[serde(rename = "totalPortfolioValueUSD")]
    pub total_portfolio_value_usd: Decimal,
    pub last_updated: DateTime<Utc>,
}

impl WalletSnapshot {
    /// A snapshot with zero balances and no holdings
    pub fn empty(last_updated: DateTime<Utc>) -> Self {
        Self {
            sol_balance: BigDecimal::default(),
            tokens: Vec::new(),
            nfts: Vec::new(),
            recent_transactions: Vec::new(),
            defi_positions: Vec::new(),
            total_portfolio_value_usd: Decimal::ZERO,
            last_updated,
        }
    }

    /// Check if snapshot holds nothing at all
    pub fn is_empty(&self) -> bool {
        self.sol_balance == BigDecimal::default()
            && self.tokens.is_empty()
            && self.nfts.is_empty()
            && self.recent_transactions.is_empty()
            && self.defi_positions.is_empty()
    }

    /// Holdings in display order: byte-wise by symbol, ties keep fetch order.
    pub fn tokens_by_symbol(&self) -> Vec<&TokenHolding> {
        let mut tokens: Vec<&TokenHolding> = self.tokens.iter().collect();
        tokens.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        tokens
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Aggregation result that never fails, with the failure reported alongside.
///
/// On failure `snapshot` is zeroed and `failure` says why, so an empty
/// wallet and a failed fetch can be told apart.
#[derive(Debug, Clone)]
pub struct AggregationReport {
    pub snapshot: WalletSnapshot,
    pub failure: Option<WalletError>,
}

impl AggregationReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::token::UNKNOWN_TOKEN;

    fn holding(mint: &str, symbol: &str) -> TokenHolding {
        TokenHolding {
            mint: mint.to_string(),
            raw_amount: "1".to_string(),
            decimals: 0,
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            logo_url: None,
        }
    }

    #[test]
    fn tokens_sort_case_sensitive_and_stable() {
        let mut snapshot = WalletSnapshot::empty(Utc::now());
        snapshot.tokens = vec![
            holding("a", "usdc"),
            holding("b", "Sol"),
            holding("c", UNKNOWN_TOKEN),
            holding("d", "BONK"),
            holding("e", UNKNOWN_TOKEN),
            holding("f", "Sol"),
        ];

        let order: Vec<&str> = snapshot
            .tokens_by_symbol()
            .iter()
            .map(|t| t.mint.as_str())
            .collect();
        assert_eq!(order, vec!["d", "b", "f", "c", "e", "a"]);
    }

    #[test]
    fn empty_snapshot_is_empty() {
        let snapshot = WalletSnapshot::empty(Utc::now());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.total_portfolio_value_usd, Decimal::ZERO);
    }
}

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, info, warn};

use super::normalize::{build_nft_assets, build_token_holdings, build_transactions};
use crate::config::AggregatorConfig;
use crate::error::WalletError;
use crate::models::{AggregationReport, DefiPosition, TokenHolding, TokenRegistry, WalletSnapshot};
use crate::traits::{TokenRegistrySource, WalletDataProvider};
use crate::utils::helper::{lamports_to_sol, parse_address};

/// Builds wallet snapshots from a data provider and a token registry
pub struct WalletAggregator {
    data_provider: Arc<dyn WalletDataProvider>,
    registry: Arc<dyn TokenRegistrySource>,
    config: AggregatorConfig,
    /// Last completion time per wallet; one entry per wallet ever aggregated,
    /// kept for the aggregator's lifetime
    last_stamps: Arc<DashMap<Pubkey, DateTime<Utc>>>,
}

impl WalletAggregator {
    /// Create a new aggregator
    pub fn new(
        data_provider: Arc<dyn WalletDataProvider>,
        registry: Arc<dyn TokenRegistrySource>,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            data_provider,
            registry,
            config,
            last_stamps: Arc::new(DashMap::new()),
        }
    }

    /// Aggregate without ever failing.
    ///
    /// Any failure, including an invalid address, yields a zeroed snapshot with
    /// the cause recorded in `failure`.
    pub async fn aggregate(&self, address: &str) -> AggregationReport {
        let wallet = match parse_address(address) {
            Ok(wallet) => wallet,
            Err(e) => {
                warn!("Rejected wallet address {:?}: {}", address, e);
                return AggregationReport {
                    snapshot: WalletSnapshot::empty(Utc::now()),
                    failure: Some(e),
                };
            }
        };

        match self.try_aggregate(&wallet).await {
            Ok(snapshot) => AggregationReport { snapshot, failure: None },
            Err(e) => {
                warn!("Aggregation failed for {} ({}): {}", wallet, e.kind(), e);
                AggregationReport {
                    snapshot: WalletSnapshot::empty(self.next_timestamp(&wallet)),
                    failure: Some(e),
                }
            }
        }
    }

    /// Aggregate one snapshot, reporting the first failed required fetch.
    ///
    /// The registry is advisory: when it is unavailable, holdings keep the
    /// `Unknown` sentinel instead of failing the pass.
    pub async fn try_aggregate(&self, wallet: &Pubkey) -> Result<WalletSnapshot, WalletError> {
        let timeout = self.config.request_timeout;

        let (lamports, registry, token_records, collectibles, transactions) = tokio::join!(
            bounded(timeout, self.data_provider.fetch_native_balance(wallet)),
            self.load_registry(timeout),
            bounded(timeout, self.data_provider.fetch_token_balances(wallet)),
            bounded(timeout, self.data_provider.fetch_collectibles(wallet)),
            bounded(timeout, self.data_provider.fetch_transactions(wallet)),
        );

        let sol_balance = lamports_to_sol(lamports?);
        let tokens = build_token_holdings(token_records?, &registry);
        let nfts = build_nft_assets(collectibles?);
        let recent_transactions = build_transactions(transactions?);

        info!(
            "Wallet {}: {} SOL, {} tokens with non-zero balance, {} NFTs, {} transactions",
            wallet,
            sol_balance,
            tokens.len(),
            nfts.len(),
            recent_transactions.len()
        );

        let defi_positions = self.defi_positions(wallet);
        let total_portfolio_value_usd = self.portfolio_value_usd(&sol_balance, &tokens);

        Ok(WalletSnapshot {
            sol_balance,
            tokens,
            nfts,
            recent_transactions,
            defi_positions,
            total_portfolio_value_usd,
            last_updated: self.next_timestamp(wallet),
        })
    }

    async fn load_registry(&self, timeout: Duration) -> Arc<TokenRegistry> {
        match tokio::time::timeout(timeout, self.registry.load_registry()).await {
            Ok(registry) => {
                debug!("Using registry with {} entries", registry.len());
                registry
            }
            Err(_) => {
                warn!("Token registry load timed out after {:?}", timeout);
                Arc::new(TokenRegistry::new())
            }
        }
    }

    /// Extension point: yield positions are not enumerated yet.
    fn defi_positions(&self, _wallet: &Pubkey) -> Vec<DefiPosition> {
        Vec::new()
    }

    /// Extension point: no price feed is wired in, so holdings are valued at zero.
    fn portfolio_value_usd(&self, _sol_balance: &BigDecimal, _tokens: &[TokenHolding]) -> Decimal {
        Decimal::ZERO
    }

    /// Completion time, nudged forward so it always exceeds the previous one for this wallet
    fn next_timestamp(&self, wallet: &Pubkey) -> DateTime<Utc> {
        let mut stamp = Utc::now();

        match self.last_stamps.entry(*wallet) {
            Entry::Occupied(mut last) => {
                if stamp <= *last.get() {
                    stamp = *last.get() + chrono::Duration::microseconds(1);
                }
                last.insert(stamp);
            }
            Entry::Vacant(slot) => {
                slot.insert(stamp);
            }
        }

        stamp
    }
}

/// Run a fetch with an upper time bound; expiry counts as a network failure
async fn bounded<T, F>(timeout: Duration, fetch: F) -> Result<T, WalletError>
where
    F: Future<Output = Result<T, WalletError>>,
{
    tokio::time::timeout(timeout, fetch).await?
}

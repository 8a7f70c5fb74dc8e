#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use tokio::sync::Mutex;

use solana_wallet_dashboard::models::raw::{RawCollectible, RawTokenBalance, RawTransaction};
use solana_wallet_dashboard::{
    PresenterState, TokenMetadataEntry, TokenRegistry, TokenRegistrySource, ViewPhase, WalletDataProvider,
    WalletError, WalletView,
};

#[derive(Debug, Clone, Default)]
pub struct FakeAccount {
    pub lamports: u64,
    pub tokens: Vec<RawTokenBalance>,
    pub nfts: Vec<RawCollectible>,
    pub transactions: Vec<RawTransaction>,
    pub delay: Duration,
}

/// In-memory wallet data keyed by address
#[derive(Default)]
pub struct FakeWalletData {
    accounts: HashMap<Pubkey, FakeAccount>,
    failures_left: AtomicUsize,
    pub balance_calls: AtomicUsize,
}

impl FakeWalletData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, wallet: Pubkey, account: FakeAccount) -> Self {
        self.accounts.insert(wallet, account);
        self
    }

    /// Make the next `n` native balance fetches fail
    pub fn failing_next(self, n: usize) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    fn account(&self, wallet: &Pubkey) -> FakeAccount {
        self.accounts.get(wallet).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl WalletDataProvider for FakeWalletData {
    async fn fetch_native_balance(&self, wallet: &Pubkey) -> Result<u64, WalletError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        let account = self.account(wallet);
        if !account.delay.is_zero() {
            tokio::time::sleep(account.delay).await;
        }

        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failing {
            return Err(WalletError::NetworkFailure("balance endpoint unreachable".to_string()));
        }

        Ok(account.lamports)
    }

    async fn fetch_token_balances(&self, wallet: &Pubkey) -> Result<Vec<RawTokenBalance>, WalletError> {
        Ok(self.account(wallet).tokens)
    }

    async fn fetch_collectibles(&self, wallet: &Pubkey) -> Result<Vec<RawCollectible>, WalletError> {
        Ok(self.account(wallet).nfts)
    }

    async fn fetch_transactions(&self, wallet: &Pubkey) -> Result<Vec<RawTransaction>, WalletError> {
        Ok(self.account(wallet).transactions)
    }
}

/// Registry that always returns the same entries (possibly none)
pub struct StaticRegistry {
    registry: Arc<TokenRegistry>,
}

impl StaticRegistry {
    pub fn new(entries: Vec<TokenMetadataEntry>) -> Self {
        Self {
            registry: Arc::new(entries.into_iter().collect()),
        }
    }

    /// Behaves like a registry whose endpoint is down
    pub fn unavailable() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl TokenRegistrySource for StaticRegistry {
    async fn load_registry(&self) -> Arc<TokenRegistry> {
        self.registry.clone()
    }
}

pub fn usdc_entry(mint: &str) -> TokenMetadataEntry {
    TokenMetadataEntry {
        mint_address: mint.to_string(),
        name: Some("USD Coin".to_string()),
        symbol: "USDC".to_string(),
        decimals: Some(6),
        logo_url: None,
    }
}

pub fn raw_balance(mint: &str, amount: &str, decimals: Option<u8>) -> RawTokenBalance {
    RawTokenBalance {
        mint: mint.to_string(),
        amount: Some(amount.to_string()),
        decimals,
    }
}

/// View that remembers every state it was shown
#[derive(Default)]
pub struct RecordingView {
    pub states: Mutex<Vec<PresenterState>>,
}

impl RecordingView {
    pub async fn phases(&self) -> Vec<ViewPhase> {
        self.states.lock().await.iter().map(|s| s.phase).collect()
    }

    pub async fn count(&self) -> usize {
        self.states.lock().await.len()
    }
}

#[async_trait]
impl WalletView for RecordingView {
    async fn render(&self, state: &PresenterState) {
        self.states.lock().await.push(state.clone());
    }
}

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

use crate::error::WalletError;
use crate::models::raw::{RawCollectible, RawTokenBalance, RawTransaction};

/// Source of wallet holdings and activity.
///
/// Every call receives the wallet explicitly; implementations hold no notion
/// of a "current" wallet.
#[async_trait]
pub trait WalletDataProvider: Send + Sync {
    /// Native balance in lamports
    async fn fetch_native_balance(&self, wallet: &Pubkey) -> Result<u64, WalletError>;

    /// Raw fungible token balance records, in API order
    async fn fetch_token_balances(&self, wallet: &Pubkey) -> Result<Vec<RawTokenBalance>, WalletError>;

    /// Raw collectible records, in API order
    async fn fetch_collectibles(&self, wallet: &Pubkey) -> Result<Vec<RawCollectible>, WalletError>;

    /// Raw recent transaction records, in API order
    async fn fetch_transactions(&self, wallet: &Pubkey) -> Result<Vec<RawTransaction>, WalletError>;
}

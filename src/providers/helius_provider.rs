use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::{CommitmentConfig, CommitmentLevel};
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use super::http::{extract_records, get_json};
use crate::error::WalletError;
use crate::models::raw::{RawCollectible, RawTokenBalance, RawTransaction};
use crate::traits::data_provider::WalletDataProvider;

/// Wallet data from a Solana RPC node (native balance) and the Helius
/// address API (tokens, collectibles, transactions).
pub struct HeliusDataProvider {
    rpc_client: Arc<RpcClient>,
    http: Client,
    api_url: String,
    api_key: Option<String>,
}

impl HeliusDataProvider {
    /// Create a new provider
    pub fn new(rpc_url: String, api_url: String, api_key: Option<String>, timeout: Duration) -> Result<Self, WalletError> {
        let rpc_client = RpcClient::new_with_timeout_and_commitment(
            rpc_url,
            timeout,
            CommitmentConfig { commitment: CommitmentLevel::Confirmed },
        );

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            rpc_client: Arc::new(rpc_client),
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self, wallet: &Pubkey, resource: &str) -> String {
        format!("{}/v0/addresses/{}/{}", self.api_url, wallet, resource)
    }

    async fn fetch_address_resource(&self, wallet: &Pubkey, resource: &str) -> Result<serde_json::Value, WalletError> {
        let url = self.endpoint(wallet, resource);
        debug!("GET {}", url);

        match &self.api_key {
            Some(key) => get_json(&self.http, &url, &[("api-key", key.as_str())]).await,
            None => get_json(&self.http, &url, &[]).await,
        }
    }
}

#[async_trait]
impl WalletDataProvider for HeliusDataProvider {
    async fn fetch_native_balance(&self, wallet: &Pubkey) -> Result<u64, WalletError> {
        let lamports = self.rpc_client.get_balance(wallet).await?;
        debug!("Native balance for {}: {} lamports", wallet, lamports);
        Ok(lamports)
    }

    async fn fetch_token_balances(&self, wallet: &Pubkey) -> Result<Vec<RawTokenBalance>, WalletError> {
        let body = self.fetch_address_resource(wallet, "balances").await?;
        let records: Vec<RawTokenBalance> = extract_records(&body, "tokens");
        debug!("Fetched {} token balance records for {}", records.len(), wallet);
        Ok(records)
    }

    async fn fetch_collectibles(&self, wallet: &Pubkey) -> Result<Vec<RawCollectible>, WalletError> {
        let body = self.fetch_address_resource(wallet, "nfts").await?;
        Ok(extract_records(&body, "nfts"))
    }

    async fn fetch_transactions(&self, wallet: &Pubkey) -> Result<Vec<RawTransaction>, WalletError> {
        let body = self.fetch_address_resource(wallet, "transactions").await?;
        Ok(extract_records(&body, "transactions"))
    }
}

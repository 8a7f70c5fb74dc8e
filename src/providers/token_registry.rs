use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::http::{decode_each, get_json};
use crate::error::WalletError;
use crate::models::token::{TokenMetadataEntry, TokenRegistry};
use crate::traits::registry_source::TokenRegistrySource;

/// One record of the registry endpoint
#[derive(Debug, Deserialize)]
struct RegistryRecord {
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    decimals: Option<u8>,
    #[serde(default, rename = "logoURI")]
    logo_uri: Option<String>,
}

impl RegistryRecord {
    fn into_entry(self) -> Option<TokenMetadataEntry> {
        let address = self.address.filter(|a| !a.is_empty())?;
        let symbol = self.symbol.filter(|s| !s.is_empty())?;
        Some(TokenMetadataEntry {
            mint_address: address,
            name: self.name.filter(|n| !n.is_empty()),
            symbol,
            decimals: self.decimals,
            logo_url: self.logo_uri.filter(|l| !l.is_empty()),
        })
    }
}

/// Build a registry from the endpoint's JSON body.
///
/// The body must be an array; records missing an address or a symbol are skipped.
pub fn parse_registry(body: &Value) -> Result<TokenRegistry, WalletError> {
    let items = body
        .as_array()
        .ok_or_else(|| WalletError::MalformedResponse("token registry is not an array".to_string()))?;

    Ok(decode_each::<RegistryRecord>(items, "registry")
        .into_iter()
        .filter_map(RegistryRecord::into_entry)
        .collect())
}

/// Token list served by a Jupiter-style registry endpoint
pub struct JupiterTokenRegistry {
    http: Client,
    url: String,
}

impl JupiterTokenRegistry {
    pub fn new(url: String, timeout: Duration) -> Result<Self, WalletError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url })
    }

    async fn fetch(&self) -> Result<TokenRegistry, WalletError> {
        let body = get_json(&self.http, &self.url, &[]).await?;
        parse_registry(&body)
    }
}

#[async_trait]
impl TokenRegistrySource for JupiterTokenRegistry {
    async fn load_registry(&self) -> Arc<TokenRegistry> {
        match self.fetch().await {
            Ok(registry) => {
                info!("Token registry loaded: {} entries", registry.len());
                Arc::new(registry)
            }
            Err(e) => {
                warn!("Token registry unavailable at {}: {}", self.url, e);
                Arc::new(TokenRegistry::new())
            }
        }
    }
}

/// Keeps the last non-empty registry for a fixed time-to-live
pub struct CachedTokenRegistry {
    inner: Arc<dyn TokenRegistrySource>,
    ttl: Duration,
    cached: RwLock<Option<(Instant, Arc<TokenRegistry>)>>,
}

impl CachedTokenRegistry {
    pub fn new(inner: Arc<dyn TokenRegistrySource>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: RwLock::new(None),
        }
    }

    /// Drop the cached registry so the next load refetches
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }
}

#[async_trait]
impl TokenRegistrySource for CachedTokenRegistry {
    async fn load_registry(&self) -> Arc<TokenRegistry> {
        // Check cache first
        {
            let cached = self.cached.read().await;
            if let Some((loaded_at, registry)) = cached.as_ref() {
                if loaded_at.elapsed() < self.ttl {
                    debug!("Using cached token list ({} tokens)", registry.len());
                    return registry.clone();
                }
            }
        }

        let registry = self.inner.load_registry().await;

        // An empty list means the fetch failed; retry on the next pass
        if !registry.is_empty() {
            *self.cached.write().await = Some((Instant::now(), registry.clone()));
        }

        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn registry_parsing_skips_incomplete_records() {
        let body = json!([
            {"address": "M1", "symbol": "USDC", "name": "USD Coin", "decimals": 6, "logoURI": "https://x/usdc.png"},
            {"address": "M2", "symbol": "BONK", "decimals": 5},
            {"address": "M3", "name": "No Symbol"},
            {"symbol": "NOADDR"},
            42
        ]);

        let registry = parse_registry(&body).unwrap();
        assert_eq!(registry.len(), 2);

        let usdc = registry.get("M1").unwrap();
        assert_eq!(usdc.symbol, "USDC");
        assert_eq!(usdc.decimals, Some(6));
        assert_eq!(usdc.logo_url.as_deref(), Some("https://x/usdc.png"));

        let bonk = registry.get("M2").unwrap();
        assert_eq!(bonk.name, None);
        assert_eq!(bonk.logo_url, None);
    }

    #[test]
    fn registry_must_be_an_array() {
        assert!(matches!(
            parse_registry(&json!({"tokens": []})),
            Err(WalletError::MalformedResponse(_))
        ));
    }

    struct CountingSource {
        calls: AtomicUsize,
        empty: bool,
    }

    #[async_trait]
    impl TokenRegistrySource for CountingSource {
        async fn load_registry(&self) -> Arc<TokenRegistry> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.empty {
                return Arc::new(TokenRegistry::new());
            }
            Arc::new(
                [TokenMetadataEntry {
                    mint_address: "M1".to_string(),
                    name: None,
                    symbol: "USDC".to_string(),
                    decimals: Some(6),
                    logo_url: None,
                }]
                .into_iter()
                .collect(),
            )
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cache_serves_until_ttl_expires() {
        let source = Arc::new(CountingSource { calls: AtomicUsize::new(0), empty: false });
        let cache = CachedTokenRegistry::new(source.clone(), Duration::from_secs(60));

        assert_eq!(cache.load_registry().await.len(), 1);
        assert_eq!(cache.load_registry().await.len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(61)).await;
        cache.load_registry().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);

        cache.invalidate().await;
        cache.load_registry().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_registry_is_not_cached() {
        let source = Arc::new(CountingSource { calls: AtomicUsize::new(0), empty: true });
        let cache = CachedTokenRegistry::new(source.clone(), Duration::from_secs(60));

        assert!(cache.load_registry().await.is_empty());
        assert!(cache.load_registry().await.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}

use async_trait::async_trait;
use tracing::info;

use crate::error::WalletError;
use crate::traits::bridge::{BridgeConnection, ConnectOptions, WalletBridge};

/// Bridge backed by an address supplied through configuration
pub struct ConfiguredWalletBridge {
    address: Option<String>,
    install_url: String,
}

impl ConfiguredWalletBridge {
    pub fn new(address: Option<String>, install_url: String) -> Self {
        Self { address, install_url }
    }
}

#[async_trait]
impl WalletBridge for ConfiguredWalletBridge {
    fn is_available(&self) -> bool {
        self.address.is_some()
    }

    fn install_url(&self) -> &str {
        &self.install_url
    }

    async fn connect(&self, _options: ConnectOptions) -> Result<BridgeConnection, WalletError> {
        match &self.address {
            Some(address) => Ok(BridgeConnection { public_key: address.clone() }),
            None => Err(WalletError::BridgeUnavailable { install_url: self.install_url.clone() }),
        }
    }
}

/// Connect through the bridge and return the wallet address.
///
/// A missing bridge is reported as `BridgeUnavailable` before any connect attempt.
pub async fn connect_wallet(bridge: &dyn WalletBridge, options: ConnectOptions) -> Result<String, WalletError> {
    if !bridge.is_available() {
        return Err(WalletError::BridgeUnavailable {
            install_url: bridge.install_url().to_string(),
        });
    }

    let connection = bridge.connect(options).await?;
    info!("Wallet bridge connected: {}", connection.public_key);
    Ok(connection.public_key)
}

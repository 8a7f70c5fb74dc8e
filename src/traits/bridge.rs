use async_trait::async_trait;

use crate::error::WalletError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Only connect if the user already trusted this app
    pub only_if_trusted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConnection {
    pub public_key: String,
}

/// Wallet extension that hands out the user's address
#[async_trait]
pub trait WalletBridge: Send + Sync {
    fn is_available(&self) -> bool;

    /// Where to send the user when no bridge is present
    fn install_url(&self) -> &str;

    async fn connect(&self, options: ConnectOptions) -> Result<BridgeConnection, WalletError>;
}

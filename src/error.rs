use thiserror::Error;

/// Failures the dashboard core can report.
///
/// Kept `Clone` so the presenter can hold the latest failure in its state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("No wallet bridge available, install one from {install_url}")]
    BridgeUnavailable { install_url: String },

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl WalletError {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidAddress { .. } => "invalid_address",
            Self::BridgeUnavailable { .. } => "bridge_unavailable",
            Self::NetworkFailure(_) => "network_failure",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}

impl From<reqwest::Error> for WalletError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::NetworkFailure(err.to_string())
        }
    }
}

impl From<solana_client::client_error::ClientError> for WalletError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        Self::NetworkFailure(format!("rpc: {}", err))
    }
}

impl From<tokio::time::error::Elapsed> for WalletError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::NetworkFailure("request timed out".to_string())
    }
}

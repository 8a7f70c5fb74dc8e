//! Solana Wallet Dashboard Library
//!
//! Aggregates a wallet's native balance, tokens, collectibles and recent
//! activity into immutable snapshots, and keeps them fresh behind a
//! generation-guarded refresh loop.

// Public modules - these are the API surface
pub mod aggregator;
pub mod config;
pub mod error;
pub mod models;
pub mod presenter;
pub mod providers;
pub mod traits;
pub mod utils;
pub mod views;

// Re-export commonly used items for easier access
pub use aggregator::WalletAggregator;
pub use config::{AggregatorConfig, DashboardConfig, OutputFormat, PresenterConfig};
pub use error::WalletError;
pub use models::{
    AggregationReport, DefiPosition, NftAsset, NftAttribute, TokenHolding, TokenMetadataEntry, TokenRegistry,
    TransactionRecord, TxStatus, WalletSnapshot,
};
pub use presenter::{Presenter, PresenterCommand, PresenterHandle, PresenterState, ViewPhase};
pub use providers::{
    connect_wallet, CachedTokenRegistry, ConfiguredWalletBridge, HeliusDataProvider, JupiterTokenRegistry,
};
pub use traits::{ConnectOptions, TokenRegistrySource, WalletBridge, WalletDataProvider, WalletView};
pub use views::{ConsoleView, JsonView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for library functions
pub type Result<T> = std::result::Result<T, anyhow::Error>;

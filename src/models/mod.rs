//! Data models for the wallet dashboard

pub mod token;
pub mod collectible;
pub mod activity;
pub mod defi;
pub mod snapshot;
pub mod raw;

// Re-export for convenience
pub use token::{TokenHolding, TokenMetadataEntry, TokenRegistry};
pub use collectible::{NftAsset, NftAttribute};
pub use activity::{TransactionRecord, TxStatus};
pub use defi::DefiPosition;
pub use snapshot::{AggregationReport, WalletSnapshot};
pub use raw::{RawCollectible, RawTokenBalance, RawTransaction};

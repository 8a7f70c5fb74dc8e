//! Wallet snapshot aggregation

pub mod normalize;
pub mod wallet_aggregator;

pub use wallet_aggregator::WalletAggregator;

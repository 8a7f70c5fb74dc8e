//! Data providers for fetching wallet information

pub mod http;
pub mod helius_provider;
pub mod token_registry;
pub mod configured_bridge;

// Re-export for convenience
pub use helius_provider::HeliusDataProvider;
pub use token_registry::{CachedTokenRegistry, JupiterTokenRegistry};
pub use configured_bridge::{connect_wallet, ConfiguredWalletBridge};

//! Seams between the dashboard core and its collaborators

pub mod data_provider;
pub mod registry_source;
pub mod bridge;
pub mod view;

// Re-export for convenience
pub use data_provider::WalletDataProvider;
pub use registry_source::TokenRegistrySource;
pub use bridge::{BridgeConnection, ConnectOptions, WalletBridge};
pub use view::WalletView;

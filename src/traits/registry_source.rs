use std::sync::Arc;

use async_trait::async_trait;

use crate::models::token::TokenRegistry;

/// Source of token reference data keyed by mint.
#[async_trait]
pub trait TokenRegistrySource: Send + Sync {
    /// Load the registry. Never fails: an unreachable source yields an empty registry.
    async fn load_registry(&self) -> Arc<TokenRegistry>;
}

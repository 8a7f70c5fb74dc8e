use async_trait::async_trait;

use crate::presenter::state::PresenterState;

/// Display surface fed by the presenter after every state transition
#[async_trait]
pub trait WalletView: Send + Sync {
    async fn render(&self, state: &PresenterState);
}

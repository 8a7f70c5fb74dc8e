use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::models::snapshot::WalletSnapshot;
use crate::presenter::state::{PresenterState, ViewPhase};
use crate::traits::view::WalletView;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotLine<'a> {
    address: &'a str,
    generation: u64,
    snapshot: &'a WalletSnapshot,
}

/// Writes every fresh snapshot to stdout as one JSON line
pub struct JsonView;

impl JsonView {
    pub fn new() -> Self {
        Self
    }

    /// JSON line for a ready state, if there is a snapshot to show
    pub fn to_line(state: &PresenterState) -> Option<String> {
        if state.phase != ViewPhase::Ready {
            return None;
        }
        let snapshot = state.snapshot.as_deref()?;
        let line = SnapshotLine {
            address: state.address.as_deref().unwrap_or_default(),
            generation: state.generation,
            snapshot,
        };

        match serde_json::to_string(&line) {
            Ok(json) => Some(json),
            Err(e) => {
                error!("Failed to serialize snapshot: {}", e);
                None
            }
        }
    }
}

impl Default for JsonView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletView for JsonView {
    async fn render(&self, state: &PresenterState) {
        match state.phase {
            ViewPhase::Ready => {
                if let Some(line) = Self::to_line(state) {
                    println!("{}", line);
                }
            }
            ViewPhase::Error => {
                if let Some(e) = &state.error {
                    warn!("Wallet data unavailable: {}", e);
                }
            }
            phase => debug!("Presenter is {}", phase),
        }
    }
}

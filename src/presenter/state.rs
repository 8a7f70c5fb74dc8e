use std::fmt;
use std::sync::Arc;

use crate::error::WalletError;
use crate::models::snapshot::WalletSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Loading,
    Ready,
    Error,
}

impl fmt::Display for ViewPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// What the display surface sees.
///
/// `generation` increases every time a refresh is requested; only the result
/// of the latest generation may change the state.
#[derive(Debug, Clone)]
pub struct PresenterState {
    pub phase: ViewPhase,
    pub address: Option<String>,
    pub snapshot: Option<Arc<WalletSnapshot>>,
    pub error: Option<WalletError>,
    pub generation: u64,
}

impl Default for PresenterState {
    fn default() -> Self {
        Self {
            phase: ViewPhase::Idle,
            address: None,
            snapshot: None,
            error: None,
            generation: 0,
        }
    }
}

impl PresenterState {
    pub fn is_loading(&self) -> bool {
        self.phase == ViewPhase::Loading
    }

    /// Switch to a new, already validated address and start loading it
    pub fn begin_address(&mut self, address: String) -> u64 {
        self.address = Some(address);
        self.snapshot = None;
        self.error = None;
        self.start_generation()
    }

    /// Record an address that failed validation; nothing will be fetched for it
    pub fn reject_address(&mut self, error: WalletError) {
        self.address = None;
        self.snapshot = None;
        self.error = Some(error);
        self.generation += 1;
        self.phase = ViewPhase::Error;
    }

    /// Start a refresh of the current address, if there is one
    pub fn begin_refresh(&mut self) -> Option<u64> {
        self.address.as_ref()?;
        Some(self.start_generation())
    }

    /// Apply a finished fetch. Returns false, leaving the state untouched,
    /// when the result belongs to an older generation.
    pub fn complete(&mut self, generation: u64, result: Result<WalletSnapshot, WalletError>) -> bool {
        if generation != self.generation || self.phase != ViewPhase::Loading {
            return false;
        }

        match result {
            Ok(snapshot) => {
                self.snapshot = Some(Arc::new(snapshot));
                self.error = None;
                self.phase = ViewPhase::Ready;
            }
            Err(e) => {
                self.error = Some(e);
                self.phase = ViewPhase::Error;
            }
        }
        true
    }

    fn start_generation(&mut self) -> u64 {
        self.generation += 1;
        self.phase = ViewPhase::Loading;
        self.generation
    }
}

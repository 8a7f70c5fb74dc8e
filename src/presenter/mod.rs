//! Refresh loop and state behind the display surface

pub mod commands;
pub mod state;
pub mod refresh_loop;

pub use commands::{CommandSender, PresenterCommand};
pub use state::{PresenterState, ViewPhase};
pub use refresh_loop::{Presenter, PresenterHandle};

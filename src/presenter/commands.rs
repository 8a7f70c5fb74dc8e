use tokio::sync::mpsc::UnboundedSender;
use tracing::error;

/// Inputs the display surface can send back into the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCommand {
    ChangeAddress(String),
    RefreshNow,
    Shutdown,
}

/// Non-blocking sender for presenter commands
#[derive(Debug, Clone)]
pub struct CommandSender {
    sender: UnboundedSender<PresenterCommand>,
}

impl CommandSender {
    pub fn new(sender: UnboundedSender<PresenterCommand>) -> Self {
        Self { sender }
    }

    /// Queue a command; logs when the presenter is already gone
    pub fn send(&self, command: PresenterCommand) {
        if let Err(e) = self.sender.send(command) {
            error!("Failed to queue presenter command {:?}: presenter stopped", e.0);
        }
    }

    pub fn change_address(&self, address: impl Into<String>) {
        self.send(PresenterCommand::ChangeAddress(address.into()));
    }

    pub fn refresh_now(&self) {
        self.send(PresenterCommand::RefreshNow);
    }
}

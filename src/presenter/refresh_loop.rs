use std::sync::Arc;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::commands::{CommandSender, PresenterCommand};
use super::state::{PresenterState, ViewPhase};
use crate::aggregator::WalletAggregator;
use crate::config::PresenterConfig;
use crate::error::WalletError;
use crate::models::snapshot::WalletSnapshot;
use crate::traits::view::WalletView;
use crate::utils::helper::parse_address;

type FetchOutcome = (u64, Result<WalletSnapshot, WalletError>);

/// Keeps the latest snapshot for one wallet and refreshes it on a timer
pub struct Presenter {
    aggregator: Arc<WalletAggregator>,
    view: Arc<dyn WalletView>,
    config: PresenterConfig,
    state: Arc<RwLock<PresenterState>>,
}

/// Control surface of a running presenter
pub struct PresenterHandle {
    commands: CommandSender,
    state: Arc<RwLock<PresenterState>>,
    task: JoinHandle<()>,
}

impl PresenterHandle {
    pub fn change_address(&self, address: impl Into<String>) {
        self.commands.change_address(address);
    }

    pub fn refresh_now(&self) {
        self.commands.refresh_now();
    }

    /// Copy of the current state
    pub async fn state(&self) -> PresenterState {
        self.state.read().await.clone()
    }

    /// Cancel pending work and wait for the presenter task to end
    pub async fn shutdown(self) {
        self.commands.send(PresenterCommand::Shutdown);
        if let Err(e) = self.task.await {
            warn!("Presenter task ended abnormally: {}", e);
        }
    }
}

impl Presenter {
    /// Create a new presenter in the idle state
    pub fn new(aggregator: Arc<WalletAggregator>, view: Arc<dyn WalletView>, config: PresenterConfig) -> Self {
        Self {
            aggregator,
            view,
            config,
            state: Arc::new(RwLock::new(PresenterState::default())),
        }
    }

    /// Start the refresh loop, loading `initial_address` right away when given
    pub fn spawn(self, initial_address: Option<String>) -> PresenterHandle {
        let (sender, receiver) = unbounded_channel();
        let commands = CommandSender::new(sender);
        if let Some(address) = initial_address {
            commands.change_address(address);
        }

        let state = self.state.clone();
        let task = tokio::spawn(self.run(receiver));

        PresenterHandle { commands, state, task }
    }

    async fn run(self, mut commands: UnboundedReceiver<PresenterCommand>) {
        let period = self.config.refresh_interval;
        info!("Starting refresh loop with interval: {:?}", period);

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let (done_tx, mut done_rx) = unbounded_channel::<FetchOutcome>();
        let mut in_flight: Option<JoinHandle<()>> = None;

        self.publish().await;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(PresenterCommand::ChangeAddress(address)) => {
                        cancel(&mut in_flight);
                        ticker.reset();
                        self.change_address(address, &done_tx, &mut in_flight).await;
                    }
                    Some(PresenterCommand::RefreshNow) => {
                        self.refresh(&done_tx, &mut in_flight).await;
                    }
                    Some(PresenterCommand::Shutdown) | None => {
                        cancel(&mut in_flight);
                        info!("Presenter shutting down");
                        break;
                    }
                },
                _ = ticker.tick() => {
                    let phase = self.state.read().await.phase;
                    match phase {
                        ViewPhase::Ready | ViewPhase::Error => self.refresh(&done_tx, &mut in_flight).await,
                        ViewPhase::Loading => debug!("Refresh still in flight, skipping tick"),
                        ViewPhase::Idle => {}
                    }
                }
                Some((generation, result)) = done_rx.recv() => {
                    self.apply(generation, result).await;
                }
            }
        }
    }

    async fn change_address(
        &self,
        address: String,
        done_tx: &UnboundedSender<FetchOutcome>,
        in_flight: &mut Option<JoinHandle<()>>,
    ) {
        if let Err(e) = parse_address(&address) {
            warn!("Rejected wallet address {:?}: {}", address, e);
            self.state.write().await.reject_address(e);
            self.publish().await;
            return;
        }

        info!("Tracking wallet: {}", address);
        let generation = self.state.write().await.begin_address(address.clone());
        self.publish().await;
        self.start_fetch(generation, address, done_tx, in_flight);
    }

    async fn refresh(&self, done_tx: &UnboundedSender<FetchOutcome>, in_flight: &mut Option<JoinHandle<()>>) {
        let started = {
            let mut state = self.state.write().await;
            state
                .begin_refresh()
                .and_then(|generation| state.address.clone().map(|address| (generation, address)))
        };

        let Some((generation, address)) = started else {
            debug!("No wallet selected, nothing to refresh");
            return;
        };

        self.publish().await;
        self.start_fetch(generation, address, done_tx, in_flight);
    }

    fn start_fetch(
        &self,
        generation: u64,
        address: String,
        done_tx: &UnboundedSender<FetchOutcome>,
        in_flight: &mut Option<JoinHandle<()>>,
    ) {
        cancel(in_flight);

        let aggregator = self.aggregator.clone();
        let done_tx = done_tx.clone();

        *in_flight = Some(tokio::spawn(async move {
            let result = match parse_address(&address) {
                Ok(wallet) => aggregator.try_aggregate(&wallet).await,
                Err(e) => Err(e),
            };
            // the receiver is gone once the presenter has shut down
            let _ = done_tx.send((generation, result));
        }));
    }

    async fn apply(&self, generation: u64, result: Result<WalletSnapshot, WalletError>) {
        let applied = {
            let mut state = self.state.write().await;
            if let Err(e) = &result {
                warn!("Refresh {} failed ({}): {}", generation, e.kind(), e);
            }
            state.complete(generation, result)
        };

        if applied {
            self.publish().await;
        } else {
            debug!("Discarding stale result for generation {}", generation);
        }
    }

    async fn publish(&self) {
        let state = self.state.read().await.clone();
        self.view.render(&state).await;
    }
}

fn cancel(in_flight: &mut Option<JoinHandle<()>>) {
    if let Some(handle) = in_flight.take() {
        handle.abort();
    }
}

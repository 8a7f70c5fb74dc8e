mod common;

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use bigdecimal::BigDecimal;
use solana_sdk::pubkey::Pubkey;

use common::{FakeAccount, FakeWalletData, RecordingView, StaticRegistry};
use solana_wallet_dashboard::{
    AggregatorConfig, Presenter, PresenterConfig, PresenterHandle, PresenterState, ViewPhase, WalletAggregator,
    WalletError,
};

const REFRESH: Duration = Duration::from_secs(60);

fn start(data: Arc<FakeWalletData>, view: Arc<RecordingView>, address: Option<String>) -> PresenterHandle {
    let aggregator = Arc::new(WalletAggregator::new(
        data,
        Arc::new(StaticRegistry::unavailable()),
        AggregatorConfig::default(),
    ));
    let config = PresenterConfig { refresh_interval: REFRESH };
    Presenter::new(aggregator, view, config).spawn(address)
}

async fn wait_for<F, Fut>(handle: &PresenterHandle, mut done: F) -> PresenterState
where
    F: FnMut(PresenterState) -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..1_000 {
        let state = handle.state().await;
        if done(state.clone()).await {
            return state;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("presenter never reached the expected state");
}

fn account(lamports: u64) -> FakeAccount {
    FakeAccount {
        lamports,
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn loads_initial_address() {
    let wallet = Pubkey::new_unique();
    let data = Arc::new(FakeWalletData::new().with_account(wallet, account(1_000_000_000)));
    let view = Arc::new(RecordingView::default());
    let handle = start(data, view.clone(), Some(wallet.to_string()));

    let state = wait_for(&handle, |s| async move { s.phase == ViewPhase::Ready }).await;
    assert_eq!(state.address, Some(wallet.to_string()));
    assert_eq!(state.generation, 1);
    assert!(state.error.is_none());

    let snapshot = state.snapshot.unwrap();
    assert_eq!(snapshot.sol_balance, BigDecimal::from(1));

    assert_eq!(
        view.phases().await,
        vec![ViewPhase::Idle, ViewPhase::Loading, ViewPhase::Ready]
    );

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn refreshes_on_interval() {
    let wallet = Pubkey::new_unique();
    let data = Arc::new(FakeWalletData::new().with_account(wallet, account(5)));
    let view = Arc::new(RecordingView::default());
    let handle = start(data.clone(), view, Some(wallet.to_string()));

    wait_for(&handle, |s| async move { s.phase == ViewPhase::Ready }).await;
    assert_eq!(data.calls(), 1);

    tokio::time::sleep(REFRESH).await;
    let state = wait_for(&handle, |s| async move { s.generation == 2 && s.phase == ViewPhase::Ready }).await;
    assert!(state.snapshot.is_some());
    assert_eq!(data.calls(), 2);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn recovers_after_failed_refresh() {
    let wallet = Pubkey::new_unique();
    let data = Arc::new(
        FakeWalletData::new()
            .with_account(wallet, account(3_000_000_000))
            .failing_next(1),
    );
    let view = Arc::new(RecordingView::default());
    let handle = start(data, view.clone(), Some(wallet.to_string()));

    let state = wait_for(&handle, |s| async move { s.phase == ViewPhase::Error }).await;
    assert!(matches!(state.error, Some(WalletError::NetworkFailure(_))));
    assert!(state.snapshot.is_none());

    handle.refresh_now();
    let state = wait_for(&handle, |s| async move { s.phase == ViewPhase::Ready }).await;
    assert!(state.error.is_none());
    assert_eq!(
        state.snapshot.unwrap().sol_balance,
        BigDecimal::from_str("3").unwrap()
    );

    assert_eq!(
        view.phases().await,
        vec![
            ViewPhase::Idle,
            ViewPhase::Loading,
            ViewPhase::Error,
            ViewPhase::Loading,
            ViewPhase::Ready
        ]
    );

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn address_change_discards_slow_result() {
    let slow = Pubkey::new_unique();
    let fast = Pubkey::new_unique();
    let data = Arc::new(
        FakeWalletData::new()
            .with_account(
                slow,
                FakeAccount {
                    lamports: 7_000_000_000,
                    delay: Duration::from_secs(5),
                    ..Default::default()
                },
            )
            .with_account(fast, account(2_000_000_000)),
    );
    let view = Arc::new(RecordingView::default());
    let handle = start(data, view.clone(), Some(slow.to_string()));

    wait_for(&handle, |s| async move { s.phase == ViewPhase::Loading }).await;
    handle.change_address(fast.to_string());

    let state = wait_for(&handle, |s| async move { s.phase == ViewPhase::Ready }).await;
    assert_eq!(state.address, Some(fast.to_string()));

    tokio::time::sleep(Duration::from_secs(10)).await;
    let state = handle.state().await;
    assert_eq!(state.address, Some(fast.to_string()));
    assert_eq!(state.snapshot.unwrap().sol_balance, BigDecimal::from(2));

    let slow_shown = view
        .states
        .lock()
        .await
        .iter()
        .any(|s| s.address == Some(slow.to_string()) && s.phase == ViewPhase::Ready);
    assert!(!slow_shown);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn invalid_address_is_rejected_without_fetching() {
    let data = Arc::new(FakeWalletData::new());
    let view = Arc::new(RecordingView::default());
    let handle = start(data.clone(), view, Some("abc123".to_string()));

    let state = wait_for(&handle, |s| async move { s.phase == ViewPhase::Error }).await;
    assert!(matches!(state.error, Some(WalletError::InvalidAddress { .. })));
    assert!(state.address.is_none());

    // nothing to refresh until a valid address arrives
    handle.refresh_now();
    tokio::time::sleep(REFRESH * 2).await;
    assert_eq!(data.calls(), 0);
    assert_eq!(handle.state().await.phase, ViewPhase::Error);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn idle_until_address_given() {
    let data = Arc::new(FakeWalletData::new());
    let view = Arc::new(RecordingView::default());
    let handle = start(data.clone(), view.clone(), None);

    tokio::time::sleep(REFRESH * 2).await;
    assert_eq!(handle.state().await.phase, ViewPhase::Idle);
    assert_eq!(data.calls(), 0);
    assert_eq!(view.phases().await, vec![ViewPhase::Idle]);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_rendering() {
    let wallet = Pubkey::new_unique();
    let data = Arc::new(FakeWalletData::new().with_account(wallet, account(1)));
    let view = Arc::new(RecordingView::default());
    let handle = start(data.clone(), view.clone(), Some(wallet.to_string()));

    wait_for(&handle, |s| async move { s.phase == ViewPhase::Ready }).await;
    handle.shutdown().await;

    let rendered = view.count().await;
    let calls = data.calls();
    tokio::time::sleep(REFRESH * 3).await;
    assert_eq!(view.count().await, rendered);
    assert_eq!(data.calls(), calls);
}

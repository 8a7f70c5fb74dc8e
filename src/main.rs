use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use solana_wallet_dashboard::{
    connect_wallet, CachedTokenRegistry, ConfiguredWalletBridge, ConnectOptions, ConsoleView, DashboardConfig,
    HeliusDataProvider, JsonView, JupiterTokenRegistry, OutputFormat, Presenter, TokenRegistrySource,
    WalletAggregator, WalletDataProvider, WalletError, WalletView, VERSION,
};

fn init_tracing(config: &DashboardConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_level(true)
        .with_target(false)
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true);

    // keep stdout clean for JSON lines
    match config.output_format {
        OutputFormat::Json => builder.with_writer(std::io::stderr).init(),
        OutputFormat::Console => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config);

    info!("Solana wallet dashboard v{}", VERSION);
    info!("RPC URL: {}", config.rpc_url);
    info!("Wallet API: {}", config.helius_api_url);
    if config.helius_api_key.is_none() {
        info!("HELIUS_API_KEY not set, wallet API requests are unauthenticated");
    }

    let bridge = ConfiguredWalletBridge::new(config.wallet_address.clone(), config.wallet_install_url.clone());
    let address = match connect_wallet(&bridge, ConnectOptions { only_if_trusted: false }).await {
        Ok(address) => address,
        Err(WalletError::BridgeUnavailable { install_url }) => {
            info!("No wallet connected. Install a Solana wallet from {} and set WALLET_ADDRESS.", install_url);
            return Ok(());
        }
        Err(e) => return Err(e).context("wallet connection failed"),
    };

    let timeout = config.aggregator.request_timeout;
    let data_provider: Arc<dyn WalletDataProvider> = Arc::new(HeliusDataProvider::new(
        config.rpc_url.clone(),
        config.helius_api_url.clone(),
        config.helius_api_key.clone(),
        timeout,
    )?);
    let registry_source: Arc<dyn TokenRegistrySource> =
        Arc::new(JupiterTokenRegistry::new(config.token_registry_url.clone(), timeout)?);
    let registry: Arc<dyn TokenRegistrySource> =
        Arc::new(CachedTokenRegistry::new(registry_source, config.registry_ttl));

    let aggregator = Arc::new(WalletAggregator::new(data_provider, registry, config.aggregator.clone()));

    let view: Arc<dyn WalletView> = match config.output_format {
        OutputFormat::Console => Arc::new(ConsoleView::new(config.hide_unknown_tokens)),
        OutputFormat::Json => Arc::new(JsonView::new()),
    };

    let presenter = Presenter::new(aggregator, view, config.presenter.clone());
    let handle = presenter.spawn(Some(address));

    info!("Wallet dashboard is running. Press Ctrl+C to stop.");

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }

    info!("Shutting down...");
    handle.shutdown().await;

    Ok(())
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::models::snapshot::WalletSnapshot;
use crate::presenter::state::{PresenterState, ViewPhase};
use crate::traits::view::WalletView;
use crate::utils::helper::{format_fixed, format_token_amount, logo_initials, short_address, truncate_string};

const MAX_LISTED: usize = 25;

/// Logs a tabbed rendering of the wallet through `tracing`
pub struct ConsoleView {
    hide_unknown_tokens: bool,
}

impl ConsoleView {
    /// Create a new console view
    pub fn new(hide_unknown_tokens: bool) -> Self {
        Self { hide_unknown_tokens }
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new(false)
    }
}

fn format_time(seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| seconds.to_string())
}

/// Render a snapshot as the dashboard's tabs, one line per entry
pub fn render_tabs(address: &str, snapshot: &WalletSnapshot, hide_unknown_tokens: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let rule = "-".repeat(80);

    lines.push("=".repeat(80));
    lines.push(format!(
        "WALLET {} (updated {})",
        short_address(address),
        snapshot.last_updated.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    lines.push("=".repeat(80));

    lines.push("[Overview]".to_string());
    lines.push(format!("SOL Balance: ◎{}", format_fixed(&snapshot.sol_balance, 4)));
    lines.push(format!(
        "Tokens: {} | NFTs: {} | Transactions: {} | DeFi positions: {}",
        snapshot.tokens.len(),
        snapshot.nfts.len(),
        snapshot.recent_transactions.len(),
        snapshot.defi_positions.len()
    ));
    lines.push(format!("Total Portfolio Value: ${:.2}", snapshot.total_portfolio_value_usd));
    lines.push(rule.clone());

    lines.push("[Tokens]".to_string());
    let tokens: Vec<_> = snapshot
        .tokens_by_symbol()
        .into_iter()
        .filter(|t| !(hide_unknown_tokens && t.is_unknown()))
        .collect();
    if tokens.is_empty() {
        lines.push("No token holdings found in wallet".to_string());
    }
    for (i, token) in tokens.iter().enumerate().take(MAX_LISTED) {
        let badge = match &token.logo_url {
            Some(_) => "[logo]".to_string(),
            None => format!("[{}]", logo_initials(&token.symbol)),
        };
        lines.push(format!(
            "{}. {} {} ({}): {}",
            i + 1,
            badge,
            token.symbol,
            token.name,
            format_token_amount(&token.raw_amount, token.decimals)
        ));
        lines.push(format!("   Mint: {}", token.mint));
    }
    if tokens.len() > MAX_LISTED {
        lines.push(format!("  ... and {} more", tokens.len() - MAX_LISTED));
    }
    lines.push(rule.clone());

    lines.push("[NFTs]".to_string());
    if snapshot.nfts.is_empty() {
        lines.push("No collectibles".to_string());
    }
    for (i, nft) in snapshot.nfts.iter().enumerate().take(MAX_LISTED) {
        let collection = nft.collection_name.as_deref().unwrap_or("No collection");
        lines.push(format!("{}. {} ({})", i + 1, truncate_string(&nft.name, 40), collection));
        lines.push(format!("   Mint: {}", nft.mint));
    }
    lines.push(rule.clone());

    lines.push("[Activity]".to_string());
    if snapshot.recent_transactions.is_empty() {
        lines.push("No recent transactions".to_string());
    }
    for tx in snapshot.recent_transactions.iter().take(MAX_LISTED) {
        let amount = match (&tx.amount, &tx.token_symbol) {
            (Some(amount), Some(symbol)) => format!(" {} {}", amount, symbol),
            (Some(amount), None) => format!(" {}", amount),
            _ => String::new(),
        };
        lines.push(format!(
            "{} {} {}{} {}",
            format_time(tx.timestamp_seconds),
            tx.tx_type,
            tx.status,
            amount,
            short_address(&tx.signature)
        ));
    }
    lines.push(rule);

    lines.push("[DeFi]".to_string());
    if snapshot.defi_positions.is_empty() {
        lines.push("No positions".to_string());
    }
    for position in &snapshot.defi_positions {
        let apy = position
            .apy
            .map(|apy| format!(" @ {}% APY", apy))
            .unwrap_or_default();
        lines.push(format!(
            "{} {}: ${:.2}{}",
            position.protocol_name, position.position_type, position.value_usd, apy
        ));
    }
    lines.push("=".repeat(80));

    lines
}

#[async_trait]
impl WalletView for ConsoleView {
    async fn render(&self, state: &PresenterState) {
        let address = state.address.as_deref().unwrap_or("");

        match state.phase {
            ViewPhase::Idle => info!("Waiting for a wallet to be connected"),
            ViewPhase::Loading => info!("Loading wallet {}...", short_address(address)),
            ViewPhase::Ready => {
                if let Some(snapshot) = &state.snapshot {
                    for line in render_tabs(address, snapshot, self.hide_unknown_tokens) {
                        info!("{}", line);
                    }
                }
            }
            ViewPhase::Error => {
                if let Some(error) = &state.error {
                    warn!("Wallet data unavailable: {}", error);
                }
                if state.snapshot.is_some() {
                    info!("Showing last good snapshot until the next refresh succeeds");
                }
            }
        }
    }
}

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_HELIUS_API_URL: &str = "https://api.helius.xyz";
pub const DEFAULT_TOKEN_REGISTRY_URL: &str = "https://token.jup.ag/strict";
pub const DEFAULT_WALLET_INSTALL_URL: &str = "https://phantom.app/download";

/// How snapshots are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "console" => Ok(Self::Console),
            "json" => Ok(Self::Json),
            other => Err(anyhow::anyhow!("unknown output format {}", other)),
        }
    }
}

/// Aggregation behaviour.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Upper bound on every individual fetch
    pub request_timeout: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_millis(10_000),
        }
    }
}

/// Presenter refresh behaviour.
#[derive(Debug, Clone)]
pub struct PresenterConfig {
    pub refresh_interval: Duration,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_millis(15_000),
        }
    }
}

/// Full runtime configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub rpc_url: String,
    pub helius_api_url: String,
    pub helius_api_key: Option<String>,
    pub token_registry_url: String,
    pub wallet_address: Option<String>,
    pub wallet_install_url: String,
    pub registry_ttl: Duration,
    pub hide_unknown_tokens: bool,
    pub output_format: OutputFormat,
    pub log_level: String,
    pub aggregator: AggregatorConfig,
    pub presenter: PresenterConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            helius_api_url: DEFAULT_HELIUS_API_URL.to_string(),
            helius_api_key: None,
            token_registry_url: DEFAULT_TOKEN_REGISTRY_URL.to_string(),
            wallet_address: None,
            wallet_install_url: DEFAULT_WALLET_INSTALL_URL.to_string(),
            registry_ttl: Duration::from_secs(300),
            hide_unknown_tokens: false,
            output_format: OutputFormat::Console,
            log_level: "info".to_string(),
            aggregator: AggregatorConfig::default(),
            presenter: PresenterConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = get("SOLANA_RPC_URL") {
            config.rpc_url = v;
        }
        if let Some(v) = get("HELIUS_API_URL") {
            config.helius_api_url = v.trim_end_matches('/').to_string();
        }
        config.helius_api_key = get("HELIUS_API_KEY");
        if let Some(v) = get("TOKEN_REGISTRY_URL") {
            config.token_registry_url = v;
        }
        config.wallet_address = get("WALLET_ADDRESS");
        if let Some(v) = get("WALLET_INSTALL_URL") {
            config.wallet_install_url = v;
        }
        if let Some(v) = get("REFRESH_INTERVAL_MS") {
            config.presenter.refresh_interval = Duration::from_millis(parse_var("REFRESH_INTERVAL_MS", &v)?);
        }
        if let Some(v) = get("REQUEST_TIMEOUT_MS") {
            config.aggregator.request_timeout = Duration::from_millis(parse_var("REQUEST_TIMEOUT_MS", &v)?);
        }
        if let Some(v) = get("REGISTRY_TTL_SECS") {
            config.registry_ttl = Duration::from_secs(parse_var("REGISTRY_TTL_SECS", &v)?);
        }
        if let Some(v) = get("HIDE_UNKNOWN_TOKENS") {
            config.hide_unknown_tokens = parse_var("HIDE_UNKNOWN_TOKENS", &v)?;
        }
        if let Some(v) = get("OUTPUT_FORMAT") {
            config.output_format = parse_var("OUTPUT_FORMAT", &v)?;
        }
        if let Some(v) = get("LOG_LEVEL") {
            config.log_level = v;
        }

        if config.presenter.refresh_interval.is_zero() {
            anyhow::bail!("REFRESH_INTERVAL_MS must be greater than zero");
        }

        Ok(config)
    }
}

fn parse_var<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("invalid value for {}: {:?}", key, value))
}

use rust_decimal::Decimal;
use serde::Serialize;

/// A yield or liquidity position held through a DeFi protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefiPosition {
    pub protocol_name: String,
    pub position_type: String,
    #[serde(rename = "valueUSD")]
    pub value_usd: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apy: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paired_tokens: Option<Vec<String>>,
}

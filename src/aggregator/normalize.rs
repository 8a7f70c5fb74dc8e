//! Turns raw wire records into display-ready models.

use std::collections::{BTreeSet, HashMap, HashSet};

use num_bigint::BigUint;
use tracing::debug;

use crate::models::activity::{TransactionRecord, TxStatus};
use crate::models::collectible::{NftAsset, NftAttribute};
use crate::models::raw::{RawCollectible, RawTokenBalance, RawTransaction};
use crate::models::token::{TokenHolding, TokenRegistry, UNKNOWN_TOKEN};

/// Parse an integer amount made only of ASCII digits
pub fn parse_raw_amount(raw: &str) -> Option<BigUint> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(raw.as_bytes(), 10)
}

struct PendingHolding {
    mint: String,
    amount: BigUint,
    decimals: Option<u8>,
}

/// Join balance records against the registry.
///
/// Zero, absent and non-numeric amounts are dropped. Repeated mints are summed
/// into the first occurrence. A record reporting 0 decimals defers to the
/// registry. Mints the registry does not know keep the
/// `Unknown` sentinel for name and symbol.
pub fn build_token_holdings(records: Vec<RawTokenBalance>, registry: &TokenRegistry) -> Vec<TokenHolding> {
    let mut pending: Vec<PendingHolding> = Vec::with_capacity(records.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Some(amount) = record.amount.as_deref().and_then(parse_raw_amount) else {
            debug!("Dropping token {} without a usable amount", record.mint);
            continue;
        };
        if amount == BigUint::default() {
            continue;
        }

        match positions.get(&record.mint).copied() {
            Some(i) => pending[i].amount += amount,
            None => {
                positions.insert(record.mint.clone(), pending.len());
                pending.push(PendingHolding {
                    mint: record.mint,
                    amount,
                    decimals: record.decimals,
                });
            }
        }
    }

    pending
        .into_iter()
        .map(|p| {
            let entry = registry.get(&p.mint);
            if entry.is_none() {
                debug!("Mint {} not in registry", p.mint);
            }

            TokenHolding {
                raw_amount: p.amount.to_string(),
                decimals: p
                    .decimals
                    .filter(|d| *d != 0)
                    .or_else(|| entry.and_then(|e| e.decimals))
                    .unwrap_or(0),
                name: entry
                    .and_then(|e| e.name.clone())
                    .unwrap_or_else(|| UNKNOWN_TOKEN.to_string()),
                symbol: entry
                    .map(|e| e.symbol.clone())
                    .unwrap_or_else(|| UNKNOWN_TOKEN.to_string()),
                logo_url: entry.and_then(|e| e.logo_url.clone()),
                mint: p.mint,
            }
        })
        .collect()
}

pub fn build_nft_assets(records: Vec<RawCollectible>) -> Vec<NftAsset> {
    let mut seen = HashSet::new();

    records
        .into_iter()
        .filter_map(|record| {
            let mint = record.mint.filter(|m| !m.is_empty())?;
            if !seen.insert(mint.clone()) {
                return None;
            }

            let attributes: BTreeSet<NftAttribute> = record
                .attributes
                .unwrap_or_default()
                .into_iter()
                .map(|a| NftAttribute {
                    trait_type: a.trait_type,
                    value: a.value.unwrap_or_default(),
                })
                .collect();

            Some(NftAsset {
                mint,
                name: record.name.unwrap_or_else(|| UNKNOWN_TOKEN.to_string()),
                image_url: record.image.unwrap_or_default(),
                collection_name: record.collection.and_then(|c| c.name),
                attributes,
            })
        })
        .collect()
}

pub fn build_transactions(records: Vec<RawTransaction>) -> Vec<TransactionRecord> {
    let mut seen = HashSet::new();

    records
        .into_iter()
        .filter_map(|record| {
            let signature = record.signature.filter(|s| !s.is_empty())?;
            let Some(status) = record.status.as_deref().and_then(TxStatus::parse) else {
                debug!("Skipping transaction {} with unrecognized status {:?}", signature, record.status);
                return None;
            };
            if !seen.insert(signature.clone()) {
                return None;
            }

            Some(TransactionRecord {
                signature,
                timestamp_seconds: record.timestamp.unwrap_or(0),
                tx_type: record.tx_type.unwrap_or_else(|| "UNKNOWN".to_string()),
                status,
                amount: record.amount,
                token_symbol: record.token_symbol,
            })
        })
        .collect()
}

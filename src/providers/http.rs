//! Small helpers shared by the HTTP-backed providers

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::WalletError;

/// GET a URL and parse the body as JSON.
///
/// A non-success status is a `NetworkFailure`; a body that is not JSON is a
/// `MalformedResponse`.
pub async fn get_json(client: &Client, url: &str, query: &[(&str, &str)]) -> Result<Value, WalletError> {
    let response = client
        .get(url)
        .query(query)
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(WalletError::NetworkFailure(format!("{} returned status {}", url, status)));
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map_err(|e| WalletError::MalformedResponse(format!("{} returned invalid JSON: {}", url, e)))
}

/// Decode every element of the array under `key`.
///
/// A missing or non-array value yields an empty list and records that fail to
/// decode are skipped.
pub fn extract_records<T: DeserializeOwned>(body: &Value, key: &str) -> Vec<T> {
    let Some(items) = body.get(key).and_then(Value::as_array) else {
        warn!("Response has no '{}' array, treating it as empty", key);
        return Vec::new();
    };

    decode_each(items, key)
}

/// Decode every element of a top-level array, skipping bad ones
pub fn decode_each<T: DeserializeOwned>(items: &[Value], label: &str) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping malformed {} record: {}", label, e);
                None
            }
        })
        .collect()
}

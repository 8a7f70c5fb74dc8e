use std::collections::BTreeSet;

use serde::Serialize;

/// One `(trait, value)` pair on a collectible
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NftAttribute {
    #[serde(rename = "trait")]
    pub trait_type: String,
    pub value: String,
}

/// A collectible held by the wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NftAsset {
    pub mint: String,
    pub name: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    pub attributes: BTreeSet<NftAttribute>,
}

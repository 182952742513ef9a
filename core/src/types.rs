//! Optional typed shapes for common provider payloads.
//!
//! # Design
//! The service objects return raw `serde_json::Value` and never reshape a
//! payload. Callers that want structure pass that value through
//! [`decode`]. Only the fields most consumers read are modelled; unknown
//! fields are ignored and nearly everything is optional, since neither
//! provider promises a stable schema.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Decodes a raw payload into `T`, mapping a shape mismatch to
/// `ApiError::Decode`.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub label: Option<String>,
    pub url: String,
}

/// Entry of `/token-profiles/latest/v1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenProfile {
    pub url: String,
    pub chain_id: String,
    pub token_address: String,
    pub icon: Option<String>,
    pub header: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Entry of `/token-boosts/latest/v1` and `/token-boosts/top/v1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBoost {
    pub url: String,
    pub chain_id: String,
    pub token_address: String,
    pub amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub icon: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Entry of `/orders/v1/{chain}/{token}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub payment_timestamp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRef {
    pub address: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Liquidity {
    pub usd: Option<f64>,
    pub base: Option<f64>,
    pub quote: Option<f64>,
}

/// A DEX pair as returned by the pair, search and token endpoints.
/// Prices arrive as decimal strings and are kept that way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    pub chain_id: String,
    pub dex_id: String,
    pub url: Option<String>,
    pub pair_address: String,
    pub base_token: TokenRef,
    pub quote_token: TokenRef,
    pub price_native: Option<String>,
    pub price_usd: Option<String>,
    pub liquidity: Option<Liquidity>,
    pub fdv: Option<f64>,
    pub market_cap: Option<f64>,
    pub pair_created_at: Option<i64>,
}

/// Envelope of `/latest/dex/...` responses. `pairs` is `null` when
/// nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairsResponse {
    pub schema_version: Option<String>,
    pub pairs: Option<Vec<Pair>>,
}

impl PairsResponse {
    pub fn pairs(&self) -> &[Pair] {
        self.pairs.as_deref().unwrap_or(&[])
    }
}

/// `/simple/price` and `/simple/token_price`: id or contract address,
/// then currency key (`usd`, `usd_market_cap`, `last_updated_at`, ...).
/// Figures the provider cannot compute arrive as `null`.
pub type SimplePrice = HashMap<String, HashMap<String, Option<f64>>>;

/// Entry of `/coins/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinListEntry {
    pub id: String,
    pub symbol: String,
    pub name: String,
}

/// Entry of `/coins/markets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub total_volume: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub last_updated: Option<String>,
}

/// `/coins/{id}/market_chart`: `[timestamp_ms, value]` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketChart {
    pub prices: Vec<[f64; 2]>,
    pub market_caps: Vec<[f64; 2]>,
    pub total_volumes: Vec<[f64; 2]>,
}

//! Data model for the market dashboard

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One tradable cryptocurrency and its market attributes.
///
/// `id` is the stable external identifier and is unique within a fetched
/// list. The order a list arrives in from the API carries no meaning and
/// must be treated as unordered until explicitly sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    /// Display symbol, uppercased during normalization
    pub symbol: String,
    pub name: String,
    /// Logo URL
    pub image: String,
    /// Latest price in USD
    pub current_price: f64,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    /// 7-day change; the API omits it for some assets, normalized to 0
    pub price_change_percentage_7d: f64,
    pub market_cap_rank: Option<u32>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    /// All-time high in USD
    pub ath: Option<f64>,
    /// All-time low in USD
    pub atl: Option<f64>,
    /// Last-updated timestamp as supplied by the API
    pub last_updated: String,
}

/// Lightweight projection returned by free-text search.
///
/// Transient: discarded when the search term is cleared or a result is
/// selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    /// Thumbnail URL
    #[serde(default)]
    pub thumb: String,
}

/// Aggregate market snapshot from the `/global` endpoint.
///
/// Read-only; never merged into the asset list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalStats {
    pub active_cryptocurrencies: Option<u64>,
    pub markets: Option<u64>,
    /// Total market cap keyed by currency code ("usd", "btc", ...)
    #[serde(default)]
    pub total_market_cap: HashMap<String, f64>,
    /// Total 24h volume keyed by currency code
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    /// Dominance percentage keyed by coin symbol
    #[serde(default)]
    pub market_cap_percentage: HashMap<String, f64>,
    pub market_cap_change_percentage_24h_usd: Option<f64>,
    /// Unix timestamp of the snapshot
    pub updated_at: Option<i64>,
}

/// One entry of the `/search/trending` list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub item: TrendingCoin,
}

/// The coin inside a trending entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: String,
    pub coin_id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub small: String,
    #[serde(default)]
    pub large: String,
    pub score: Option<i64>,
}

/// Full detail record for one coin, as the `/coins/{id}` endpoint
/// supplies it. Fields are deserialized verbatim; nothing is normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinDetails {
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// Localized descriptions keyed by language code
    #[serde(default)]
    pub description: HashMap<String, String>,
    pub image: Option<DetailImage>,
    pub market_cap_rank: Option<u32>,
    pub market_data: Option<DetailMarketData>,
    pub last_updated: Option<String>,
}

/// Image URLs of a detail record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailImage {
    pub thumb: Option<String>,
    pub small: Option<String>,
    pub large: Option<String>,
}

/// Market data section of a detail record. Price-like fields are keyed
/// by currency code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailMarketData {
    #[serde(default)]
    pub current_price: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap: HashMap<String, f64>,
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub price_change_percentage_7d: Option<f64>,
    pub price_change_percentage_30d: Option<f64>,
    #[serde(default)]
    pub high_24h: HashMap<String, f64>,
    #[serde(default)]
    pub low_24h: HashMap<String, f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    #[serde(default)]
    pub ath: HashMap<String, f64>,
    #[serde(default)]
    pub atl: HashMap<String, f64>,
    pub sparkline_7d: Option<Sparkline>,
}

/// 7-day price sparkline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sparkline {
    #[serde(default)]
    pub price: Vec<f64>,
}

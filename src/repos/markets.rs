//! Market list repository: paged fetch and normalization

use crate::{
    client::ApiClient,
    constants::{API_BASE_URL, MARKETS_PAGE_SIZE},
    error::ApiError,
    source::MarketDataSource,
    types::Asset,
};
use async_trait::async_trait;
use serde::Deserialize;

/// Raw `/coins/markets` record, before normalization
#[derive(Debug, Deserialize)]
struct RawMarketRecord {
    id: String,
    symbol: String,
    name: String,
    #[serde(default)]
    image: String,
    current_price: f64,
    market_cap: Option<f64>,
    total_volume: Option<f64>,
    price_change_percentage_24h: Option<f64>,
    price_change_percentage_7d_in_currency: Option<f64>,
    market_cap_rank: Option<u32>,
    circulating_supply: Option<f64>,
    total_supply: Option<f64>,
    max_supply: Option<f64>,
    ath: Option<f64>,
    atl: Option<f64>,
    #[serde(default)]
    last_updated: String,
}

/// Repository for the paginated market list
pub struct MarketsRepository {
    client: ApiClient,
}

impl MarketsRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Builds the market page URL: descending market cap, both the 24h
    /// and 7d change fields, sparklines off.
    fn page_url(page: u32, per_page: u32) -> String {
        format!(
            "{API_BASE_URL}/coins/markets?vs_currency=usd&order=market_cap_desc\
             &per_page={per_page}&page={page}&sparkline=false\
             &price_change_percentage=24h,7d"
        )
    }

    /// Fetches one page with the default page size.
    pub async fn fetch_assets(&self, page: u32) -> Result<Vec<Asset>, ApiError> {
        self.fetch_page(page, MARKETS_PAGE_SIZE).await
    }
}

/// Maps a raw record into the dashboard's [`Asset`] shape: symbol
/// uppercased, missing 7d change defaulted to 0, every other absent
/// numeric kept absent.
fn normalize(raw: RawMarketRecord) -> Asset {
    Asset {
        id: raw.id,
        symbol: raw.symbol.to_uppercase(),
        name: raw.name,
        image: raw.image,
        current_price: raw.current_price,
        market_cap: raw.market_cap,
        total_volume: raw.total_volume,
        price_change_percentage_24h: raw.price_change_percentage_24h,
        price_change_percentage_7d: raw.price_change_percentage_7d_in_currency.unwrap_or(0.0),
        market_cap_rank: raw.market_cap_rank,
        circulating_supply: raw.circulating_supply,
        total_supply: raw.total_supply,
        max_supply: raw.max_supply,
        ath: raw.ath,
        atl: raw.atl,
        last_updated: raw.last_updated,
    }
}

#[async_trait]
impl MarketDataSource for MarketsRepository {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<Asset>, ApiError> {
        let url = Self::page_url(page, per_page);
        tracing::debug!(page, per_page, "fetching market page");

        let records: Vec<RawMarketRecord> = self.client.get_json(&url).await?;
        let assets: Vec<Asset> = records.into_iter().map(normalize).collect();

        tracing::debug!(count = assets.len(), page, "fetched market page");
        Ok(assets)
    }

    fn source_name(&self) -> &'static str {
        "coingecko"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_carries_the_full_query() {
        let url = MarketsRepository::page_url(1, 249);
        assert_eq!(
            url,
            "https://api.coingecko.com/api/v3/coins/markets?vs_currency=usd\
             &order=market_cap_desc&per_page=249&page=1&sparkline=false\
             &price_change_percentage=24h,7d"
        );
    }

    #[test]
    fn normalization_uppercases_symbol_and_defaults_7d_change() {
        let raw: RawMarketRecord = serde_json::from_str(
            r#"{
                "id": "bitcoin",
                "symbol": "btc",
                "name": "Bitcoin",
                "image": "https://example.com/btc.png",
                "current_price": 67021.5,
                "market_cap": 1320000000000.0,
                "total_volume": 28000000000.0,
                "price_change_percentage_24h": 5.2,
                "price_change_percentage_7d_in_currency": null,
                "market_cap_rank": 1,
                "circulating_supply": 19700000.0,
                "total_supply": 21000000.0,
                "max_supply": 21000000.0,
                "ath": 73737.0,
                "atl": 67.81,
                "last_updated": "2024-06-01T00:00:00.000Z"
            }"#,
        )
        .unwrap();

        let asset = normalize(raw);

        assert_eq!(asset.symbol, "BTC");
        assert_eq!(asset.price_change_percentage_7d, 0.0);
        assert_eq!(asset.price_change_percentage_24h, Some(5.2));
        assert_eq!(asset.market_cap_rank, Some(1));
    }

    #[test]
    fn absent_numerics_stay_absent() {
        let raw: RawMarketRecord = serde_json::from_str(
            r#"{
                "id": "obscure",
                "symbol": "obs",
                "name": "Obscure",
                "current_price": 0.002,
                "market_cap": null,
                "total_volume": null,
                "price_change_percentage_24h": null,
                "price_change_percentage_7d_in_currency": 1.5,
                "market_cap_rank": null,
                "circulating_supply": null,
                "total_supply": null,
                "max_supply": null,
                "ath": null,
                "atl": null
            }"#,
        )
        .unwrap();

        let asset = normalize(raw);

        assert_eq!(asset.market_cap, None);
        assert_eq!(asset.price_change_percentage_24h, None);
        assert_eq!(asset.price_change_percentage_7d, 1.5);
        assert_eq!(asset.market_cap_rank, None);
        assert_eq!(asset.last_updated, "");
    }
}

//! Detail, global and trending repositories
//!
//! Each operation is one GET through the shared client; bodies come back
//! verbatim apart from unwrapping the response envelope.

use crate::{
    client::ApiClient,
    constants::API_BASE_URL,
    error::ApiError,
    types::{CoinDetails, GlobalStats, TrendingEntry},
};
use futures::future::try_join;
use serde::Deserialize;

/// `/global` response envelope
#[derive(Debug, Deserialize)]
struct GlobalEnvelope {
    data: GlobalStats,
}

/// `/search/trending` response envelope
#[derive(Debug, Deserialize)]
struct TrendingEnvelope {
    #[serde(default)]
    coins: Vec<TrendingEntry>,
}

/// Repository for single-coin detail, global stats and trending lists
pub struct CoinsRepository {
    client: ApiClient,
}

impl CoinsRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches the full detail record for one coin.
    pub async fn fetch_details(&self, id: &str) -> Result<CoinDetails, ApiError> {
        let url = format!(
            "{API_BASE_URL}/coins/{id}?localization=false&tickers=false\
             &market_data=true&community_data=false&developer_data=false\
             &sparkline=true"
        );
        tracing::debug!(id, "fetching coin details");
        self.client.get_json(&url).await
    }

    /// Fetches the aggregate global market snapshot.
    pub async fn fetch_global(&self) -> Result<GlobalStats, ApiError> {
        let url = format!("{API_BASE_URL}/global");
        let envelope: GlobalEnvelope = self.client.get_json(&url).await?;
        Ok(envelope.data)
    }

    /// Fetches the trending coin list.
    pub async fn fetch_trending(&self) -> Result<Vec<TrendingEntry>, ApiError> {
        let url = format!("{API_BASE_URL}/search/trending");
        let envelope: TrendingEnvelope = self.client.get_json(&url).await?;
        Ok(envelope.coins)
    }

    /// Fetches global stats and trending coins concurrently, as the
    /// market page renders them together. Either error propagates.
    pub async fn fetch_overview(&self) -> Result<(GlobalStats, Vec<TrendingEntry>), ApiError> {
        try_join(self.fetch_global(), self.fetch_trending()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_envelope_unwraps_the_data_field() {
        let envelope: GlobalEnvelope = serde_json::from_str(
            r#"{
                "data": {
                    "active_cryptocurrencies": 10231,
                    "markets": 901,
                    "total_market_cap": {"usd": 2310000000000.0, "btc": 34500000.0},
                    "total_volume": {"usd": 91000000000.0},
                    "market_cap_percentage": {"btc": 54.1, "eth": 17.3},
                    "market_cap_change_percentage_24h_usd": -1.2,
                    "updated_at": 1717200000
                }
            }"#,
        )
        .unwrap();

        let stats = envelope.data;
        assert_eq!(stats.active_cryptocurrencies, Some(10231));
        assert_eq!(stats.total_market_cap.get("usd"), Some(&2.31e12));
        assert_eq!(stats.market_cap_change_percentage_24h_usd, Some(-1.2));
    }

    #[test]
    fn trending_envelope_unwraps_the_coins_field() {
        let envelope: TrendingEnvelope = serde_json::from_str(
            r#"{
                "coins": [
                    {
                        "item": {
                            "id": "pepe",
                            "coin_id": 29850,
                            "name": "Pepe",
                            "symbol": "PEPE",
                            "market_cap_rank": 23,
                            "thumb": "https://example.com/pepe-thumb.png",
                            "small": "https://example.com/pepe-small.png",
                            "large": "https://example.com/pepe-large.png",
                            "score": 0
                        }
                    }
                ],
                "exchanges": []
            }"#,
        )
        .unwrap();

        assert_eq!(envelope.coins.len(), 1);
        assert_eq!(envelope.coins[0].item.id, "pepe");
        assert_eq!(envelope.coins[0].item.market_cap_rank, Some(23));
    }

    #[test]
    fn detail_record_deserializes_verbatim() {
        let details: CoinDetails = serde_json::from_str(
            r#"{
                "id": "bitcoin",
                "symbol": "btc",
                "name": "Bitcoin",
                "description": {"en": "The first cryptocurrency."},
                "image": {"thumb": "t.png", "small": "s.png", "large": "l.png"},
                "market_cap_rank": 1,
                "market_data": {
                    "current_price": {"usd": 67021.5},
                    "market_cap": {"usd": 1320000000000.0},
                    "total_volume": {"usd": 28000000000.0},
                    "price_change_percentage_24h": 5.2,
                    "price_change_percentage_7d": -0.8,
                    "price_change_percentage_30d": 12.4,
                    "high_24h": {"usd": 67900.0},
                    "low_24h": {"usd": 64100.0},
                    "circulating_supply": 19700000.0,
                    "total_supply": 21000000.0,
                    "max_supply": 21000000.0,
                    "ath": {"usd": 73737.0},
                    "atl": {"usd": 67.81},
                    "sparkline_7d": {"price": [64000.0, 65500.0, 67021.5]}
                },
                "last_updated": "2024-06-01T00:00:00.000Z"
            }"#,
        )
        .unwrap();

        // No normalization: the symbol stays exactly as supplied
        assert_eq!(details.symbol, "btc");
        let market_data = details.market_data.unwrap();
        assert_eq!(market_data.current_price.get("usd"), Some(&67021.5));
        assert_eq!(market_data.sparkline_7d.unwrap().price.len(), 3);
    }
}

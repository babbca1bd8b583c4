//! Fetches one market snapshot and prints the dashboard's widgets:
//! the top of the table, the movers, and the global overview.

use crypto_market_sdk::format::{format_market_cap, format_percentage, format_price};
use crypto_market_sdk::{ApiClient, CoinsRepository, MarketFeed};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::new()?;

    let feed = MarketFeed::new(client.clone());
    feed.refresh_now().await?;
    let store = feed.store();

    println!("top of the market:");
    for asset in store.assets().await.iter().take(10) {
        println!(
            "  #{:<3} {:<6} {:>14}  24h {:>8}",
            asset.market_cap_rank.unwrap_or(0),
            asset.symbol,
            format_price(asset.current_price),
            format_percentage(asset.price_change_percentage_24h),
        );
    }

    println!("\ntop gainers:");
    for asset in store.top_gainers().await {
        println!(
            "  {:<6} +{}",
            asset.symbol,
            format_percentage(asset.price_change_percentage_24h)
        );
    }

    println!("\ntop losers:");
    for asset in store.top_losers().await {
        println!(
            "  {:<6} -{}",
            asset.symbol,
            format_percentage(asset.price_change_percentage_24h)
        );
    }

    let coins = CoinsRepository::new(client);
    let (global, trending) = coins.fetch_overview().await?;
    if let Some(cap) = global.total_market_cap.get("usd") {
        println!("\nglobal market cap: {}", format_market_cap(Some(*cap)));
    }
    let trending: Vec<&str> = trending.iter().map(|t| t.item.symbol.as_str()).collect();
    println!("trending: {}", trending.join(", "));

    Ok(())
}

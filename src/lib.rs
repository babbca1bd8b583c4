//! # Crypto Market Dashboard SDK
//!
//! Data layer for a live cryptocurrency market dashboard: fetches market
//! pages, search results, coin details, global stats and trending lists
//! from the CoinGecko API, and derives the dashboard's views (sorted
//! table, top gainers, top losers) from the in-memory asset list.
//!
//! The presentation layer stays outside this crate. It calls the
//! repositories and the feed, renders the returned data, and decides how
//! loading, error and empty states look.
//!
//! ## Usage
//!
//! ```no_run
//! use crypto_market_sdk::{ApiClient, MarketFeed, SortField};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let feed = MarketFeed::new(ApiClient::new()?);
//!
//! // Immediate fetch, then every 60 seconds until the feed is dropped
//! feed.start().await;
//!
//! let store = feed.store();
//! store.apply_sort(SortField::CurrentPrice).await;
//! for asset in store.assets().await.iter().take(10) {
//!     println!("{} ${:.2}", asset.symbol, asset.current_price);
//! }
//!
//! for gainer in store.top_gainers().await {
//!     println!("up: {}", gainer.symbol);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! MarketFeed (refresh every 60s, manual refresh_now)
//!     ↓
//! MarketsRepository (fetch + normalize /coins/markets)
//!     ↓
//! ApiClient (10s timeout, 3 attempts, 1s pause)
//!     ↓
//! MarketStore (in-memory asset list, sort state)
//!     ↓
//! view (sorting, top gainers / losers)
//! ```
//!
//! `SearchRepository` and `CoinsRepository` sit beside the feed and share
//! the same `ApiClient`.
//!
//! ## Error handling
//!
//! ```no_run
//! use crypto_market_sdk::{ApiClient, ApiError, MarketFeed};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let feed = MarketFeed::new(ApiClient::new()?);
//!
//! match feed.refresh_now().await {
//!     Ok(()) => {}
//!     Err(ApiError::Timeout) => eprintln!("the API is not answering"),
//!     Err(ApiError::HttpStatus(status)) => eprintln!("API rejected us: {status}"),
//!     Err(e) => eprintln!("refresh failed: {e}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The client retries timeouts and transport failures on its own; an
//! error reaching the caller means the retry budget is spent or the
//! error was never retryable, and the UI should offer a manual retry.

pub mod client;
pub mod constants;
pub mod error;
pub mod feed;
pub mod format;
pub mod metrics;
pub mod repos;
pub mod settings;
pub mod source;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use client::{ApiClient, RetryPolicy};
pub use error::{ApiError, SettingsError};
pub use feed::MarketFeed;
pub use metrics::RefreshMetrics;
pub use repos::{CoinsRepository, MarketsRepository, SearchOutcome, SearchRepository};
pub use settings::{DashboardSettings, MemorySettingsStore, SettingsStore, Theme};
pub use source::MarketDataSource;
pub use store::MarketStore;
pub use types::{Asset, CoinDetails, GlobalStats, SearchResult, TrendingEntry};
pub use view::{SortDirection, SortField, SortSpec};

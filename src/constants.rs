//! Constants for the market dashboard data layer
//!
//! All tuning for the data layer is centralized here. No runtime
//! configuration is used - the repositories operate with these
//! compile-time constants.

/// CoinGecko API base URL
pub const API_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// HTTP request timeout per attempt (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Total number of attempts for a retryable request, including the first
pub const MAX_ATTEMPTS: u32 = 3;

/// Fixed pause between attempts (in milliseconds)
pub const RETRY_PAUSE_MS: u64 = 1000;

/// How often the feed refreshes the asset list (in seconds)
pub const REFRESH_INTERVAL_SECS: u64 = 60;

/// Assets requested per market page
pub const MARKETS_PAGE_SIZE: u32 = 249;

/// Minimum sanitized query length before a search leaves the process
pub const SEARCH_MIN_QUERY_LEN: usize = 2;

/// Maximum sanitized query length; longer input is truncated
pub const SEARCH_MAX_QUERY_LEN: usize = 50;

/// Minimum spacing between consecutive outbound search calls (in milliseconds)
pub const SEARCH_WINDOW_MS: u64 = 500;

/// Maximum number of search results surfaced to the caller
pub const SEARCH_RESULT_LIMIT: usize = 10;

/// Number of entries in the top gainers / top losers views
pub const TOP_MOVERS_LIMIT: usize = 5;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "crypto-market-sdk/0.1.0";

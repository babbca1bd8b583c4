//! Repositories over the remote market API

pub mod coins;
pub mod markets;
pub mod search;

pub use coins::CoinsRepository;
pub use markets::MarketsRepository;
pub use search::{SearchOutcome, SearchRepository};

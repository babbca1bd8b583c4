//! In-memory asset list store
//!
//! Owns the dashboard's asset list: replaced wholesale by the feed,
//! re-sorted in place on user action, read as snapshots by everything
//! else. Single writer (the feed), many readers.

use crate::{
    types::Asset,
    view::{self, SortField, SortSpec},
};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct StoreState {
    assets: Vec<Asset>,
    sort: SortSpec,
    last_updated: Option<DateTime<Utc>>,
    applied_ticket: u64,
}

/// Holder of the current asset list and its sort state
pub struct MarketStore {
    state: RwLock<StoreState>,
}

impl MarketStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Replaces the held list wholesale.
    ///
    /// `ticket` orders competing refreshes by issue time; a result whose
    /// ticket is not newer than the last applied one is discarded and
    /// `false` is returned, so a slow response cannot clobber a newer one.
    pub async fn replace(&self, ticket: u64, assets: Vec<Asset>) -> bool {
        let mut state = self.state.write().await;
        if ticket <= state.applied_ticket {
            tracing::debug!(
                ticket,
                applied = state.applied_ticket,
                "discarding stale refresh"
            );
            return false;
        }

        state.applied_ticket = ticket;
        state.assets = assets;
        state.last_updated = Some(Utc::now());
        true
    }

    /// Re-sorts the held list on `field`, toggling per the sort rule,
    /// and returns the spec now in effect.
    pub async fn apply_sort(&self, field: SortField) -> SortSpec {
        let mut state = self.state.write().await;
        let (sorted, next) = view::sort_assets(&state.assets, state.sort, field);
        state.assets = sorted;
        state.sort = next;
        next
    }

    /// Snapshot of the held list in its current order.
    pub async fn assets(&self) -> Vec<Asset> {
        self.state.read().await.assets.clone()
    }

    pub async fn sort_spec(&self) -> SortSpec {
        self.state.read().await.sort
    }

    /// When the list was last replaced, if ever.
    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_updated
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.assets.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.assets.is_empty()
    }

    /// Top five gainers over the held list.
    pub async fn top_gainers(&self) -> Vec<Asset> {
        view::top_gainers(&self.state.read().await.assets)
    }

    /// Top five losers over the held list.
    pub async fn top_losers(&self) -> Vec<Asset> {
        view::top_losers(&self.state.read().await.assets)
    }
}

impl Default for MarketStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::asset;
    use crate::view::SortDirection;

    #[tokio::test]
    async fn replace_swaps_the_whole_list() {
        let store = MarketStore::new();

        assert!(store.replace(1, vec![asset("bitcoin"), asset("ethereum")]).await);
        assert_eq!(store.len().await, 2);

        assert!(store.replace(2, vec![asset("solana")]).await);
        let assets = store.assets().await;
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].id, "solana");
        assert!(store.last_updated().await.is_some());
    }

    #[tokio::test]
    async fn stale_tickets_are_discarded() {
        let store = MarketStore::new();

        assert!(store.replace(2, vec![asset("fresh")]).await);
        // A slower request issued earlier loses
        assert!(!store.replace(1, vec![asset("stale")]).await);

        let assets = store.assets().await;
        assert_eq!(assets[0].id, "fresh");
    }

    #[tokio::test]
    async fn apply_sort_persists_order_and_spec() {
        let store = MarketStore::new();
        let mut cheap = asset("cheap");
        cheap.current_price = 1.0;
        let mut dear = asset("dear");
        dear.current_price = 100.0;
        store.replace(1, vec![dear, cheap]).await;

        let spec = store.apply_sort(SortField::CurrentPrice).await;
        assert_eq!(spec.direction, SortDirection::Ascending);
        assert_eq!(store.assets().await[0].id, "cheap");

        let spec = store.apply_sort(SortField::CurrentPrice).await;
        assert_eq!(spec.direction, SortDirection::Descending);
        assert_eq!(store.assets().await[0].id, "dear");
        assert_eq!(store.sort_spec().await, spec);
    }
}

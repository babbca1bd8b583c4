//! Client-side derivation over the in-memory asset list
//!
//! Sorting and the top-movers views are pure functions: they never touch
//! the network and never mutate their input.

use crate::constants::TOP_MOVERS_LIMIT;
use crate::types::Asset;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of the active sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Sortable columns of the dashboard table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    CurrentPrice,
    PriceChange24h,
    PriceChange7d,
    MarketCap,
    TotalVolume,
    MarketCapRank,
}

impl SortField {
    /// Numeric key for this column, `None` when the asset lacks a value.
    /// `Name` sorts as text and has no numeric key.
    fn numeric_key(self, asset: &Asset) -> Option<f64> {
        match self {
            Self::Name => None,
            Self::CurrentPrice => Some(asset.current_price),
            Self::PriceChange24h => asset.price_change_percentage_24h,
            Self::PriceChange7d => Some(asset.price_change_percentage_7d),
            Self::MarketCap => asset.market_cap,
            Self::TotalVolume => asset.total_volume,
            Self::MarketCapRank => asset.market_cap_rank.map(f64::from),
        }
    }
}

/// Active sort field and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::MarketCapRank,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortSpec {
    /// Next spec after the user selects `field`: reselecting the active
    /// field flips direction, a new field resets to ascending.
    pub fn select(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Ascending,
            }
        }
    }
}

/// Re-orders `assets` on `field`, toggling off the current spec.
///
/// Returns the new ordering and the spec that produced it; the input is
/// untouched. The sort is stable.
pub fn sort_assets(assets: &[Asset], current: SortSpec, field: SortField) -> (Vec<Asset>, SortSpec) {
    let next = current.select(field);
    let mut sorted = assets.to_vec();
    sorted.sort_by(|a, b| compare(a, b, next));
    (sorted, next)
}

fn compare(a: &Asset, b: &Asset, spec: SortSpec) -> Ordering {
    let ord = match spec.field {
        SortField::Name => a.name.cmp(&b.name),
        field => {
            // Missing values rank as +inf ascending / -inf descending so
            // they land after every present value either way.
            let fill = match spec.direction {
                SortDirection::Ascending => f64::INFINITY,
                SortDirection::Descending => f64::NEG_INFINITY,
            };
            let ka = field.numeric_key(a).unwrap_or(fill);
            let kb = field.numeric_key(b).unwrap_or(fill);
            ka.partial_cmp(&kb).unwrap_or(Ordering::Equal)
        }
    };

    match spec.direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

/// Top five assets by positive 24h change, largest gain first.
pub fn top_gainers(assets: &[Asset]) -> Vec<Asset> {
    let mut movers: Vec<Asset> = assets
        .iter()
        .filter(|a| a.price_change_percentage_24h.is_some_and(|c| c > 0.0))
        .cloned()
        .collect();
    movers.sort_by(|a, b| {
        let ca = a.price_change_percentage_24h.unwrap_or(0.0);
        let cb = b.price_change_percentage_24h.unwrap_or(0.0);
        cb.partial_cmp(&ca).unwrap_or(Ordering::Equal)
    });
    movers.truncate(TOP_MOVERS_LIMIT);
    movers
}

/// Top five assets by negative 24h change, steepest loss first.
pub fn top_losers(assets: &[Asset]) -> Vec<Asset> {
    let mut movers: Vec<Asset> = assets
        .iter()
        .filter(|a| a.price_change_percentage_24h.is_some_and(|c| c < 0.0))
        .cloned()
        .collect();
    movers.sort_by(|a, b| {
        let ca = a.price_change_percentage_24h.unwrap_or(0.0);
        let cb = b.price_change_percentage_24h.unwrap_or(0.0);
        ca.partial_cmp(&cb).unwrap_or(Ordering::Equal)
    });
    movers.truncate(TOP_MOVERS_LIMIT);
    movers
}

//! Market and inventory widgets backed by the built-in mock data.

use crate::model::{
    Company, InventoryItem, Kpi, MarketAlert, StockPoint, StockStatus, WatchlistItem,
};
use crate::ops::seed;

/// Everything the market widgets display
#[derive(Debug, Clone)]
pub struct MarketData {
    pub kpis: Vec<Kpi>,
    pub history: Vec<StockPoint>,
    pub watchlist: Vec<WatchlistItem>,
    pub alerts: AlertBoard,
    pub inventory: Vec<InventoryItem>,
    pub companies: Vec<Company>,
}

impl MarketData {
    pub fn mock() -> Self {
        MarketData {
            kpis: seed::kpis(),
            history: seed::stock_history(),
            watchlist: seed::watchlist(),
            alerts: AlertBoard::new(seed::market_alerts()),
            inventory: seed::inventory(),
            companies: seed::companies(seed::GENERATED_COMPANIES),
        }
    }
}

/// Alerts still on screen. Dismissal lasts for the session only.
#[derive(Debug, Clone, Default)]
pub struct AlertBoard {
    alerts: Vec<MarketAlert>,
}

impl AlertBoard {
    pub fn new(alerts: Vec<MarketAlert>) -> Self {
        AlertBoard { alerts }
    }

    pub fn visible(&self) -> &[MarketAlert] {
        &self.alerts
    }

    /// Remove an alert. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u32) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != id);
        self.alerts.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// Stock relative to the reorder level: above it is Optimal, at or under it
/// Low, at or under half Warning, at or under a quarter Critical.
pub fn inventory_status(item: &InventoryItem) -> StockStatus {
    let stock = u64::from(item.stock) * 4;
    let level = u64::from(item.reorder_level);
    if stock <= level {
        StockStatus::Critical
    } else if stock <= level * 2 {
        StockStatus::Warning
    } else if stock <= level * 4 {
        StockStatus::Low
    } else {
        StockStatus::Optimal
    }
}

/// Companies whose symbol or name contains the query, case-insensitively.
/// Queries shorter than two characters match nothing.
pub fn search_companies<'a>(companies: &'a [Company], query: &str) -> Vec<&'a Company> {
    let query = query.trim().to_lowercase();
    if query.chars().count() < 2 {
        return Vec::new();
    }
    companies
        .iter()
        .filter(|c| {
            c.symbol.to_lowercase().contains(&query) || c.name.to_lowercase().contains(&query)
        })
        .collect()
}

/// "▲ 1.5%" / "▼ 0.2%"
pub fn format_change(change: f64) -> String {
    let arrow = if change >= 0.0 { '▲' } else { '▼' };
    format!("{} {}%", arrow, change.abs())
}

/// Chart series for the stock history: actual points, and the forecast line
/// which starts at the last actual point so the two connect.
pub fn history_series(points: &[StockPoint]) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let actual: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.value.map(|v| (i as f64, v)))
        .collect();
    let first_forecast = actual.len().saturating_sub(1);
    let forecast = points
        .iter()
        .enumerate()
        .skip(first_forecast)
        .map(|(i, p)| (i as f64, p.prediction))
        .collect();
    (actual, forecast)
}

/// Padded y-axis bounds over every value and prediction
pub fn history_bounds(points: &[StockPoint]) -> [f64; 2] {
    let values = points
        .iter()
        .flat_map(|p| p.value.into_iter().chain(std::iter::once(p.prediction)));
    let (min, max) = values.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min > max {
        return [0.0, 1.0];
    }
    [(min - 1.0).floor(), (max + 1.0).ceil()]
}

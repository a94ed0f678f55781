use serde::{Deserialize, Serialize};

/// Direction of a KPI or price move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Neutral,
    Negative,
}

/// A headline index card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub id: String,
    pub label: String,
    pub value: String,
    /// Percent change vs last period
    pub change: f64,
    pub status: Trend,
    /// Sparkline samples, oldest first
    pub trend: Vec<u64>,
}

/// One point of the intraday chart. Forecast-only points have no `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPoint {
    pub name: String,
    pub value: Option<f64>,
    pub prediction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistItem {
    pub id: u32,
    pub symbol: String,
    pub company: String,
    pub price: String,
    pub change: String,
    pub confidence: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Critical,
    Warning,
    Info,
}

impl AlertKind {
    pub fn title(self) -> &'static str {
        match self {
            AlertKind::Critical => "Action Required",
            AlertKind::Warning => "Warning",
            AlertKind::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketAlert {
    pub id: u32,
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    Optimal,
    Low,
    Warning,
    Critical,
}

impl StockStatus {
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::Optimal => "Optimal",
            StockStatus::Low => "Low",
            StockStatus::Warning => "Warning",
            StockStatus::Critical => "Critical",
        }
    }
}

/// A row of the inventory table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: u32,
    pub item: String,
    pub category: String,
    pub stock: u32,
    /// Stock level at which the item should be reordered
    pub reorder_level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub sector: String,
}

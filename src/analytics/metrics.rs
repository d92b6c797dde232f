//! Metric stage.
//!
//! Ratios are `Option<f64>`: a zero (or negative) denominator yields
//! `None`, never `0`, infinity or NaN.

use serde::{Deserialize, Serialize};

/// Summed hours, cost and revenue for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Hours logged.
    pub hours: f64,
    /// Labour cost.
    pub cost: f64,
    /// Revenue attributed to the group.
    pub revenue: f64,
}

impl Totals {
    /// Derives every metric for these totals.
    pub fn metrics(&self) -> Metrics {
        Metrics {
            roi: roi(self.revenue, self.cost),
            profit: profit(self.revenue, self.cost),
            profit_margin: profit_margin(self.revenue, self.cost),
        }
    }
}

/// Metrics derived from a [`Totals`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Revenue over cost.
    pub roi: Option<f64>,
    /// Revenue minus cost.
    pub profit: f64,
    /// Profit over revenue.
    pub profit_margin: Option<f64>,
}

/// Revenue over cost, absent unless cost is positive.
///
/// # Examples
///
/// ```
/// use workforce_analytics::analytics::roi;
///
/// assert_eq!(roi(500.0, 500.0), Some(1.0));
/// assert_eq!(roi(500.0, 0.0), None);
/// ```
pub fn roi(revenue: f64, cost: f64) -> Option<f64> {
    (cost > 0.0).then(|| revenue / cost)
}

/// Revenue minus cost.
pub fn profit(revenue: f64, cost: f64) -> f64 {
    revenue - cost
}

/// Profit over revenue, absent unless revenue is positive.
///
/// # Examples
///
/// ```
/// use workforce_analytics::analytics::profit_margin;
///
/// assert_eq!(profit_margin(500.0, 0.0), Some(1.0));
/// assert_eq!(profit_margin(0.0, 120.0), None);
/// ```
pub fn profit_margin(revenue: f64, cost: f64) -> Option<f64> {
    (revenue > 0.0).then(|| profit(revenue, cost) / revenue)
}
